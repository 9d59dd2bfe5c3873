//! Sequential unlock progression.
//!
//! `Progress` is the count of completed lessons and, equivalently, the index of
//! the frontier lesson. Per-lesson status is derived from it on demand.

use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Progress {
    completed: u32,
}

/// Derived status of a lesson at a given list position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonStatus {
    Completed,
    Current,
    Locked,
}

/// What a tap on a lesson row means for the progress counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The frontier lesson was tapped; progress moves to `next`.
    Advanced { index: usize, next: Progress },
    /// An already completed lesson was tapped; progress is unchanged.
    Reviewed { index: usize },
    /// A lesson past the frontier was tapped; nothing happens.
    Locked { index: usize },
    /// No lesson exists at `index` (this includes the slot after the last
    /// lesson once the roadmap is finished).
    OutOfRange { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid persisted progress value: {raw:?}")]
pub struct ProgressParseError {
    raw: String,
}

impl Progress {
    pub const ZERO: Self = Self { completed: 0 };

    #[must_use]
    pub fn new(completed: u32) -> Self {
        Self { completed }
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Index of the frontier lesson.
    #[must_use]
    pub fn frontier(&self) -> usize {
        usize::try_from(self.completed).unwrap_or(usize::MAX)
    }

    /// Parse the string form kept in key-value storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressParseError` unless the trimmed value is a
    /// non-negative decimal integer that fits in `u32`.
    pub fn parse_persisted(raw: &str) -> Result<Self, ProgressParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProgressParseError {
                raw: raw.to_string(),
            });
        }
        trimmed
            .parse::<u32>()
            .map(Self::new)
            .map_err(|_| ProgressParseError {
                raw: raw.to_string(),
            })
    }

    #[must_use]
    pub fn to_persisted(&self) -> String {
        self.completed.to_string()
    }

    #[must_use]
    pub fn clamp_to(self, lesson_count: u32) -> Self {
        Self::new(self.completed.min(lesson_count))
    }

    #[must_use]
    pub fn is_finished(&self, lesson_count: u32) -> bool {
        self.completed >= lesson_count
    }

    /// Completion in whole percent, capped at 100.
    #[must_use]
    pub fn percent(&self, lesson_count: u32) -> u8 {
        if lesson_count == 0 {
            return 0;
        }
        let pct = u64::from(self.completed.min(lesson_count)) * 100 / u64::from(lesson_count);
        u8::try_from(pct).unwrap_or(100)
    }

    #[must_use]
    pub fn status_of(&self, index: usize) -> LessonStatus {
        let frontier = self.frontier();
        if index < frontier {
            LessonStatus::Completed
        } else if index == frontier {
            LessonStatus::Current
        } else {
            LessonStatus::Locked
        }
    }

    /// Decide what a tap on `index` does, without touching storage.
    #[must_use]
    pub fn tap(&self, index: usize, lesson_count: u32) -> TapOutcome {
        let count = usize::try_from(lesson_count).unwrap_or(usize::MAX);
        if index >= count {
            return TapOutcome::OutOfRange { index };
        }
        match self.status_of(index) {
            LessonStatus::Completed => TapOutcome::Reviewed { index },
            LessonStatus::Locked => TapOutcome::Locked { index },
            LessonStatus::Current => TapOutcome::Advanced {
                index,
                next: Self::new(self.completed.saturating_add(1)),
            },
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.completed)
    }
}

impl TapOutcome {
    #[must_use]
    pub fn index(&self) -> usize {
        match *self {
            Self::Advanced { index, .. }
            | Self::Reviewed { index }
            | Self::Locked { index }
            | Self::OutOfRange { index } => index,
        }
    }

    /// Progress after applying this outcome to `current`.
    #[must_use]
    pub fn apply(&self, current: Progress) -> Progress {
        match *self {
            Self::Advanced { next, .. } => next,
            _ => current,
        }
    }

    /// Whether the caller should open the tapped lesson.
    #[must_use]
    pub fn opens_lesson(&self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::Reviewed { .. })
    }
}
