use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::{Lesson, LessonError, LessonId};

/// An ordered, read-only list of lessons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roadmap {
    title: String,
    duration: Option<String>,
    lessons: Vec<Lesson>,
}

/// Unvalidated roadmap, as read from configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoadmapDraft {
    pub title: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonDraft>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LessonDraft {
    pub id: LessonId,
    pub title: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoadmapError {
    #[error("roadmap title is empty")]
    EmptyTitle,
    #[error("roadmap has no lessons")]
    NoLessons,
    #[error("duplicate lesson id {0}")]
    DuplicateLessonId(LessonId),
    #[error("too many lessons: {0}")]
    TooManyLessons(usize),
    #[error(transparent)]
    Lesson(#[from] LessonError),
}

impl RoadmapDraft {
    /// Validate and normalize the draft into a roadmap.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError` if the title is blank, there are no lessons,
    /// a lesson id repeats, or a lesson title is blank.
    pub fn validate(self) -> Result<Roadmap, RoadmapError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(RoadmapError::EmptyTitle);
        }
        if self.lessons.is_empty() {
            return Err(RoadmapError::NoLessons);
        }
        if u32::try_from(self.lessons.len()).is_err() {
            return Err(RoadmapError::TooManyLessons(self.lessons.len()));
        }

        let mut seen = HashSet::with_capacity(self.lessons.len());
        let mut lessons = Vec::with_capacity(self.lessons.len());
        for draft in self.lessons {
            if !seen.insert(draft.id) {
                return Err(RoadmapError::DuplicateLessonId(draft.id));
            }
            lessons.push(Lesson::new(draft.id, draft.title)?);
        }

        let duration = self
            .duration
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());

        Ok(Roadmap {
            title,
            duration,
            lessons,
        })
    }
}

impl Roadmap {
    /// The built-in "UI/UX Design Fundamentals" path.
    #[must_use]
    pub fn ui_ux_fundamentals() -> Self {
        const TITLES: [&str; 7] = [
            "Introduction to UI/UX Design",
            "User Research Methods",
            "Wireframing & Prototyping",
            "Visual Design Principles",
            "Interaction Design",
            "Usability Testing",
            "Portfolio Projects",
        ];

        let lessons = (1_u64..)
            .zip(TITLES)
            .map(|(id, title)| Lesson::builtin(id, title))
            .collect();

        Self {
            title: "UI/UX Design Fundamentals".to_string(),
            duration: Some("3 months".to_string()),
            lessons,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    /// Number of lessons. Validation caps this at `u32::MAX`.
    #[must_use]
    pub fn lesson_count(&self) -> u32 {
        u32::try_from(self.lessons.len()).unwrap_or(u32::MAX)
    }

    /// Chapters are lessons; kept separate for display.
    #[must_use]
    pub fn chapters(&self) -> u32 {
        self.lesson_count()
    }
}
