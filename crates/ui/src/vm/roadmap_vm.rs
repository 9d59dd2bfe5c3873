use roadmap_core::model::{LessonStatus, Progress, Roadmap, TapOutcome};
use services::ProgressTracker;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub index: usize,
    pub number: usize,
    pub title: String,
    pub status: LessonStatus,
}

impl LessonRowVm {
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == LessonStatus::Locked
    }

    /// Subtitle under the lesson title; locked lessons have none.
    #[must_use]
    pub fn status_label(&self) -> Option<&'static str> {
        match self.status {
            LessonStatus::Completed => Some("Completed"),
            LessonStatus::Current => Some("Next Lesson"),
            LessonStatus::Locked => None,
        }
    }

    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self.status {
            LessonStatus::Completed => "lesson-completed",
            LessonStatus::Current => "lesson-current",
            LessonStatus::Locked => "lesson-locked",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadmapVm {
    pub title: String,
    pub progress_text: String,
    pub meta_text: String,
    pub percent: u8,
    pub finished: bool,
    pub rows: Vec<LessonRowVm>,
}

#[must_use]
pub fn map_roadmap(roadmap: &Roadmap, progress: Progress) -> RoadmapVm {
    let total = roadmap.lesson_count();
    let shown = progress.clamp_to(total);

    let rows = roadmap
        .lessons()
        .iter()
        .enumerate()
        .map(|(index, lesson)| LessonRowVm {
            index,
            number: index + 1,
            title: lesson.title().to_string(),
            status: shown.status_of(index),
        })
        .collect();

    let chapters = format!("{} chapters", roadmap.chapters());
    let meta_text = match roadmap.duration() {
        Some(duration) => format!("{duration} · {chapters}"),
        None => chapters,
    };

    RoadmapVm {
        title: roadmap.title().to_string(),
        progress_text: format!("{} of {total} lessons completed", shown.completed()),
        meta_text,
        percent: shown.percent(total),
        finished: shown.is_finished(total),
        rows,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoadmapIntent {
    Tap(usize),
    Reset,
}

/// The lesson opened by the last tap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedLessonVm {
    pub index: usize,
    pub title: String,
    pub reviewed: bool,
}

impl OpenedLessonVm {
    #[must_use]
    pub fn message(&self) -> String {
        if self.reviewed {
            format!("Reviewing: {}", self.title)
        } else {
            format!("Lesson complete: {}", self.title)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentResult {
    pub progress: Progress,
    pub opened: Option<OpenedLessonVm>,
}

/// Progress an intent starts from, or `None` if it must be dropped: before
/// the first load has finished, or while an earlier intent is still applying.
#[must_use]
pub fn intent_start(loaded: Option<Progress>, in_flight: bool) -> Option<Progress> {
    if in_flight { None } else { loaded }
}

/// Run a roadmap intent against the tracker. Storage failures are absorbed by
/// the tracker, so this never fails.
pub async fn apply_intent(
    tracker: &ProgressTracker,
    roadmap: &Roadmap,
    current: Progress,
    intent: RoadmapIntent,
) -> IntentResult {
    tracing::debug!(?intent, completed = current.completed(), "roadmap intent");
    match intent {
        RoadmapIntent::Reset => IntentResult {
            progress: tracker.reset().await,
            opened: None,
        },
        RoadmapIntent::Tap(index) => {
            let result = tracker.tap(index, current).await;
            let opened = if result.outcome.opens_lesson() {
                roadmap.lesson(index).map(|lesson| OpenedLessonVm {
                    index,
                    title: lesson.title().to_string(),
                    reviewed: matches!(result.outcome, TapOutcome::Reviewed { .. }),
                })
            } else {
                None
            };
            IntentResult {
                progress: result.progress,
                opened,
            }
        }
    }
}
