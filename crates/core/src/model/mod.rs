mod ids;
mod lesson;
mod progress;
mod roadmap;

pub use ids::{LessonId, ParseIdError};
pub use lesson::{Lesson, LessonError};
pub use progress::{LessonStatus, Progress, ProgressParseError, TapOutcome};
pub use roadmap::{LessonDraft, Roadmap, RoadmapDraft, RoadmapError};
