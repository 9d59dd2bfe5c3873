use thiserror::Error;

use super::LessonId;

/// One static unit of a roadmap. Lessons are identified by position at
/// runtime; `id` only carries the configured identifier through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson {0} has an empty title")]
    EmptyTitle(LessonId),
}

impl Lesson {
    /// Build a lesson, trimming the title.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is blank.
    pub fn new(id: LessonId, title: impl Into<String>) -> Result<Self, LessonError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(LessonError::EmptyTitle(id));
        }
        Ok(Self { id, title })
    }

    /// Built-in lessons whose titles are known to be non-blank.
    pub(crate) fn builtin(id: u64, title: &str) -> Self {
        Self {
            id: LessonId::new(id),
            title: title.to_string(),
        }
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_title() {
        let lesson = Lesson::new(LessonId::new(1), "  Interaction Design ").unwrap();
        assert_eq!(lesson.title(), "Interaction Design");
        assert_eq!(lesson.id(), LessonId::new(1));
    }

    #[test]
    fn rejects_blank_title() {
        let err = Lesson::new(LessonId::new(4), "   ").unwrap_err();
        assert_eq!(err, LessonError::EmptyTitle(LessonId::new(4)));
    }
}
