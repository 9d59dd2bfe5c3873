use std::sync::Arc;

use roadmap_core::model::{Progress, TapOutcome};
use storage::repository::KeyValueStore;

use crate::error::ProgressError;

/// Storage key holding the completed-lesson count.
pub const PROGRESS_KEY: &str = "uiux-progress";

/// Progress after a tap, together with what the tap meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapResult {
    pub progress: Progress,
    pub outcome: TapOutcome,
}

/// Loads, advances and resets the persisted progress counter.
///
/// The tracker holds no progress itself: callers pass the current
/// `Progress` in and keep the returned value. Storage failures are logged and
/// never returned from `load`, `advance`, `tap`, `persist` or `reset`; the
/// caller's in-memory value stays authoritative for the rest of the session.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Arc<dyn KeyValueStore>,
    key: String,
    lesson_count: u32,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, lesson_count: u32) -> Self {
        Self::with_key(store, PROGRESS_KEY, lesson_count)
    }

    #[must_use]
    pub fn with_key(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        lesson_count: u32,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            lesson_count,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn lesson_count(&self) -> u32 {
        self.lesson_count
    }

    /// Read persisted progress. A missing key is zero progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store cannot be read and
    /// `ProgressError::Parse` if the stored value is not a count.
    pub async fn try_load(&self) -> Result<Progress, ProgressError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Progress::ZERO);
        };
        let progress = Progress::parse_persisted(&raw)?;
        Ok(self.bounded(progress))
    }

    /// Read persisted progress, falling back to zero on any failure.
    pub async fn load(&self) -> Progress {
        match self.try_load().await {
            Ok(progress) => {
                tracing::info!(key = %self.key, completed = progress.completed(), "loaded progress");
                progress
            }
            Err(ProgressError::Parse(err)) => {
                tracing::warn!(key = %self.key, error = %err, "ignoring unparsable progress");
                Progress::ZERO
            }
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to load progress");
                Progress::ZERO
            }
        }
    }

    /// Apply a tap on lesson `tapped_index` and return the resulting progress.
    pub async fn advance(&self, tapped_index: usize, current: Progress) -> Progress {
        self.tap(tapped_index, current).await.progress
    }

    /// Apply a tap on lesson `tapped_index`.
    ///
    /// Only a tap on the frontier lesson changes (and persists) progress.
    pub async fn tap(&self, tapped_index: usize, current: Progress) -> TapResult {
        let current = self.bounded(current);
        let outcome = current.tap(tapped_index, self.lesson_count);
        let progress = match outcome {
            TapOutcome::Advanced { next, .. } => {
                let stored = self.persist(next).await;
                tracing::info!(
                    lesson = tapped_index,
                    completed = stored.completed(),
                    "lesson completed"
                );
                stored
            }
            TapOutcome::Reviewed { .. } => {
                tracing::debug!(lesson = tapped_index, "reviewing completed lesson");
                current
            }
            TapOutcome::Locked { .. } | TapOutcome::OutOfRange { .. } => {
                tracing::debug!(lesson = tapped_index, ?outcome, "tap ignored");
                current
            }
        };
        TapResult { progress, outcome }
    }

    /// Apply a tap, failing if an advance cannot be stored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the tap advanced progress and the
    /// new value could not be written.
    pub async fn try_tap(
        &self,
        tapped_index: usize,
        current: Progress,
    ) -> Result<TapResult, ProgressError> {
        let current = self.bounded(current);
        let outcome = current.tap(tapped_index, self.lesson_count);
        let progress = match outcome {
            TapOutcome::Advanced { next, .. } => self.try_persist(next).await?,
            TapOutcome::Reviewed { .. }
            | TapOutcome::Locked { .. }
            | TapOutcome::OutOfRange { .. } => current,
        };
        Ok(TapResult { progress, outcome })
    }

    /// Store `progress`, bounded by the lesson count.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the value cannot be written.
    pub async fn try_persist(&self, progress: Progress) -> Result<Progress, ProgressError> {
        let progress = self.bounded(progress);
        self.store
            .set(&self.key, &progress.to_persisted())
            .await?;
        Ok(progress)
    }

    /// Store `progress`, logging failures. Returns the bounded value.
    pub async fn persist(&self, progress: Progress) -> Progress {
        let bounded = self.bounded(progress);
        if let Err(err) = self.try_persist(bounded).await {
            tracing::error!(key = %self.key, error = %err, "failed to save progress");
        }
        bounded
    }

    /// Remove persisted progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the key cannot be removed.
    pub async fn try_reset(&self) -> Result<Progress, ProgressError> {
        self.store.remove(&self.key).await?;
        Ok(Progress::ZERO)
    }

    /// Remove persisted progress, logging failures. Always returns zero.
    pub async fn reset(&self) -> Progress {
        match self.try_reset().await {
            Ok(_) => tracing::info!(key = %self.key, "progress reset"),
            Err(err) => tracing::error!(key = %self.key, error = %err, "failed to reset progress"),
        }
        Progress::ZERO
    }

    fn bounded(&self, progress: Progress) -> Progress {
        let clamped = progress.clamp_to(self.lesson_count);
        if clamped != progress {
            tracing::warn!(
                completed = progress.completed(),
                lesson_count = self.lesson_count,
                "progress exceeds roadmap length, clamping"
            );
        }
        clamped
    }
}
