use std::path::Path;
use std::sync::Arc;

use roadmap_core::model::Roadmap;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress_service::ProgressTracker;
use crate::roadmap_config::load_roadmap;

/// Assembles app-facing services around one roadmap.
#[derive(Clone)]
pub struct AppServices {
    roadmap: Arc<Roadmap>,
    progress: Arc<ProgressTracker>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, roadmap: Roadmap) -> Self {
        let progress = Arc::new(ProgressTracker::new(
            Arc::clone(&storage.kv),
            roadmap.lesson_count(),
        ));
        Self {
            roadmap: Arc::new(roadmap),
            progress,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the roadmap cannot be loaded or storage
    /// initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        roadmap_path: Option<&Path>,
    ) -> Result<Self, AppServicesError> {
        let roadmap = load_roadmap(roadmap_path)?;
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, roadmap))
    }

    #[must_use]
    pub fn in_memory(roadmap: Roadmap) -> Self {
        Self::new(&Storage::in_memory(), roadmap)
    }

    #[must_use]
    pub fn roadmap(&self) -> Arc<Roadmap> {
        Arc::clone(&self.roadmap)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }
}
