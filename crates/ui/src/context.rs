use std::sync::Arc;

use roadmap_core::model::Roadmap;
use services::{AppServices, ProgressTracker};

pub trait UiApp: Send + Sync {
    fn roadmap(&self) -> Arc<Roadmap>;
    fn progress_tracker(&self) -> Arc<ProgressTracker>;
}

impl UiApp for AppServices {
    fn roadmap(&self) -> Arc<Roadmap> {
        AppServices::roadmap(self)
    }

    fn progress_tracker(&self) -> Arc<ProgressTracker> {
        self.progress()
    }
}

#[derive(Clone)]
pub struct AppContext {
    roadmap: Arc<Roadmap>,
    progress_tracker: Arc<ProgressTracker>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            roadmap: app.roadmap(),
            progress_tracker: app.progress_tracker(),
        }
    }

    #[must_use]
    pub fn roadmap(&self) -> Arc<Roadmap> {
        Arc::clone(&self.roadmap)
    }

    #[must_use]
    pub fn progress_tracker(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress_tracker)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
