#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod roadmap_config;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressError, RoadmapConfigError};
pub use progress_service::{PROGRESS_KEY, ProgressTracker, TapResult};
pub use roadmap_config::{load_roadmap, parse_roadmap};
