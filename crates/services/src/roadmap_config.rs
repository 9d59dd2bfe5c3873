use std::path::Path;

use roadmap_core::model::{Roadmap, RoadmapDraft};

use crate::error::RoadmapConfigError;

/// Parse and validate a roadmap definition from JSON.
///
/// # Errors
///
/// Returns `RoadmapConfigError` if the JSON is malformed or the roadmap fails
/// validation.
pub fn parse_roadmap(json: &str) -> Result<Roadmap, RoadmapConfigError> {
    let draft: RoadmapDraft = serde_json::from_str(json)?;
    Ok(draft.validate()?)
}

/// Load the roadmap from `path`, or the built-in roadmap when no path is given.
///
/// # Errors
///
/// Returns `RoadmapConfigError` if the file cannot be read or parsed.
pub fn load_roadmap(path: Option<&Path>) -> Result<Roadmap, RoadmapConfigError> {
    let Some(path) = path else {
        return Ok(Roadmap::ui_ux_fundamentals());
    };

    let json = std::fs::read_to_string(path).map_err(|source| RoadmapConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let roadmap = parse_roadmap(&json)?;
    tracing::info!(
        path = %path.display(),
        lessons = roadmap.lesson_count(),
        "loaded roadmap"
    );
    Ok(roadmap)
}
