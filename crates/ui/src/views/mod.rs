mod roadmap;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use roadmap::RoadmapView;
pub use state::{ViewState, view_state_from_resource};
