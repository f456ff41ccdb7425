//! Developer Tools: read-only scene inspection for the CLI and the HUD.
//!
//! # Invariants
//! - Tools never mutate the scene.

mod inspector;

pub use inspector::{NearestObject, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "cubescape-tools v0.1.0"
}
