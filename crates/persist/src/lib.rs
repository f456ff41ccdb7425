//! Persistence: scene files as a JSON array of `{type, color, position}`.
//!
//! # Invariants
//! - Save preserves insertion order and every field.
//! - A failed load never hands back a partial scene.
//! - "Nothing chosen" is `Ok(None)`, distinct from a read or parse failure.

pub mod scene_file;
pub mod store;

pub use scene_file::{from_json, to_json};
pub use store::{MemoryPersistence, Persistence, PersistError, SCENE_FILE_NAME, SceneFileStore};

pub fn crate_info() -> &'static str {
    "cubescape-persist v0.1.0"
}
