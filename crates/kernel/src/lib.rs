//! Scene Kernel: authoritative object store, collision queries, and the
//! per-frame first-person movement step.
//!
//! # Invariants
//! - The object store is append-only within a pass and replaced wholesale on load.
//! - Collision queries are read-only and never fail.
//! - Player state is mutated only by `MovementController::step`.

pub mod collision;
pub mod movement;
pub mod scene;

pub use collision::CollisionField;
pub use movement::{MovementController, PlayerState, StepOutcome};
pub use scene::{SceneEvent, SceneObjectStore};

pub fn crate_info() -> &'static str {
    "cubescape-kernel v0.1.0"
}
