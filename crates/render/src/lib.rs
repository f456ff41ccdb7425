//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers receive the scene read-only and cannot mutate it.
//! - A frame is fully described by a camera pose and the ordered object list.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "cubescape-render v0.1.0"
}
