//! Runtime: the session context that owns scene, player and input, and the
//! scheduler that steps it one tick at a time.
//!
//! # Invariants
//! - One tick runs to completion: sample input, move, publish pose, render.
//! - Scene load and save happen between ticks, never inside one.
//! - Ticks come from an injected `TickSource` or a `FixedStep` clock, never
//!   from raw frame timing.

pub mod frame;
pub mod session;

pub use frame::{FixedStep, FixedTicks, FrameTick, InputScript, Scheduler, TickSource};
pub use session::Session;

pub fn crate_info() -> &'static str {
    "cubescape-runtime v0.1.0"
}
