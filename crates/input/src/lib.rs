//! Input: raw key/pointer events recorded between ticks, sampled once per tick.
//!
//! # Invariants
//! - Last write wins per key and per pointer axis; there is no event queue.
//! - Pointer deltas are only recorded while the look-lock is engaged.
//! - A jump trigger never outlives the tick that samples it.

pub mod event;
pub mod state;

pub use event::{InputEvent, Key};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "cubescape-input v0.1.0"
}
