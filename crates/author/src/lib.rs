//! Authoring: procedural templates selected by prompt, and cube placement
//! into the scene store.
//!
//! # Invariants
//! - Templates are a closed set; an unknown prompt generates nothing.
//! - Template positions are deterministic except where a template samples
//!   the injected RNG. Colors are always random and not part of a template.

pub mod placement;
pub mod template;

pub use placement::{cubes_from_prompt, populate, random_color, random_cube};
pub use template::{Template, UnknownTemplate, generate};

pub fn crate_info() -> &'static str {
    "cubescape-author v0.1.0"
}
