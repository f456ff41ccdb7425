//! wgpu render backend for the cube viewer.
//!
//! Draws a green ground plane and one instanced unit cube per scene object
//! under a sky-blue clear color, from the player's camera pose.
//!
//! # Invariants
//! - Rendering never mutates the scene or the player.
//! - Objects are drawn in scene order; overlapping cubes z-fight as-is.

mod camera;
mod gpu;
mod mesh;
mod shaders;

pub use camera::Projection;
pub use gpu::{WgpuFrame, WgpuRenderer, GROUND_COLOR, SKY_COLOR};
