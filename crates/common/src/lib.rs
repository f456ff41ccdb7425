//! Shared types for the cubescape workspace: placed scene objects, the camera
//! pose handed to renderers, and the fixed motion constants.

pub mod config;
pub mod types;

pub use config::MotionConfig;
pub use types::{CameraPose, Color, FrameInput, ObjectKind, SceneObject};
