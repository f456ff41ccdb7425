use glam::Vec3;

/// Horizontal distance covered per frame for each held direction key.
pub const MOVE_SPEED: f32 = 0.1;
/// Per-frame change in vertical velocity while airborne.
pub const GRAVITY: f32 = -0.01;
/// Vertical velocity applied on a jump.
pub const JUMP_IMPULSE: f32 = 0.25;
/// Radians of look rotation per pointer-delta unit.
pub const MOUSE_SENSITIVITY: f32 = 0.002;
/// Camera height above the ground plane when jumping is enabled.
pub const EYE_HEIGHT: f32 = 1.0;
/// Camera height for the walk-only variant.
pub const WALKING_EYE_HEIGHT: f32 = 1.8;
/// Radius of the player's cylindrical collider.
pub const PLAYER_RADIUS: f32 = 0.3;
/// Half the edge length of a placed unit cube.
pub const CUBE_HALF_EXTENT: f32 = 0.5;
/// Pitch is kept this far away from straight up/down.
pub const PITCH_MARGIN: f32 = 0.1;
/// Distance from the origin along +Z at which the player spawns.
pub const SPAWN_DISTANCE: f32 = 8.0;

/// Process-wide motion tuning.
///
/// The constants are fixed; the struct only selects between the two motion
/// variants and lets tests build a controller without globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    pub speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub sensitivity: f32,
    pub eye_height: f32,
    pub player_radius: f32,
    pub cube_half_extent: f32,
    pub jump_enabled: bool,
}

impl MotionConfig {
    /// Eye height 1.0 with gravity and jumping.
    pub const fn jumping() -> Self {
        Self {
            speed: MOVE_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            sensitivity: MOUSE_SENSITIVITY,
            eye_height: EYE_HEIGHT,
            player_radius: PLAYER_RADIUS,
            cube_half_extent: CUBE_HALF_EXTENT,
            jump_enabled: true,
        }
    }

    /// Eye height 1.8, jump input ignored.
    pub const fn walking() -> Self {
        Self {
            eye_height: WALKING_EYE_HEIGHT,
            jump_enabled: false,
            ..Self::jumping()
        }
    }

    pub fn spawn_position(&self) -> Vec3 {
        Vec3::new(0.0, self.eye_height, SPAWN_DISTANCE)
    }

    /// Lowest and highest allowed pitch.
    pub fn pitch_limits(&self) -> (f32, f32) {
        let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;
        (-limit, limit)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::jumping()
    }
}
