use crate::collision::CollisionField;
use cubescape_common::{CameraPose, FrameInput, MotionConfig};
use glam::Vec3;

/// Mutable first-person state. Only `MovementController` writes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl PlayerState {
    /// Standing on the ground at the configured spawn point, facing -Z.
    pub fn spawn(config: &MotionConfig) -> Self {
        Self {
            position: config.spawn_position(),
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

/// What happened during a single `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Horizontal displacement was applied.
    pub moved: bool,
    /// Horizontal displacement was requested but the candidate was blocked.
    pub blocked: bool,
    pub jumped: bool,
    pub landed: bool,
}

/// Unit vector the player walks along for "forward", from yaw alone.
pub fn forward_vector(yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(-s, 0.0, -c)
}

/// `forward × up`, also from yaw alone.
pub fn right_vector(yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(c, 0.0, -s)
}

/// Sum of the held directions scaled by `speed`.
///
/// Diagonals are not re-normalized: forward + right covers `speed * √2`.
pub fn horizontal_displacement(input: &FrameInput, yaw: f32, speed: f32) -> Vec3 {
    let forward = forward_vector(yaw) * speed;
    let right = right_vector(yaw) * speed;
    let mut delta = Vec3::ZERO;
    if input.forward {
        delta += forward;
    }
    if input.backward {
        delta -= forward;
    }
    if input.left {
        delta -= right;
    }
    if input.right {
        delta += right;
    }
    delta
}

/// First-person controller: look, walk, gravity and jump.
///
/// Horizontal and vertical motion are tested as two separate candidates.
/// A blocked candidate is discarded whole; there is no sliding.
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MotionConfig,
    state: PlayerState,
}

impl MovementController {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            state: PlayerState::spawn(&config),
            config,
        }
    }

    pub fn with_state(config: MotionConfig, state: PlayerState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn pose(&self) -> CameraPose {
        self.state.pose()
    }

    /// Advance one frame.
    pub fn step(&mut self, input: &FrameInput, field: &CollisionField<'_>) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        if let Some(delta) = input.look {
            self.look(delta.x, delta.y);
        }

        let delta = horizontal_displacement(input, self.state.yaw, self.config.speed);
        if delta != Vec3::ZERO {
            let candidate = Vec3::new(
                self.state.position.x + delta.x,
                self.state.position.y,
                self.state.position.z + delta.z,
            );
            if field.blocked(candidate) {
                outcome.blocked = true;
            } else {
                self.state.position = candidate;
                outcome.moved = true;
            }
        }

        if !self.state.grounded {
            self.state.vertical_velocity += self.config.gravity;
            let mut candidate = self.state.position;
            candidate.y += self.state.vertical_velocity;
            if !field.blocked(candidate) {
                self.state.position.y = candidate.y;
            } else {
                if self.state.vertical_velocity < 0.0 {
                    self.state.position.y = self.config.eye_height;
                    self.state.grounded = true;
                    outcome.landed = true;
                }
                self.state.vertical_velocity = 0.0;
            }
        } else if input.jump && self.config.jump_enabled {
            self.state.vertical_velocity = self.config.jump_impulse;
            self.state.grounded = false;
            outcome.jumped = true;
        }

        if outcome.jumped || outcome.landed {
            tracing::trace!(?outcome, y = self.state.position.y, "vertical transition");
        }
        outcome
    }

    fn look(&mut self, dx: f32, dy: f32) {
        let (lo, hi) = self.config.pitch_limits();
        self.state.yaw -= dx * self.config.sensitivity;
        self.state.pitch = (self.state.pitch - dy * self.config.sensitivity).clamp(lo, hi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObjectStore;
    use approx::assert_relative_eq;
    use cubescape_common::{Color, SceneObject};
    use glam::Vec2;

    fn held(forward: bool, backward: bool, left: bool, right: bool) -> FrameInput {
        FrameInput {
            forward,
            backward,
            left,
            right,
            ..FrameInput::default()
        }
    }

    fn jump() -> FrameInput {
        FrameInput {
            jump: true,
            ..FrameInput::default()
        }
    }

    fn controller_at(position: Vec3) -> MovementController {
        let config = MotionConfig::default();
        MovementController::with_state(
            config,
            PlayerState {
                position,
                ..PlayerState::spawn(&config)
            },
        )
    }

    #[test]
    fn basis_vectors_at_zero_yaw() {
        assert_relative_eq!(forward_vector(0.0).z, -1.0);
        assert_relative_eq!(right_vector(0.0).x, 1.0);
        assert_relative_eq!(forward_vector(1.3).dot(right_vector(1.3)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let delta = horizontal_displacement(&held(true, false, false, true), 0.4, 0.1);
        assert_relative_eq!(delta.length(), 0.1 * 2.0_f32.sqrt(), epsilon = 1e-6);
        assert_eq!(delta.y, 0.0);

        let single = horizontal_displacement(&held(true, false, false, false), 0.4, 0.1);
        assert_relative_eq!(single.length(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn opposite_keys_cancel() {
        let delta = horizontal_displacement(&held(true, true, true, true), 2.0, 0.1);
        assert_relative_eq!(delta.length(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_does_not_change_ground_speed() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);

        ctl.step(
            &FrameInput {
                look: Some(Vec2::new(0.0, -600.0)),
                ..FrameInput::default()
            },
            &field,
        );
        assert!(ctl.state().pitch > 1.0);

        let start = ctl.state().position;
        ctl.step(&held(true, false, false, false), &field);
        let moved = ctl.state().position - start;
        assert_relative_eq!(moved.length(), 0.1, epsilon = 1e-6);
        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn walking_forward_moves_along_minus_z() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);

        for _ in 0..10 {
            let outcome = ctl.step(&held(true, false, false, false), &field);
            assert!(outcome.moved);
        }
        assert_relative_eq!(ctl.state().position.z, 7.0, epsilon = 1e-5);
        assert_relative_eq!(ctl.state().position.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn blocked_move_is_discarded_whole() {
        let mut store = SceneObjectStore::new();
        store.place(SceneObject::cube(Color::WHITE, Vec3::new(0.0, 0.5, 0.0)));
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        // 0.85 from the cube; one step forward-right lands inside the reach.
        let mut ctl = controller_at(Vec3::new(-0.1, 1.0, 0.85));

        let outcome = ctl.step(&held(true, false, false, true), &field);
        assert!(outcome.blocked);
        assert!(!outcome.moved);
        assert_eq!(ctl.state().position, Vec3::new(-0.1, 1.0, 0.85));
    }

    #[test]
    fn look_yaw_and_pitch_clamp() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);

        ctl.step(
            &FrameInput {
                look: Some(Vec2::new(100.0, 10_000.0)),
                ..FrameInput::default()
            },
            &field,
        );
        assert_relative_eq!(ctl.state().yaw, -0.2, epsilon = 1e-6);
        assert_relative_eq!(
            ctl.state().pitch,
            -std::f32::consts::FRAC_PI_2 + 0.1,
            epsilon = 1e-6
        );

        ctl.step(
            &FrameInput {
                look: Some(Vec2::new(0.0, -20_000.0)),
                ..FrameInput::default()
            },
            &field,
        );
        assert_relative_eq!(
            ctl.state().pitch,
            std::f32::consts::FRAC_PI_2 - 0.1,
            epsilon = 1e-6
        );
    }

    #[test]
    fn no_look_without_delta() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);
        ctl.step(&FrameInput::default(), &field);
        assert_eq!(ctl.state().yaw, 0.0);
        assert_eq!(ctl.state().pitch, 0.0);
    }

    #[test]
    fn jump_arc_returns_to_ground() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);
        assert_eq!(ctl.state().position.y, 1.0);
        assert!(ctl.state().grounded);

        let outcome = ctl.step(&jump(), &field);
        assert!(outcome.jumped);
        assert_eq!(ctl.state().vertical_velocity, 0.25);
        assert!(!ctl.state().grounded);

        let mut peak = 0.0_f32;
        let mut frames = 0;
        while !ctl.state().grounded {
            ctl.step(&FrameInput::default(), &field);
            peak = peak.max(ctl.state().position.y);
            frames += 1;
            assert!(frames < 200, "never landed");
        }
        assert!(peak > 3.0);
        assert_eq!(ctl.state().position.y, 1.0);
        assert_eq!(ctl.state().vertical_velocity, 0.0);
    }

    #[test]
    fn no_double_jump() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);

        ctl.step(&jump(), &field);
        let outcome = ctl.step(&jump(), &field);
        assert!(!outcome.jumped);
        // Gravity applied once, no second impulse.
        assert_relative_eq!(ctl.state().vertical_velocity, 0.24, epsilon = 1e-6);
    }

    #[test]
    fn walking_variant_ignores_jump() {
        let store = SceneObjectStore::new();
        let cfg = MotionConfig::walking();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::new(cfg);

        let outcome = ctl.step(&jump(), &field);
        assert!(!outcome.jumped);
        assert!(ctl.state().grounded);
        assert_eq!(ctl.state().position.y, 1.8);
    }

    #[test]
    fn blocked_while_rising_clears_velocity_without_snapping() {
        let mut store = SceneObjectStore::new();
        store.place(SceneObject::cube(Color::WHITE, Vec3::new(0.0, 0.5, 0.0)));
        let cfg = MotionConfig::default();
        let field = CollisionField::new(&store, &cfg);
        let mut ctl = MovementController::with_state(
            cfg,
            PlayerState {
                position: Vec3::new(0.0, 2.0, 0.0),
                yaw: 0.0,
                pitch: 0.0,
                vertical_velocity: 0.1,
                grounded: false,
            },
        );

        let outcome = ctl.step(&FrameInput::default(), &field);
        assert!(!outcome.landed);
        assert_eq!(ctl.state().position.y, 2.0);
        assert_eq!(ctl.state().vertical_velocity, 0.0);
        assert!(!ctl.state().grounded);

        // Next frame it is falling into the same overlap and snaps down.
        let outcome = ctl.step(&FrameInput::default(), &field);
        assert!(outcome.landed);
        assert_eq!(ctl.state().position.y, 1.0);
    }

    #[test]
    fn pose_mirrors_state() {
        let ctl = MovementController::new(MotionConfig::default());
        let pose = ctl.pose();
        assert_eq!(pose.position, ctl.state().position);
        assert_eq!(pose.yaw, 0.0);
    }
}
