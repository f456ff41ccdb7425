use crate::event::{InputEvent, Key};
use cubescape_common::FrameInput;
use glam::Vec2;

/// Input recorded between ticks.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    look_locked: bool,
    pointer_delta: Option<Vec2>,
    jump_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn look_locked(&self) -> bool {
        self.look_locked
    }

    /// Record one event. Key events overwrite the flag they name; pointer
    /// motion adds up until the next `take_frame`.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.set_key(key, true),
            InputEvent::KeyUp(key) => self.set_key(key, false),
            InputEvent::PointerMove { dx, dy } => {
                if self.look_locked {
                    let pending = self.pointer_delta.unwrap_or(Vec2::ZERO);
                    self.pointer_delta = Some(pending + Vec2::new(dx, dy));
                }
            }
            InputEvent::LookLock(locked) => {
                self.look_locked = locked;
                if !locked {
                    self.pointer_delta = None;
                }
                tracing::debug!(locked, "look-lock changed");
            }
        }
    }

    /// Sample the state for one tick, consuming the pointer delta and the
    /// jump trigger. Held directions persist.
    pub fn take_frame(&mut self) -> FrameInput {
        FrameInput {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            jump: std::mem::take(&mut self.jump_requested),
            look: self.pointer_delta.take(),
        }
    }

    fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Forward => self.forward = down,
            Key::Backward => self.backward = down,
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Jump => {
                if down {
                    self.jump_requested = true;
                }
            }
        }
    }
}
