/// Logical keys the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

/// A raw event from the host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Relative pointer motion since the previous event.
    PointerMove { dx: f32, dy: f32 },
    /// Look-lock engaged (`true`) or released (`false`).
    LookLock(bool),
}
