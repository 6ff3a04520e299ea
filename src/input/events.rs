//! Pointer event types reported by the UI collaborator.

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button (opens the shape edit prompt)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}
