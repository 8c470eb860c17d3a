//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Backends refresh this every frame before dispatching key presses, so
/// bindings like "Ctrl+S" can be told apart from a plain "S".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }
}
