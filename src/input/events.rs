//! Generic input event types for cross-backend compatibility.

/// Generic key representation.
///
/// Backends map their native key codes to these values so keybinding lookup
/// does not depend on the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used for keybinding lookup (matches the names accepted in config).
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_lowercase().to_string()),
            Key::Escape => Some("escape".to_string()),
            Key::Return => Some("return".to_string()),
            Key::Space => Some("space".to_string()),
            Key::Unknown => None,
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (toolbar clicks, simulated fingertip)
    Left,
    Right,
    Middle,
}
