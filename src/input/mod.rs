//! Input handling and the fingertip paint loop.
//!
//! This module turns tracked fingertips, keyboard and mouse events into
//! painting actions. It owns the brush (color, size), the toolbar and the
//! stroke-continuity state that connects successive fingertip samples.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod toolbar;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{OverlayStyle, PaintState};
pub use toolbar::{Button, Toolbar};
