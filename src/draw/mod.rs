//! Rendering primitives and the paint canvas (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Canvas`]: The raster that strokes accumulate on
//! - Pixel conversion between Cairo, `image` and `minifb` buffers
//! - Rendering functions for Cairo-based output

pub mod canvas;
pub mod color;
pub mod pixels;
pub mod render;

// Re-export commonly used types at module level
pub use canvas::{Canvas, CanvasError};
pub use color::Color;
pub use render::{fill_circle, fill_rect, render_segment, render_text, stroke_rect, text_width};

pub use color::{BLACK, BLUE, GRAY, GREEN, RED, WHITE, YELLOW};
