//! Utility functions for colors, presets, and canvas geometry.
//!
//! This module provides:
//! - Color and brush-size name lookups shared by the toolbar, keybindings and HTTP API
//! - Integer points and rectangles in canvas coordinates
//! - Frame-to-canvas coordinate remapping

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system, the toolbar and the `/set_color` endpoint.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "white", "yellow"
/// - "eraser" or "black" (the canvas background, so painting with it erases)
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "white" => Some(WHITE),
        "yellow" => Some(YELLOW),
        "eraser" | "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to the human-readable name shown in the info line.
///
/// Colors are compared at 8-bit precision. Black is reported as "Eraser"
/// since that is what it does on the black canvas.
pub fn color_to_name(color: &Color) -> &'static str {
    const NAMED: [(Color, &str); 6] = [
        (RED, "Red"),
        (GREEN, "Green"),
        (BLUE, "Blue"),
        (WHITE, "White"),
        (YELLOW, "Yellow"),
        (BLACK, "Eraser"),
    ];

    NAMED
        .iter()
        .find(|(named, _)| named.same_rgb8(*color))
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// Uppercases the first character of a preset name for display ("medium" -> "Medium").
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Integer point in canvas (or frame) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle helper used for toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Right edge (x2).
    pub fn max_x(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (y2).
    pub fn max_y(&self) -> i32 {
        self.y + self.height
    }

    /// Strict containment: points on the border are outside.
    pub fn contains(&self, point: Point) -> bool {
        self.x < point.x && point.x < self.max_x() && self.y < point.y && point.y < self.max_y()
    }

    /// Expands the rectangle evenly in all directions by `amount`.
    pub fn inflate(&self, amount: i32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2,
            height: self.height + amount * 2,
        }
    }
}

/// Converts a normalized landmark coordinate pair into frame pixels.
///
/// Truncates toward zero, matching integer casts of the scaled value.
pub fn normalized_to_frame(x: f32, y: f32, frame_width: u32, frame_height: u32) -> Point {
    Point::new(
        (x as f64 * frame_width as f64) as i32,
        (y as f64 * frame_height as f64) as i32,
    )
}

/// Remaps a point from camera-frame pixels to canvas pixels.
///
/// The canvas is usually wider than the camera frame, so each axis is scaled
/// independently. Returns `None` when the frame has no area.
pub fn frame_to_canvas(
    point: Point,
    frame_width: u32,
    frame_height: u32,
    canvas_width: u32,
    canvas_height: u32,
) -> Option<Point> {
    if frame_width == 0 || frame_height == 0 {
        return None;
    }

    let sx = canvas_width as f64 / frame_width as f64;
    let sy = canvas_height as f64 / frame_height as f64;
    Some(Point::new(
        (point.x as f64 * sx) as i32,
        (point.y as f64 * sy) as i32,
    ))
}
