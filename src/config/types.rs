//! Configuration type definitions.

use super::enums::{ButtonAction, ColorSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Canvas dimensions.
///
/// The canvas is wider than the camera frame; fingertip positions are
/// stretched to fill it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 100 - 4096)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 100 - 4096)
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Brush presets and defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Initial brush color - a named color (red, green, blue, white, eraser)
    /// or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_brush_color")]
    pub default_color: ColorSpec,

    /// Initial brush size preset name (small, medium, large)
    #[serde(default = "default_brush_size")]
    pub default_size: String,

    /// Pixel widths for the size presets
    #[serde(default)]
    pub sizes: BrushSizes,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_color: default_brush_color(),
            default_size: default_brush_size(),
            sizes: BrushSizes::default(),
        }
    }
}

/// Brush widths in pixels for each named size (valid range: 1.0 - 100.0).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushSizes {
    #[serde(default = "default_size_small")]
    pub small: f64,
    #[serde(default = "default_size_medium")]
    pub medium: f64,
    #[serde(default = "default_size_large")]
    pub large: f64,
}

impl Default for BrushSizes {
    fn default() -> Self {
        Self {
            small: default_size_small(),
            medium: default_size_medium(),
            large: default_size_large(),
        }
    }
}

impl BrushSizes {
    /// Looks up a preset by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<f64> {
        match name.trim().to_lowercase().as_str() {
            "small" => Some(self.small),
            "medium" => Some(self.medium),
            "large" => Some(self.large),
            _ => None,
        }
    }

    /// Reverse lookup used by the info line; `None` for off-preset widths.
    pub fn name_of(&self, size: f64) -> Option<&'static str> {
        if (size - self.small).abs() < f64::EPSILON {
            Some("small")
        } else if (size - self.medium).abs() < f64::EPSILON {
            Some("medium")
        } else if (size - self.large).abs() < f64::EPSILON {
            Some("large")
        } else {
            None
        }
    }
}

/// On-canvas toolbar layout.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolbarConfig {
    /// Buttons in hit-test order; the first match wins
    #[serde(default = "default_buttons")]
    pub buttons: Vec<ButtonConfig>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            buttons: default_buttons(),
        }
    }
}

/// A single toolbar button.
///
/// ```toml
/// [[toolbar.buttons]]
/// label = "red"
/// rect = [10, 10, 110, 60]
/// action = { color = "red" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ButtonConfig {
    /// Text drawn on the button
    pub label: String,
    /// Corners as [x1, y1, x2, y2] in canvas pixels
    pub rect: [i32; 4],
    /// Effect of pressing the button
    pub action: ButtonAction,
    /// Fill color; defaults to the brush color for color buttons, light gray otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorSpec>,
}

/// Overlay appearance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Draw a dot at the tracked fingertip
    #[serde(default = "default_true")]
    pub show_pointer: bool,

    /// Fingertip dot radius in pixels
    #[serde(default = "default_pointer_radius")]
    pub pointer_radius: f64,

    /// Show the "<Color> | Size: <Size>" line in the bottom-left corner
    #[serde(default = "default_true")]
    pub show_info: bool,

    /// Font size for button labels and the info line
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Color for the active-preset outline and the fingertip dot
    #[serde(default = "default_highlight_color")]
    pub highlight_color: ColorSpec,

    /// Active-preset outline thickness in pixels
    #[serde(default = "default_highlight_thickness")]
    pub highlight_thickness: f64,

    /// How far the active-preset outline sits outside the button
    #[serde(default = "default_highlight_padding")]
    pub highlight_padding: i32,

    /// Draw the detected hand skeleton on the camera preview
    #[serde(default = "default_true")]
    pub show_skeleton: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_pointer: true,
            pointer_radius: default_pointer_radius(),
            show_info: true,
            font_size: default_font_size(),
            highlight_color: default_highlight_color(),
            highlight_thickness: default_highlight_thickness(),
            highlight_padding: default_highlight_padding(),
            show_skeleton: true,
        }
    }
}

/// External hand-landmark detector settings.
///
/// The detector is a separate process that owns the camera; see
/// `scripts/hand_bridge.py` for the reference implementation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrackerConfig {
    /// Executable to launch
    #[serde(default = "default_tracker_command")]
    pub command: String,

    /// Arguments placed before the generated camera/threshold flags
    #[serde(default = "default_tracker_args")]
    pub args: Vec<String>,

    /// Camera device index
    #[serde(default)]
    pub camera_index: u32,

    /// Requested capture width in pixels
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,

    /// Requested capture height in pixels
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,

    /// Maximum number of hands to detect; only the first is used for drawing
    #[serde(default = "default_max_hands")]
    pub max_hands: u32,

    /// Minimum detection confidence (0.0 - 1.0); weaker hands are ignored
    #[serde(default = "default_min_detection_confidence")]
    pub min_detection_confidence: f32,

    /// Minimum tracking confidence passed to the detector (0.0 - 1.0)
    #[serde(default = "default_min_tracking_confidence")]
    pub min_tracking_confidence: f32,

    /// Flip frames horizontally so the preview behaves like a mirror
    #[serde(default = "default_true")]
    pub mirror: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            command: default_tracker_command(),
            args: default_tracker_args(),
            camera_index: 0,
            frame_width: default_frame_width(),
            frame_height: default_frame_height(),
            max_hands: default_max_hands(),
            min_detection_confidence: default_min_detection_confidence(),
            min_tracking_confidence: default_min_tracking_confidence(),
            mirror: true,
        }
    }
}

/// Painting export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// Directory paintings are written to (supports `~/`)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// File name without extension; chrono format specifiers are expanded
    /// (e.g. "painting_%Y-%m-%d_%H%M%S")
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// File name offered to browsers by `/download`
    #[serde(default = "default_download_name")]
    pub download_name: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            jpeg_quality: default_jpeg_quality(),
            download_name: default_download_name(),
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// JPEG quality for the MJPEG feeds (valid range: 1 - 100)
    #[serde(default = "default_stream_quality")]
    pub stream_quality: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            stream_quality: default_stream_quality(),
        }
    }
}

/// Loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Delay between processed frames and between streamed frames
    /// (valid range: 5 - 1000 ms)
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl PerformanceConfig {
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms)
    }
}

impl CaptureConfig {
    /// Resolved save directory with `~/` expanded.
    pub fn directory(&self) -> PathBuf {
        crate::capture::expand_tilde(&self.save_directory)
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_canvas_width() -> u32 {
    1000
}

fn default_canvas_height() -> u32 {
    480
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_brush_size() -> String {
    "small".to_string()
}

fn default_size_small() -> f64 {
    5.0
}

fn default_size_medium() -> f64 {
    10.0
}

fn default_size_large() -> f64 {
    20.0
}

fn button(label: &str, x1: i32, action: ButtonAction) -> ButtonConfig {
    ButtonConfig {
        label: label.to_string(),
        rect: [x1, 10, x1 + 100, 60],
        action,
        fill: None,
    }
}

fn default_buttons() -> Vec<ButtonConfig> {
    let color = |name: &str| ButtonAction::Color(ColorSpec::Name(name.to_string()));
    let size = |name: &str| ButtonAction::Size(name.to_string());

    vec![
        button("red", 10, color("red")),
        button("green", 120, color("green")),
        button("blue", 230, color("blue")),
        button("white", 340, color("white")),
        button("eraser", 450, color("eraser")),
        button("small", 560, size("small")),
        button("medium", 670, size("medium")),
        button("large", 780, size("large")),
    ]
}

fn default_pointer_radius() -> f64 {
    8.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_highlight_color() -> ColorSpec {
    ColorSpec::Name("yellow".to_string())
}

fn default_highlight_thickness() -> f64 {
    2.0
}

fn default_highlight_padding() -> i32 {
    3
}

fn default_tracker_command() -> String {
    "python3".to_string()
}

fn default_tracker_args() -> Vec<String> {
    vec!["scripts/hand_bridge.py".to_string()]
}

fn default_frame_width() -> u32 {
    640
}

fn default_frame_height() -> u32 {
    480
}

fn default_max_hands() -> u32 {
    1
}

fn default_min_detection_confidence() -> f32 {
    0.7
}

fn default_min_tracking_confidence() -> f32 {
    0.5
}

fn default_save_directory() -> String {
    ".".to_string()
}

fn default_filename_template() -> String {
    "painting".to_string()
}

fn default_jpeg_quality() -> u8 {
    90
}

fn default_download_name() -> String {
    "my_painting.jpg".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_stream_quality() -> u8 {
    80
}

fn default_frame_interval_ms() -> u64 {
    30
}
