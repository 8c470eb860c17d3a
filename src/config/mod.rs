//! Configuration file support for fingerpaint.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/fingerpaint/config.toml` (or a path given with `--config`).
//! Settings include the canvas size, brush presets, toolbar layout, tracker process,
//! export options and web server address.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ButtonAction, ColorSpec};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{
    BrushConfig, BrushSizes, ButtonConfig, CanvasConfig, CaptureConfig, PerformanceConfig,
    ServerConfig, ToolbarConfig, TrackerConfig, UiConfig,
};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 1000
/// height = 480
///
/// [brush]
/// default_color = "white"
/// default_size = "small"
///
/// [tracker]
/// command = "python3"
/// args = ["scripts/hand_bridge.py"]
/// camera_index = 0
///
/// [server]
/// bind = "0.0.0.0:5000"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas dimensions
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Brush presets and defaults
    #[serde(default)]
    pub brush: BrushConfig,

    /// On-canvas toolbar buttons
    #[serde(default)]
    pub toolbar: ToolbarConfig,

    /// Overlay appearance
    #[serde(default)]
    pub ui: UiConfig,

    /// Hand-tracking process settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Painting export settings
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Loop pacing
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Keyboard shortcuts for desktop windows
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - canvas `width`/`height`: 100 - 4096
    /// - brush sizes: 1.0 - 100.0
    /// - confidences: 0.0 - 1.0
    /// - `jpeg_quality`, `stream_quality`: 1 - 100
    /// - `frame_interval_ms`: 5 - 1000
    pub fn validate_and_clamp(&mut self) {
        if !(100..=4096).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 100-4096 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(100, 4096);
        }
        if !(100..=4096).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 100-4096 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(100, 4096);
        }

        let sizes = &mut self.brush.sizes;
        for (name, size) in [
            ("small", &mut sizes.small),
            ("medium", &mut sizes.medium),
            ("large", &mut sizes.large),
        ] {
            if !(1.0..=100.0).contains(&*size) {
                warn!(
                    "Invalid {} brush size {:.1}, clamping to 1.0-100.0 range",
                    name, size
                );
                *size = size.clamp(1.0, 100.0);
            }
        }

        if self.brush.sizes.get(&self.brush.default_size).is_none() {
            warn!(
                "Invalid default_size '{}', falling back to 'small'",
                self.brush.default_size
            );
            self.brush.default_size = "small".to_string();
        }

        if !self.brush.default_color.is_known() {
            warn!(
                "Unknown default_color {:?}, falling back to 'white'",
                self.brush.default_color
            );
            self.brush.default_color = ColorSpec::Name("white".to_string());
        }

        let canvas_width = self.canvas.width as i32;
        let canvas_height = self.canvas.height as i32;
        self.toolbar.buttons.retain(|button| {
            let [x1, y1, x2, y2] = button.rect;
            let valid = x1 < x2 && y1 < y2 && x1 < canvas_width && y1 < canvas_height;
            if !valid {
                warn!(
                    "Dropping toolbar button '{}' with invalid rect {:?}",
                    button.label, button.rect
                );
            }
            valid
        });

        for (name, value) in [
            (
                "min_detection_confidence",
                &mut self.tracker.min_detection_confidence,
            ),
            (
                "min_tracking_confidence",
                &mut self.tracker.min_tracking_confidence,
            ),
        ] {
            if !(0.0..=1.0).contains(&*value) {
                warn!("Invalid {} {:.2}, clamping to 0.0-1.0", name, value);
                *value = value.clamp(0.0, 1.0);
            }
        }

        if self.tracker.frame_width == 0 || self.tracker.frame_height == 0 {
            warn!(
                "Invalid frame size {}x{}, falling back to 640x480",
                self.tracker.frame_width, self.tracker.frame_height
            );
            self.tracker.frame_width = 640;
            self.tracker.frame_height = 480;
        }

        if self.tracker.max_hands == 0 {
            warn!("max_hands must be at least 1, using 1");
            self.tracker.max_hands = 1;
        }

        for (name, value) in [
            ("jpeg_quality", &mut self.capture.jpeg_quality),
            ("stream_quality", &mut self.server.stream_quality),
        ] {
            if !(1..=100).contains(&*value) {
                warn!("Invalid {} {}, clamping to 1-100 range", name, value);
                *value = (*value).clamp(1, 100);
            }
        }

        if !(5..=1000).contains(&self.performance.frame_interval_ms) {
            warn!(
                "Invalid frame_interval_ms {}, clamping to 5-1000 range",
                self.performance.frame_interval_ms
            );
            self.performance.frame_interval_ms = self.performance.frame_interval_ms.clamp(5, 1000);
        }

        if self.capture.filename_template.trim().is_empty() {
            warn!("Empty filename_template, falling back to 'painting'");
            self.capture.filename_template = "painting".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/fingerpaint/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("fingerpaint");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Surface keybinding mistakes at startup rather than on first key press
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid keybindings in {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses configuration from a TOML string without validation.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
