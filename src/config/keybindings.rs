//! Keybinding configuration types and parsing.
//!
//! Desktop windows dispatch keyboard input through this table, so every
//! shortcut can be remapped in config.toml.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Exit,

    // Canvas actions
    ClearCanvas,
    SavePainting,

    // Color selections
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorWhite,
    SetColorEraser,

    // Brush size presets
    SetSizeSmall,
    SetSizeMedium,
    SetSizeLarge,
}

impl Action {
    /// Palette name for color actions (as understood by `util::name_to_color`).
    pub fn color_name(self) -> Option<&'static str> {
        match self {
            Action::SetColorRed => Some("red"),
            Action::SetColorGreen => Some("green"),
            Action::SetColorBlue => Some("blue"),
            Action::SetColorWhite => Some("white"),
            Action::SetColorEraser => Some("eraser"),
            _ => None,
        }
    }

    /// Preset name for size actions.
    pub fn size_name(self) -> Option<&'static str> {
        match self {
            Action::SetSizeSmall => Some("small"),
            Action::SetSizeMedium => Some("medium"),
            Action::SetSizeLarge => Some("large"),
            _ => None,
        }
    }
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+S" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    /// Key names are stored lowercase so lookups are case-insensitive.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() {
            "+".to_string()
        } else {
            key.to_lowercase()
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Builds the lookup key for a pressed key.
    pub fn pressed(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            key: key.to_lowercase(),
            ctrl,
            shift,
            alt,
        }
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// exit = ["Escape", "Q"]
/// clear_canvas = ["C"]
/// save_painting = ["S", "Ctrl+S"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_save_painting")]
    pub save_painting: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_eraser")]
    pub set_color_eraser: Vec<String>,

    #[serde(default = "default_set_size_small")]
    pub set_size_small: Vec<String>,

    #[serde(default = "default_set_size_medium")]
    pub set_size_medium: Vec<String>,

    #[serde(default = "default_set_size_large")]
    pub set_size_large: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            clear_canvas: default_clear_canvas(),
            save_painting: default_save_painting(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_white: default_set_color_white(),
            set_color_eraser: default_set_color_eraser(),
            set_size_small: default_set_size_small(),
            set_size_medium: default_set_size_medium(),
            set_size_large: default_set_size_large(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 11] = [
            (&self.exit, Action::Exit),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.save_painting, Action::SavePainting),
            (&self.set_color_red, Action::SetColorRed),
            (&self.set_color_green, Action::SetColorGreen),
            (&self.set_color_blue, Action::SetColorBlue),
            (&self.set_color_white, Action::SetColorWhite),
            (&self.set_color_eraser, Action::SetColorEraser),
            (&self.set_size_small, Action::SetSizeSmall),
            (&self.set_size_medium, Action::SetSizeMedium),
            (&self.set_size_large, Action::SetSizeLarge),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_exit() -> Vec<String> {
    vec!["Escape".to_string(), "Q".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_save_painting() -> Vec<String> {
    vec!["S".to_string()]
}

fn default_set_color_red() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_set_color_green() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_set_color_blue() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_set_color_white() -> Vec<String> {
    vec!["W".to_string()]
}

fn default_set_color_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_set_size_small() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_set_size_medium() -> Vec<String> {
    vec!["2".to_string()]
}

fn default_set_size_large() -> Vec<String> {
    vec!["3".to_string()]
}
