//! Configuration enum types.

use crate::draw::{Color, WHITE};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, white, yellow, eraser (black)
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to white with a warning, the same
    /// fallback used when a client asks for a color the palette lacks.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using white", name);
                WHITE
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    /// Returns true when this spec resolves to a known color.
    pub fn is_known(&self) -> bool {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

/// What a toolbar button does when the fingertip (or mouse) enters it.
///
/// ```toml
/// action = { color = "red" }
/// action = { size = "large" }
/// action = "clear"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Switch the brush color
    Color(ColorSpec),
    /// Switch the brush size to a named preset (small, medium, large)
    Size(String),
    /// Wipe the canvas
    Clear,
    /// Save the canvas as a JPEG
    Save,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED};

    #[test]
    fn color_spec_resolves_names_and_rgb() {
        assert_eq!(ColorSpec::Name("red".into()).to_color(), RED);
        assert_eq!(ColorSpec::Name("eraser".into()).to_color(), BLACK);
        assert_eq!(ColorSpec::Name("mauve".into()).to_color(), WHITE);
        assert!(!ColorSpec::Name("mauve".into()).is_known());
        assert_eq!(
            ColorSpec::Rgb([255, 0, 0]).to_color().to_rgb8(),
            [255, 0, 0]
        );
    }

    #[test]
    fn button_actions_parse_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: ButtonAction,
            b: ButtonAction,
            c: ButtonAction,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            a = { color = "blue" }
            b = { size = "large" }
            c = "clear"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.a, ButtonAction::Color(ColorSpec::Name("blue".into())));
        assert_eq!(parsed.b, ButtonAction::Size("large".into()));
        assert_eq!(parsed.c, ButtonAction::Clear);
    }
}
