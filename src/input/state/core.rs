//! Paint state: the canvas plus everything the fingertip loop remembers.

use crate::config::{Action, BrushSizes, Config, KeyBinding, UiConfig};
use crate::draw::{Canvas, Color};
use crate::input::{modifiers::Modifiers, toolbar::Toolbar};
use crate::util::Point;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Overlay settings resolved from [`UiConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub show_pointer: bool,
    pub pointer_radius: f64,
    pub show_info: bool,
    pub font_size: f64,
    pub highlight_color: Color,
    pub highlight_thickness: f64,
    pub highlight_padding: i32,
}

impl OverlayStyle {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            show_pointer: ui.show_pointer,
            pointer_radius: ui.pointer_radius,
            show_info: ui.show_info,
            font_size: ui.font_size,
            highlight_color: ui.highlight_color.to_color(),
            highlight_thickness: ui.highlight_thickness,
            highlight_padding: ui.highlight_padding,
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

/// Main paint state.
///
/// Owns the canvas and the brush, remembers the previous fingertip sample
/// for stroke continuity, and collects requests (save, exit) for the
/// backend to act on.
pub struct PaintState {
    /// The painting itself, without any overlay
    pub canvas: Canvas,
    /// Buttons along the top edge
    pub toolbar: Toolbar,
    /// Current brush color
    pub current_color: Color,
    /// Current brush width in pixels
    pub current_size: f64,
    /// Previous fingertip sample in canvas coordinates; `None` starts a new stroke
    pub last_point: Option<Point>,
    /// Where to draw the fingertip pointer (canvas coordinates)
    pub pointer: Option<Point>,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether the user requested to exit
    pub should_exit: bool,
    /// Overlay appearance
    pub style: OverlayStyle,
    /// Button the fingertip is currently over, so a hover fires only once
    pub(super) hovered_button: Option<usize>,
    pub(super) sizes: BrushSizes,
    action_map: HashMap<KeyBinding, Action>,
    pending_save: bool,
}

impl std::fmt::Debug for PaintState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintState")
            .field("canvas", &self.canvas)
            .field("current_color", &self.current_color)
            .field("current_size", &self.current_size)
            .field("last_point", &self.last_point)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

impl PaintState {
    /// Creates a paint state with the given brush and layout.
    pub fn with_defaults(
        canvas: Canvas,
        toolbar: Toolbar,
        color: Color,
        size: f64,
        sizes: BrushSizes,
        style: OverlayStyle,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            canvas,
            toolbar,
            current_color: color,
            current_size: size,
            last_point: None,
            pointer: None,
            modifiers: Modifiers::new(),
            should_exit: false,
            style,
            hovered_button: None,
            sizes,
            action_map,
            pending_save: false,
        }
    }

    /// Builds the initial state from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let canvas = Canvas::new(config.canvas.width, config.canvas.height)
            .context("Failed to create paint canvas")?;
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .context("Invalid keybindings")?;

        let sizes = config.brush.sizes.clone();
        let size = sizes
            .get(&config.brush.default_size)
            .unwrap_or(sizes.small);

        Ok(Self::with_defaults(
            canvas,
            Toolbar::from_config(&config.toolbar),
            config.brush.default_color.to_color(),
            size,
            sizes,
            OverlayStyle::from_config(&config.ui),
            action_map,
        ))
    }

    /// Look up an action for the given key name and the current modifiers.
    pub(super) fn find_action(&self, key: &str) -> Option<Action> {
        let binding = KeyBinding::pressed(
            key,
            self.modifiers.ctrl,
            self.modifiers.shift,
            self.modifiers.alt,
        );
        self.action_map.get(&binding).copied()
    }

    /// Brush size presets in use.
    pub fn sizes(&self) -> &BrushSizes {
        &self.sizes
    }

    /// Takes and clears a pending save request.
    ///
    /// Saving needs the capture settings, so the backend performs it.
    pub fn take_pending_save(&mut self) -> bool {
        std::mem::take(&mut self.pending_save)
    }

    pub(super) fn request_save(&mut self) {
        log::debug!("Save requested");
        self.pending_save = true;
    }
}
