use crate::config::{Action, ButtonAction};
use crate::draw::{CanvasError, Color, WHITE};
use crate::input::events::Key;
use crate::util;

use super::PaintState;

impl PaintState {
    /// Switches the brush to a palette color by name.
    ///
    /// Unknown names fall back to white. The current stroke is broken so the
    /// new color never connects to a segment painted with the old one.
    ///
    /// # Returns
    /// The color now in use
    pub fn set_brush_color(&mut self, name: &str) -> Color {
        let color = util::name_to_color(name).unwrap_or_else(|| {
            log::warn!("Unknown color '{}', using white", name);
            WHITE
        });
        self.set_color(color);
        color
    }

    /// Switches the brush to an arbitrary color.
    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.last_point = None;
        log::debug!("Brush color set to {}", util::color_to_name(&color));
    }

    /// Switches the brush width to a named preset; unknown names mean "small".
    ///
    /// # Returns
    /// The width now in use
    pub fn set_brush_size(&mut self, name: &str) -> f64 {
        let size = self.sizes.get(name).unwrap_or_else(|| {
            log::warn!("Unknown brush size '{}', using small", name);
            self.sizes.small
        });
        self.current_size = size;
        log::debug!("Brush size set to {}px", size);
        size
    }

    /// Wipes the canvas back to black and ends the current stroke.
    pub fn clear_canvas(&mut self) -> Result<(), CanvasError> {
        self.canvas.clear()?;
        self.last_point = None;
        log::info!("Canvas cleared");
        Ok(())
    }

    /// Processes a key press through the keybinding table.
    pub fn on_key_press(&mut self, key: Key) -> Result<(), CanvasError> {
        let Some(name) = key.binding_name() else {
            return Ok(());
        };
        match self.find_action(&name) {
            Some(action) => self.handle_action(action),
            None => Ok(()),
        }
    }

    /// Executes a bound action.
    pub fn handle_action(&mut self, action: Action) -> Result<(), CanvasError> {
        if let Some(color) = action.color_name() {
            self.set_brush_color(color);
            return Ok(());
        }
        if let Some(size) = action.size_name() {
            self.set_brush_size(size);
            return Ok(());
        }

        match action {
            Action::Exit => {
                log::info!("Exit requested");
                self.should_exit = true;
            }
            Action::ClearCanvas => self.clear_canvas()?,
            Action::SavePainting => self.request_save(),
            _ => {}
        }
        Ok(())
    }

    /// Fires the toolbar button at `index`.
    pub fn press_button(&mut self, index: usize) -> Result<(), CanvasError> {
        let Some(action) = self.toolbar.get(index).map(|b| b.action.clone()) else {
            return Ok(());
        };

        match action {
            ButtonAction::Color(spec) => self.set_color(spec.to_color()),
            ButtonAction::Size(name) => {
                self.set_brush_size(&name);
            }
            ButtonAction::Clear => self.clear_canvas()?,
            ButtonAction::Save => self.request_save(),
        }
        Ok(())
    }
}
