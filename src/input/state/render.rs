use crate::draw::{Canvas, CanvasError};
use crate::ui;

use super::PaintState;

impl PaintState {
    /// Composes the canvas with the toolbar, pointer and info line on top.
    ///
    /// The painting itself is left untouched; the overlay goes onto a
    /// snapshot, which is also what gets streamed or shown in a window.
    pub fn render_overlay(&self) -> Result<Canvas, CanvasError> {
        let composed = self.canvas.snapshot()?;
        {
            let ctx = composed.context()?;
            self.render_ui(&ctx, composed.height());
            ctx.status()?;
        }
        Ok(composed)
    }

    /// Draws the UI layers onto an existing context.
    pub fn render_ui(&self, ctx: &cairo::Context, height: u32) {
        ui::render_toolbar(ctx, self);
        if self.style.show_pointer {
            ui::render_pointer(ctx, self);
        }
        if self.style.show_info {
            ui::render_info(ctx, self, height);
        }
    }
}
