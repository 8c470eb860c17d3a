use crate::draw::CanvasError;
use crate::tracking::TrackedFrame;
use crate::util::{self, Point};

use super::PaintState;

impl PaintState {
    /// Applies one tracked frame to the painting.
    ///
    /// The fingertip is mapped from normalised coordinates to frame pixels and
    /// then stretched onto the canvas. Over a button it fires the button (once
    /// per entry) and breaks the stroke; elsewhere it extends the stroke from
    /// the previous sample. A frame without a fingertip ends the stroke.
    pub fn apply_frame(&mut self, frame: &TrackedFrame) -> Result<(), CanvasError> {
        let Some(tip) = frame.fingertip else {
            self.lose_tracking();
            return Ok(());
        };

        let in_frame = util::normalized_to_frame(tip.x, tip.y, frame.width, frame.height);
        let Some(point) = util::frame_to_canvas(
            in_frame,
            frame.width,
            frame.height,
            self.canvas.width(),
            self.canvas.height(),
        ) else {
            log::debug!(
                "Ignoring fingertip in empty {}x{} frame",
                frame.width,
                frame.height
            );
            self.lose_tracking();
            return Ok(());
        };

        self.apply_fingertip(point)
    }

    /// Runs the toolbar-or-stroke decision for a fingertip in canvas pixels.
    pub fn apply_fingertip(&mut self, point: Point) -> Result<(), CanvasError> {
        self.pointer = Some(point);

        match self.toolbar.hit(point) {
            Some(index) => {
                self.last_point = None;
                if self.hovered_button != Some(index) {
                    self.hovered_button = Some(index);
                    if let Some(button) = self.toolbar.get(index) {
                        log::debug!("Toolbar button '{}' pressed", button.label);
                    }
                    self.press_button(index)?;
                }
            }
            None => {
                self.hovered_button = None;
                if let Some(previous) = self.last_point {
                    self.canvas.draw_segment(
                        previous,
                        point,
                        self.current_color,
                        self.current_size,
                    )?;
                }
                self.last_point = Some(point);
            }
        }
        Ok(())
    }

    /// Forgets the pointer and the stroke; the next sample starts fresh.
    pub fn lose_tracking(&mut self) {
        self.pointer = None;
        self.last_point = None;
        self.hovered_button = None;
    }
}
