use crate::draw::CanvasError;
use crate::input::events::MouseButton;
use crate::util::Point;

use super::PaintState;

impl PaintState {
    /// Processes a mouse button press in canvas coordinates.
    ///
    /// A left click on a toolbar button fires it. Clicks elsewhere do nothing;
    /// painting with the mouse goes through the simulated fingertip instead.
    ///
    /// # Returns
    /// `true` if a button fired
    pub fn on_mouse_press(
        &mut self,
        button: MouseButton,
        x: i32,
        y: i32,
    ) -> Result<bool, CanvasError> {
        if button != MouseButton::Left {
            return Ok(false);
        }
        match self.toolbar.hit(Point::new(x, y)) {
            Some(index) => {
                self.press_button(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
