//! On-canvas toolbar buttons and hit testing.

use crate::config::{ButtonAction, ToolbarConfig};
use crate::draw::{Color, GRAY};
use crate::util::{Point, Rect};

/// A resolved toolbar button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub action: ButtonAction,
    pub fill: Color,
}

impl Button {
    /// Builds a button from `[x1, y1, x2, y2]` corners.
    ///
    /// Returns `None` for rectangles without area.
    pub fn new(
        label: &str,
        corners: [i32; 4],
        action: ButtonAction,
        fill: Option<Color>,
    ) -> Option<Self> {
        let [x1, y1, x2, y2] = corners;
        let rect = Rect::from_min_max(x1, y1, x2, y2)?;
        let fill = fill.unwrap_or_else(|| default_fill(&action));
        Some(Self {
            label: label.to_string(),
            rect,
            action,
            fill,
        })
    }
}

/// Color buttons show their own color; everything else is light gray.
fn default_fill(action: &ButtonAction) -> Color {
    match action {
        ButtonAction::Color(spec) => spec.to_color(),
        _ => GRAY,
    }
}

/// Ordered set of buttons drawn along the top of the canvas.
#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    buttons: Vec<Button>,
}

impl Toolbar {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }

    /// Resolves the configured layout, skipping buttons with empty rectangles.
    pub fn from_config(config: &ToolbarConfig) -> Self {
        let buttons = config
            .buttons
            .iter()
            .filter_map(|cfg| {
                let button = Button::new(
                    &cfg.label,
                    cfg.rect,
                    cfg.action.clone(),
                    cfg.fill.as_ref().map(|spec| spec.to_color()),
                );
                if button.is_none() {
                    log::warn!(
                        "Skipping toolbar button '{}' with empty rect {:?}",
                        cfg.label,
                        cfg.rect
                    );
                }
                button
            })
            .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn get(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    /// Index of the first button strictly containing `point`.
    pub fn hit(&self, point: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(point))
    }
}
