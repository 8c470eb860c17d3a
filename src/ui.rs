/// UI rendering: toolbar, fingertip pointer, info line, hand skeleton
use crate::config::ButtonAction;
use crate::draw::{
    BLACK, Canvas, CanvasError, Color, GREEN, RED, WHITE, fill_circle, fill_rect,
    render_segment, render_text, stroke_rect, text_width,
};
use crate::input::{Button, PaintState};
use crate::tracking::{HAND_CONNECTIONS, HandLandmarks, TrackedFrame};
use crate::util::{self, Point};

// ============================================================================
// UI Layout Constants (not configurable)
// ============================================================================

/// Distance from the bottom edge of a button to the label baseline
const LABEL_BASELINE_INSET: i32 = 15;
/// Info line X position
const INFO_OFFSET_X: f64 = 10.0;
/// Info line baseline distance from the bottom of the canvas
const INFO_OFFSET_Y: f64 = 10.0;
/// Labels on fills darker than this are drawn white
const DARK_FILL_LUMINANCE: f64 = 0.5;

/// Skeleton bone width on the camera preview
const SKELETON_LINE_WIDTH: f64 = 2.0;
/// Skeleton joint radius on the camera preview
const SKELETON_JOINT_RADIUS: f64 = 3.0;

/// Render every toolbar button, outlining the ones matching the current brush
pub fn render_toolbar(ctx: &cairo::Context, state: &PaintState) {
    for button in state.toolbar.buttons() {
        fill_rect(ctx, button.rect, button.fill);

        if button_is_active(state, button) {
            stroke_rect(
                ctx,
                button.rect.inflate(state.style.highlight_padding),
                state.style.highlight_color,
                state.style.highlight_thickness,
            );
        }

        let label_color = label_color(button.fill);
        let width = text_width(ctx, &button.label, state.style.font_size);
        let x = button.rect.x as f64 + ((button.rect.width as f64 - width) / 2.0).floor();
        let y = (button.rect.max_y() - LABEL_BASELINE_INSET) as f64;
        render_text(ctx, x, y, &button.label, label_color, state.style.font_size);
    }
}

/// Label text color for a button fill: white on dark fills, black otherwise
pub fn label_color(fill: Color) -> Color {
    if fill.luminance() < DARK_FILL_LUMINANCE {
        WHITE
    } else {
        BLACK
    }
}

/// Whether a button reflects the current brush (color or size preset).
fn button_is_active(state: &PaintState, button: &Button) -> bool {
    match &button.action {
        ButtonAction::Color(spec) => {
            spec.is_known() && spec.to_color().same_rgb8(state.current_color)
        }
        ButtonAction::Size(name) => state
            .sizes()
            .get(name)
            .is_some_and(|size| (size - state.current_size).abs() < f64::EPSILON),
        ButtonAction::Clear | ButtonAction::Save => false,
    }
}

/// Render the fingertip dot
pub fn render_pointer(ctx: &cairo::Context, state: &PaintState) {
    if let Some(point) = state.pointer {
        fill_circle(
            ctx,
            point,
            state.style.pointer_radius,
            state.style.highlight_color,
        );
    }
}

/// Text of the info line, e.g. "White | Size: Small"
pub fn info_line(state: &PaintState) -> String {
    let color_name = util::color_to_name(&state.current_color);
    let size_name = state
        .sizes()
        .name_of(state.current_size)
        .map(util::display_name)
        .unwrap_or_else(|| "Unknown".to_string());
    format!("{} | Size: {}", color_name, size_name)
}

/// Render the info line in the bottom-left corner
pub fn render_info(ctx: &cairo::Context, state: &PaintState, canvas_height: u32) {
    render_text(
        ctx,
        INFO_OFFSET_X,
        canvas_height as f64 - INFO_OFFSET_Y,
        &info_line(state),
        WHITE,
        state.style.font_size,
    );
}

/// Render the hand skeleton over a camera frame of the given size
pub fn render_hand_skeleton(
    ctx: &cairo::Context,
    hand: &HandLandmarks,
    width: u32,
    height: u32,
) {
    let pixels = hand.to_pixels(width, height);
    let point = |i: usize| Point::new(pixels[i].0 as i32, pixels[i].1 as i32);

    for (a, b) in HAND_CONNECTIONS {
        render_segment(ctx, point(a), point(b), GREEN, SKELETON_LINE_WIDTH);
    }
    for &(x, y) in &pixels {
        fill_circle(ctx, Point::new(x as i32, y as i32), SKELETON_JOINT_RADIUS, RED);
    }
}

/// Compose the camera preview: the frame image plus the skeleton, if any.
///
/// Returns `Ok(None)` when the frame carries no image.
pub fn render_camera_preview(
    frame: &TrackedFrame,
    show_skeleton: bool,
) -> Result<Option<Canvas>, CanvasError> {
    let Some(image) = &frame.image else {
        return Ok(None);
    };
    let preview = Canvas::from_rgb(image)?;

    if show_skeleton && let Some(hand) = &frame.hand {
        let ctx = preview.context()?;
        render_hand_skeleton(&ctx, hand, preview.width(), preview.height());
        ctx.status()?;
    }

    Ok(Some(preview))
}
