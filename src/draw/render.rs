//! Cairo-based rendering primitives.

use super::color::Color;
use crate::util::{Point, Rect};

/// Renders a straight, round-capped brush segment.
///
/// A zero-length segment still paints a dot of diameter `thick`, so the first
/// two samples of a stroke are visible even when the fingertip barely moved.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `from` - Segment start in canvas pixels
/// * `to` - Segment end in canvas pixels
/// * `color` - Brush color
/// * `thick` - Brush diameter in pixels
pub fn render_segment(ctx: &cairo::Context, from: Point, to: Point, color: Color, thick: f64) {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.x as f64, from.y as f64);
    ctx.line_to(to.x as f64, to.y as f64);
    let _ = ctx.stroke();
}

/// Fills a rectangle with a solid color.
pub fn fill_rect(ctx: &cairo::Context, rect: Rect, color: Color) {
    color.apply(ctx);
    ctx.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    let _ = ctx.fill();
}

/// Strokes a rectangle outline.
pub fn stroke_rect(ctx: &cairo::Context, rect: Rect, color: Color, thick: f64) {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    let _ = ctx.stroke();
}

/// Fills a circle centered at `center`.
pub fn fill_circle(ctx: &cairo::Context, center: Point, radius: f64, color: Color) {
    color.apply(ctx);
    ctx.arc(
        center.x as f64,
        center.y as f64,
        radius.max(1.0),
        0.0,
        std::f64::consts::PI * 2.0,
    );
    let _ = ctx.fill();
}

/// UI font family; Pango falls back to whatever "Sans" resolves to.
const UI_FONT_FAMILY: &str = "Sans";

/// Measures the logical width of `text` with the UI font at `size`.
pub fn text_width(ctx: &cairo::Context, text: &str, size: f64) -> f64 {
    let layout = ui_layout(ctx, text, size);
    let (_ink_rect, logical_rect) = layout.extents();
    logical_rect.width() as f64 / pango::SCALE as f64
}

/// Renders a single line of text with its baseline starting at (x, y).
pub fn render_text(ctx: &cairo::Context, x: f64, y: f64, text: &str, color: Color, size: f64) {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = ui_layout(ctx, text, size);
    // Pango positions layouts by their top-left corner
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;

    color.apply(ctx);
    ctx.move_to(x, y - baseline);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

fn ui_layout(ctx: &cairo::Context, text: &str, size: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&format!("{UI_FONT_FAMILY} {size}"));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}
