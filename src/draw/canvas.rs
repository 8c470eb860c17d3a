//! Raster paint canvas backed by a Cairo image surface.

use super::color::{BLACK, Color};
use super::pixels;
use super::render;
use crate::util::Point;
use cairo::{Context, Format, ImageSurface};
use image::RgbImage;
use thiserror::Error;

/// Errors raised while creating or reading a canvas surface.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid canvas size {0}x{1}")]
    InvalidSize(u32, u32),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Canvas surface is still borrowed: {0}")]
    Borrowed(#[from] cairo::BorrowError),
}

/// The painted image: an opaque raster that strokes accumulate on.
///
/// The canvas starts out black. Black is also the eraser color, so erasing
/// is just painting with the background.
pub struct Canvas {
    surface: ImageSurface,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Canvas {
    /// Creates a black canvas of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(CanvasError::InvalidSize(width, height));
        }

        let surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32)?;
        let mut canvas = Self {
            surface,
            width,
            height,
        };
        canvas.clear()?;
        Ok(canvas)
    }

    /// Wraps an RGB image (e.g. a camera frame) so it can be drawn on.
    pub fn from_rgb(image: &RgbImage) -> Result<Self, CanvasError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSize(width, height));
        }
        Ok(Self {
            surface: pixels::rgb_to_surface(image)?,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Creates a drawing context for this canvas.
    ///
    /// The context must be dropped before pixels are read back.
    pub fn context(&self) -> Result<Context, CanvasError> {
        Ok(Context::new(&self.surface)?)
    }

    /// Resets every pixel to black.
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        BLACK.apply(&ctx);
        ctx.set_operator(cairo::Operator::Source);
        ctx.paint()?;
        Ok(())
    }

    /// Paints a straight segment with the given brush.
    pub fn draw_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        size: f64,
    ) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        render::render_segment(&ctx, from, to, color, size);
        ctx.status()?;
        Ok(())
    }

    /// Returns an independent copy, used to compose overlays without
    /// touching the painting itself.
    pub fn snapshot(&self) -> Result<Canvas, CanvasError> {
        let copy = ImageSurface::create(Format::ARgb32, self.width as i32, self.height as i32)?;
        {
            let ctx = Context::new(&copy)?;
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.set_operator(cairo::Operator::Source);
            ctx.paint()?;
        }
        Ok(Canvas {
            surface: copy,
            width: self.width,
            height: self.height,
        })
    }

    /// Reads the canvas back as an RGB image.
    pub fn to_rgb_image(&mut self) -> Result<RgbImage, CanvasError> {
        pixels::surface_to_rgb(&mut self.surface)
    }

    /// Writes the canvas into a `0RGB` framebuffer for `minifb`.
    pub fn to_framebuffer(&mut self, out: &mut Vec<u32>) -> Result<(), CanvasError> {
        pixels::surface_to_0rgb(&mut self.surface, out)
    }

    /// Reads a single pixel, or `None` outside the canvas.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride().max(0) as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let px = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        Some([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, WHITE};

    #[test]
    fn new_canvas_is_black() {
        let mut canvas = Canvas::new(20, 10).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(19, 9), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(20, 0), None);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(CanvasError::InvalidSize(0, 10))
        ));
    }

    #[test]
    fn segment_paints_along_its_path_and_clear_resets() {
        let mut canvas = Canvas::new(100, 50).unwrap();
        canvas
            .draw_segment(Point::new(10, 25), Point::new(90, 25), RED, 6.0)
            .unwrap();
        assert_eq!(canvas.pixel(50, 25), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(50, 5), Some([0, 0, 0]));

        canvas.clear().unwrap();
        assert_eq!(canvas.pixel(50, 25), Some([0, 0, 0]));
    }

    #[test]
    fn snapshot_is_independent_of_the_original() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        let mut snap = canvas.snapshot().unwrap();
        {
            let ctx = snap.context().unwrap();
            render::fill_rect(
                &ctx,
                crate::util::Rect::new(0, 0, 40, 40).unwrap(),
                WHITE,
            );
        }
        assert_eq!(snap.pixel(20, 20), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(20, 20), Some([0, 0, 0]));
    }
}
