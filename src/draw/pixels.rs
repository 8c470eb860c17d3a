//! Pixel format conversion between Cairo surfaces, `image` buffers and `minifb`.
//!
//! Cairo's `ARgb32` stores each pixel as a native-endian `u32` (0xAARRGGBB).
//! All surfaces created by this crate are opaque, so premultiplication can be
//! ignored when reading them back.

use super::canvas::CanvasError;
use cairo::{Format, ImageSurface};
use image::{Rgb, RgbImage};

fn read_pixel(data: &[u8], offset: usize) -> u32 {
    u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Copies an opaque surface into an RGB image.
pub fn surface_to_rgb(surface: &mut ImageSurface) -> Result<RgbImage, CanvasError> {
    surface.flush();
    let width = surface.width().max(0) as u32;
    let height = surface.height().max(0) as u32;
    let stride = surface.stride().max(0) as usize;
    let data = surface.data()?;

    let mut image = RgbImage::new(width, height);
    for y in 0..height {
        let row = y as usize * stride;
        for x in 0..width {
            let px = read_pixel(&data, row + x as usize * 4);
            image.put_pixel(
                x,
                y,
                Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8]),
            );
        }
    }

    Ok(image)
}

/// Copies an opaque surface into a `0RGB` buffer as expected by `minifb`.
///
/// `out` is resized to `width * height`.
pub fn surface_to_0rgb(surface: &mut ImageSurface, out: &mut Vec<u32>) -> Result<(), CanvasError> {
    surface.flush();
    let width = surface.width().max(0) as usize;
    let height = surface.height().max(0) as usize;
    let stride = surface.stride().max(0) as usize;
    let data = surface.data()?;

    out.resize(width * height, 0);
    for y in 0..height {
        let row = y * stride;
        for x in 0..width {
            out[y * width + x] = read_pixel(&data, row + x * 4) & 0x00FF_FFFF;
        }
    }

    Ok(())
}

/// Creates an opaque `ARgb32` surface holding a copy of `image`.
pub fn rgb_to_surface(image: &RgbImage) -> Result<ImageSurface, CanvasError> {
    let (width, height) = image.dimensions();
    let mut surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32)?;
    let stride = surface.stride().max(0) as usize;

    {
        let mut data = surface.data()?;
        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let px = 0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32;
            let offset = y as usize * stride + x as usize * 4;
            data[offset..offset + 4].copy_from_slice(&px.to_ne_bytes());
        }
    }
    surface.mark_dirty();

    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_survives_a_trip_through_cairo() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(2, 1, Rgb([10, 20, 30]));

        let mut surface = rgb_to_surface(&image).unwrap();
        let back = surface_to_rgb(&mut surface).unwrap();
        assert_eq!(back.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(back.get_pixel(2, 1), &Rgb([10, 20, 30]));
        assert_eq!(back.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn framebuffer_export_drops_alpha() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(1, 0, Rgb([0x12, 0x34, 0x56]));
        let mut surface = rgb_to_surface(&image).unwrap();

        let mut buffer = Vec::new();
        surface_to_0rgb(&mut surface, &mut buffer).unwrap();
        assert_eq!(buffer, vec![0x0000_0000, 0x0012_3456]);
    }
}
