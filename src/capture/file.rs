//! JPEG encoding and file saving for paintings.

use super::types::{CaptureError, SavedPainting};
use crate::config::CaptureConfig;
use crate::draw::Canvas;
use chrono::Local;
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs;
use std::path::{Path, PathBuf};

/// Encode an RGB image as JPEG.
///
/// # Arguments
/// * `image` - Pixels to encode
/// * `quality` - JPEG quality, clamped to 1-100
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::with_capacity(image.as_raw().len() / 8);
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder.encode_image(image)?;
    Ok(buffer)
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "jpg")
///
/// # Returns
/// Generated filename with extension
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating painting directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save JPEG bytes using the configured directory and filename template.
///
/// An existing file with the same name is overwritten, so the default
/// template always refers to the latest painting.
pub fn save_jpeg(jpeg: &[u8], config: &CaptureConfig) -> Result<SavedPainting, CaptureError> {
    let directory = ensure_directory_exists(&config.directory())?;
    let filename = generate_filename(&config.filename_template, "jpg");
    let file_path = directory.join(&filename);

    log::info!(
        "Saving painting to: {} ({} bytes)",
        file_path.display(),
        jpeg.len()
    );

    fs::write(&file_path, jpeg)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(SavedPainting {
        path: file_path,
        bytes: jpeg.len(),
    })
}

/// Encode the canvas (without toolbar or pointer overlay) and save it.
pub fn save_painting(
    canvas: &mut Canvas,
    config: &CaptureConfig,
) -> Result<SavedPainting, CaptureError> {
    let image = canvas.to_rgb_image()?;
    let jpeg = encode_jpeg(&image, config.jpeg_quality)?;
    let saved = save_jpeg(&jpeg, config)?;
    log::info!("Painting saved successfully: {}", saved.path.display());
    Ok(saved)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
