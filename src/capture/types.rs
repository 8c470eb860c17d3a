//! Data types for painting export.

use crate::draw::CanvasError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting a painting.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to save painting: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Canvas unavailable: {0}")]
    Canvas(#[from] CanvasError),
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPainting {
    /// Where the JPEG was written.
    pub path: PathBuf,
    /// Encoded size in bytes.
    pub bytes: usize,
}
