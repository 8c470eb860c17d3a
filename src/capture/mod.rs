//! Painting export for fingerpaint.
//!
//! This module provides:
//! - JPEG encoding of canvases and camera frames
//! - File saving with configurable directory and filename template

pub mod file;
pub mod types;

pub use file::{encode_jpeg, expand_tilde, save_jpeg, save_painting};
pub use types::{CaptureError, SavedPainting};
