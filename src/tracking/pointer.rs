//! Simulated fingertip driven by a mouse or an HTTP client.

use super::landmarks::Landmark;
use super::source::{HandSource, TrackedFrame, TrackingError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Fingertip position shared between the input side and a [`PointerSource`].
///
/// Coordinates are normalised (0.0 - 1.0); `None` means no finger.
#[derive(Clone, Debug, Default)]
pub struct SharedPointer {
    inner: Arc<Mutex<Option<Landmark>>>,
}

impl SharedPointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the fingertip, clamping to the frame.
    pub fn set(&self, x: f32, y: f32) {
        let landmark = Landmark::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0), 0.0);
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(landmark);
    }

    /// Lift the finger (tracking lost).
    pub fn release(&self) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<Landmark> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hand source that reports the shared pointer once per frame interval.
pub struct PointerSource {
    pointer: SharedPointer,
    width: u32,
    height: u32,
    interval: Duration,
}

impl PointerSource {
    /// `width`/`height` is the virtual frame the pointer is normalised to.
    pub fn new(pointer: SharedPointer, width: u32, height: u32, interval: Duration) -> Self {
        Self {
            pointer,
            width,
            height,
            interval,
        }
    }
}

impl HandSource for PointerSource {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, TrackingError> {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        Ok(Some(TrackedFrame::pointer(
            self.width,
            self.height,
            self.pointer.get(),
        )))
    }

    fn name(&self) -> &str {
        "pointer"
    }
}
