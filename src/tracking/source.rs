//! Frame sources: the producer side of the tracking loop.

use super::landmarks::{HandLandmarks, Landmark};
use image::RgbImage;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Errors raised by hand sources.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Failed to start hand tracker '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Hand tracker did not signal ready, got: {0:?}")]
    NotReady(String),

    #[error("Hand tracker disconnected")]
    Disconnected,

    #[error("Hand tracker I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tracker packet: {0}")]
    Protocol(String),

    #[error("Failed to decode camera frame: {0}")]
    Image(#[from] image::ImageError),
}

/// One processed camera frame.
#[derive(Debug, Clone)]
pub struct TrackedFrame {
    /// Frame width in pixels; fingertip coordinates are normalized to this
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Mirrored camera image, when the source has one
    pub image: Option<RgbImage>,
    /// Best detected hand, if any
    pub hand: Option<HandLandmarks>,
    /// Point the brush follows; `None` means tracking was lost
    pub fingertip: Option<Landmark>,
}

impl TrackedFrame {
    /// Frame from a detector result: the fingertip is the hand's index tip.
    pub fn from_hand(
        width: u32,
        height: u32,
        image: Option<RgbImage>,
        hand: Option<HandLandmarks>,
    ) -> Self {
        let fingertip = hand.as_ref().map(HandLandmarks::index_finger_tip);
        Self {
            width,
            height,
            image,
            hand,
            fingertip,
        }
    }

    /// Frame without a camera image or skeleton, used for pointer input.
    pub fn pointer(width: u32, height: u32, fingertip: Option<Landmark>) -> Self {
        Self {
            width,
            height,
            image: None,
            hand: None,
            fingertip,
        }
    }
}

/// Anything that can deliver tracked frames.
///
/// `Ok(None)` means there is nothing new this tick and the caller should
/// skip the frame; errors other than [`TrackingError::Disconnected`] are
/// transient.
pub trait HandSource: Send {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, TrackingError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

impl<S: HandSource + ?Sized> HandSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, TrackingError> {
        (**self).next_frame()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Consecutive failed reads after which a source counts as disconnected.
pub const MAX_CONSECUTIVE_ERRORS: usize = 30;

/// Spawn a source on its own thread and return the receiving end.
///
/// The thread exits when the source disconnects, when it fails
/// [`MAX_CONSECUTIVE_ERRORS`] times in a row, or when the receiver is
/// dropped. Other errors are logged and the frame is skipped.
pub fn spawn_source<S: HandSource + 'static>(
    mut source: S,
) -> (Receiver<TrackedFrame>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        log::info!("Frame source '{}' started", source.name());
        let mut failures = 0;
        loop {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    failures = 0;
                    if tx.send(frame).is_err() {
                        log::debug!("Frame receiver dropped, stopping '{}'", source.name());
                        return;
                    }
                }
                Ok(None) => continue,
                Err(TrackingError::Disconnected) => {
                    log::error!("Frame source '{}' disconnected", source.name());
                    return;
                }
                Err(err) => {
                    failures += 1;
                    if failures >= MAX_CONSECUTIVE_ERRORS {
                        log::error!(
                            "Frame source '{}' failed {} times in a row, giving up: {}",
                            source.name(),
                            failures,
                            err
                        );
                        return;
                    }
                    log::warn!("Skipping frame from '{}': {}", source.name(), err);
                }
            }
        }
    });
    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Result<Option<TrackedFrame>, TrackingError>>);

    impl HandSource for Scripted {
        fn next_frame(&mut self) -> Result<Option<TrackedFrame>, TrackingError> {
            self.0.pop_front().unwrap_or(Err(TrackingError::Disconnected))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn spawned_source_skips_transient_errors_and_stops_on_disconnect() {
        let tip = Landmark::new(0.5, 0.5, 0.0);
        let script = Scripted(VecDeque::from(vec![
            Ok(Some(TrackedFrame::pointer(10, 10, Some(tip)))),
            Ok(None),
            Err(TrackingError::Protocol("garbled".into())),
            Ok(Some(TrackedFrame::pointer(10, 10, None))),
        ]));

        let (rx, handle) = spawn_source(script);
        let frames: Vec<_> = rx.iter().collect();
        handle.join().unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].fingertip, Some(tip));
        assert_eq!(frames[1].fingertip, None);
    }

    struct Garbled;

    impl HandSource for Garbled {
        fn next_frame(&mut self) -> Result<Option<TrackedFrame>, TrackingError> {
            Err(TrackingError::Protocol("garbled".into()))
        }

        fn name(&self) -> &str {
            "garbled"
        }
    }

    #[test]
    fn spawned_source_gives_up_after_repeated_errors() {
        let (rx, handle) = spawn_source(Garbled);
        assert_eq!(rx.iter().count(), 0);
        handle.join().unwrap();
    }
}
