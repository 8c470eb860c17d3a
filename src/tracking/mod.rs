//! Hand tracking: landmark types and the sources that produce them.
//!
//! A [`HandSource`] yields [`TrackedFrame`]s. The real source is an external
//! detector process ([`BridgeSource`]); [`PointerSource`] stands in for it
//! when painting with the mouse or from a browser.

pub mod bridge;
pub mod landmarks;
pub mod pointer;
pub mod source;

pub use bridge::BridgeSource;
pub use landmarks::{HAND_CONNECTIONS, HandLandmarks, LANDMARK_COUNT, Landmark};
pub use pointer::{PointerSource, SharedPointer};
pub use source::{HandSource, TrackedFrame, TrackingError, spawn_source};
