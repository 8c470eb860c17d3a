mod actions;
mod core;
mod mouse;
mod render;
#[cfg(test)]
mod tests;
mod tracking;

pub use core::{OverlayStyle, PaintState};
