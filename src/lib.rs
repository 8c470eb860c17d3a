//! Library exports for fingerpaint.
//!
//! The binary is a thin CLI over these modules; integration tests and the
//! schema dumper use them directly.

pub mod backend;
pub mod capture;
pub mod config;
pub mod draw;
pub mod input;
pub mod server;
pub mod tracking;
pub mod ui;
pub mod util;

pub use config::Config;
