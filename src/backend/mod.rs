use anyhow::Result;

use crate::config::Config;

pub mod engine;
pub mod window;

pub use engine::{Engine, EngineCommand, EngineError, EngineHandle, JpegFrame};
pub use window::WindowSettings;

/// Run the desktop window with its own event loop
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `settings` - Input source and preview options from the command line
pub fn run_desktop(config: &Config, settings: WindowSettings) -> Result<()> {
    window::run_window(config, settings)
}
