use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fingerpaint::Config;
use fingerpaint::backend::{self, WindowSettings};
use fingerpaint::server::{self, ServeSettings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fingerpaint")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINGERPAINT_GIT_HASH"), ")"),
    about = "Paint in the air with your index finger, on the desktop or in the browser"
)]
struct Cli {
    /// Config file to use instead of ~/.config/fingerpaint/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the desktop canvas window
    Window(WindowArgs),
    /// Serve the canvas and camera feeds over HTTP
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    PrintConfig,
}

#[derive(Args, Debug)]
struct WindowArgs {
    /// Paint with the mouse (hold the left button) instead of the hand tracker
    #[arg(long)]
    simulate: bool,

    /// Camera device index passed to the hand tracker
    #[arg(long, value_name = "N")]
    camera: Option<u32>,

    /// Do not open the camera preview window
    #[arg(long)]
    no_preview: bool,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Accept fingertip positions on POST /pointer instead of running the tracker
    #[arg(long)]
    simulate: bool,

    /// Camera device index passed to the hand tracker
    #[arg(long, value_name = "N")]
    camera: Option<u32>,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Window(args) => {
            if let Some(camera) = args.camera {
                config.tracker.camera_index = camera;
            }
            log::info!("Starting desktop canvas...");
            log::info!("Controls:");
            log::info!("  - Point with your index finger to paint; hover a button to select it");
            log::info!("  - Colors: R (red), G (green), B (blue), W (white), E (eraser)");
            log::info!("  - Sizes: 1 (small), 2 (medium), 3 (large)");
            log::info!("  - Clear: C   Save: S   Exit: Escape or Q");

            backend::run_desktop(
                &config,
                WindowSettings {
                    simulate: args.simulate,
                    preview: !args.no_preview,
                },
            )?;
        }
        Command::Serve(args) => {
            if let Some(camera) = args.camera {
                config.tracker.camera_index = camera;
            }
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(
                config,
                ServeSettings {
                    bind: args.bind,
                    simulate: args.simulate,
                },
            ))?;
        }
        Command::PrintConfig => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
