//! Web variant: the paint engine behind a small HTTP API.
//!
//! The browser page shows two MJPEG feeds (camera and canvas) and drives the
//! brush through JSON POSTs. Handlers never touch the canvas; they queue
//! commands on the [`EngineHandle`].

pub mod routes;
pub mod stream;

use crate::backend::{Engine, EngineHandle};
use crate::config::Config;
use crate::tracking::{BridgeSource, HandSource, PointerSource, SharedPointer};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    /// Flips to true on shutdown so open streams end
    pub closing: watch::Receiver<bool>,
    pub frame_interval: Duration,
    /// Path of the last successful save from any trigger, served by `/download`
    pub last_saved: watch::Receiver<Option<PathBuf>>,
    pub download_name: Arc<str>,
    /// Whether `/pointer` may move the simulated fingertip
    pub simulate: bool,
}

impl AppState {
    pub fn new(
        engine: EngineHandle,
        config: &Config,
        simulate: bool,
        closing: watch::Receiver<bool>,
    ) -> Self {
        Self {
            last_saved: engine.last_saved(),
            engine,
            closing,
            frame_interval: config.performance.frame_interval(),
            download_name: Arc::from(config.capture.download_name.as_str()),
            simulate,
        }
    }
}

/// Command-line overrides for `serve`.
#[derive(Debug, Clone, Default)]
pub struct ServeSettings {
    /// Address to listen on (overrides `[server] bind`)
    pub bind: Option<String>,
    /// Use the `/pointer` endpoint instead of the hand tracker
    pub simulate: bool,
}

/// Build the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/video_feed", get(routes::video_feed))
        .route("/canvas_feed", get(routes::canvas_feed))
        .route("/set_color", post(routes::set_color))
        .route("/set_size", post(routes::set_size))
        .route("/clear", post(routes::clear))
        .route("/save", post(routes::save))
        .route("/download", get(routes::download))
        .route("/pointer", post(routes::pointer))
        .with_state(state)
}

/// Start the engine and serve HTTP until Ctrl+C.
pub async fn serve(config: Config, settings: ServeSettings) -> Result<()> {
    let bind = settings
        .bind
        .clone()
        .unwrap_or_else(|| config.server.bind.clone());

    let (source, pointer) = start_source(&config, settings.simulate).await;
    let mut engine = Engine::start(config.clone(), source, pointer)?;

    let (closing_tx, closing_rx) = watch::channel(false);
    let app = router(AppState::new(
        engine.handle(),
        &config,
        settings.simulate,
        closing_rx,
    ));

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl+C: {}", err);
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
            closing_tx.send_replace(true);
        })
        .await
        .context("HTTP server failed")?;

    tokio::task::spawn_blocking(move || engine.shutdown())
        .await
        .context("Engine shutdown task failed")?;
    Ok(())
}

/// Pick the fingertip source. A tracker that fails to start is logged and
/// the server keeps running with canvas commands only.
async fn start_source(
    config: &Config,
    simulate: bool,
) -> (Option<Box<dyn HandSource>>, Option<SharedPointer>) {
    if simulate {
        let pointer = SharedPointer::new();
        let source = PointerSource::new(
            pointer.clone(),
            config.canvas.width,
            config.canvas.height,
            config.performance.frame_interval(),
        );
        return (Some(Box::new(source)), Some(pointer));
    }

    let tracker = config.tracker.clone();
    match tokio::task::spawn_blocking(move || BridgeSource::spawn(&tracker)).await {
        Ok(Ok(source)) => (Some(Box::new(source)), None),
        Ok(Err(err)) => {
            log::error!("Hand tracking unavailable: {}", err);
            (None, None)
        }
        Err(err) => {
            log::error!("Hand tracker startup task failed: {}", err);
            (None, None)
        }
    }
}
