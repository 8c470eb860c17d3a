//! Paint engine: a worker thread that owns the paint state.
//!
//! Cairo surfaces are not `Send`, so the canvas lives on one thread for its
//! whole life. Other threads (HTTP handlers, tests) talk to it through an
//! [`EngineHandle`]: commands go in over an unbounded channel and rendered
//! JPEG frames come out over `watch` channels.

use crate::capture::{self, CaptureError, SavedPainting};
use crate::config::Config;
use crate::input::PaintState;
use crate::tracking::{HandSource, SharedPointer, TrackedFrame, spawn_source};
use crate::ui;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self as std_mpsc, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// Latest encoded JPEG, shared with every stream subscriber.
pub type JpegFrame = Option<Arc<Vec<u8>>>;

type SaveReply = oneshot::Receiver<Result<SavedPainting, String>>;

/// Requests handled on the engine thread.
#[derive(Debug)]
pub enum EngineCommand {
    /// Switch the brush color by palette name
    SetColor(String),
    /// Switch the brush size by preset name
    SetSize(String),
    /// Wipe the canvas
    Clear,
    /// Save the canvas and report where it went
    Save(oneshot::Sender<Result<SavedPainting, String>>),
    /// Move (or lift, with `None`) the simulated fingertip
    Pointer(Option<(f32, f32)>),
}

/// Errors returned to engine clients.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Paint engine is not running")]
    Stopped,

    #[error("Failed to save painting: {0}")]
    SaveFailed(String),
}

/// Cloneable client side of the engine.
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::UnboundedSender<EngineCommand>,
    camera_rx: watch::Receiver<JpegFrame>,
    canvas_rx: watch::Receiver<JpegFrame>,
    saved_rx: watch::Receiver<Option<PathBuf>>,
}

impl EngineHandle {
    /// Queue a command for the next engine tick.
    pub fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.command_tx
            .send(command)
            .map_err(|_| EngineError::Stopped)
    }

    pub fn set_color(&self, name: &str) -> Result<(), EngineError> {
        self.send(EngineCommand::SetColor(name.to_string()))
    }

    pub fn set_size(&self, name: &str) -> Result<(), EngineError> {
        self.send(EngineCommand::SetSize(name.to_string()))
    }

    pub fn clear(&self) -> Result<(), EngineError> {
        self.send(EngineCommand::Clear)
    }

    pub fn pointer(&self, position: Option<(f32, f32)>) -> Result<(), EngineError> {
        self.send(EngineCommand::Pointer(position))
    }

    /// Save the canvas, waiting for the engine to finish writing it.
    pub async fn save(&self) -> Result<SavedPainting, EngineError> {
        let reply = self.request_save()?;
        reply
            .await
            .map_err(|_| EngineError::Stopped)?
            .map_err(EngineError::SaveFailed)
    }

    /// Blocking variant of [`EngineHandle::save`] for non-async callers.
    pub fn save_blocking(&self) -> Result<SavedPainting, EngineError> {
        let reply = self.request_save()?;
        reply
            .blocking_recv()
            .map_err(|_| EngineError::Stopped)?
            .map_err(EngineError::SaveFailed)
    }

    fn request_save(&self) -> Result<SaveReply, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(EngineCommand::Save(reply_tx))?;
        Ok(reply_rx)
    }

    /// Subscribe to camera frames (with the hand skeleton drawn on).
    pub fn camera_frames(&self) -> watch::Receiver<JpegFrame> {
        self.camera_rx.clone()
    }

    /// Subscribe to canvas frames (painting plus toolbar overlay).
    pub fn canvas_frames(&self) -> watch::Receiver<JpegFrame> {
        self.canvas_rx.clone()
    }

    /// Path of the most recent save, whatever triggered it (HTTP, toolbar
    /// button or key).
    pub fn last_saved(&self) -> watch::Receiver<Option<PathBuf>> {
        self.saved_rx.clone()
    }
}

/// Owner of the engine thread.
pub struct Engine {
    handle: EngineHandle,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Engine {
    /// Start the engine.
    ///
    /// `source` feeds fingertips; without one the engine only serves canvas
    /// commands. `pointer` is the shared fingertip that
    /// [`EngineCommand::Pointer`] moves (simulate mode).
    pub fn start(
        config: Config,
        source: Option<Box<dyn HandSource>>,
        pointer: Option<SharedPointer>,
    ) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (camera_tx, camera_rx) = watch::channel(None);
        let (canvas_tx, canvas_rx) = watch::channel(None);
        let (saved_tx, saved_rx) = watch::channel(None);
        let running = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<()>>();

        let frames = source.map(|source| spawn_source(source).0);
        let running_worker = running.clone();

        let thread = thread::Builder::new()
            .name("paint-engine".to_string())
            .spawn(move || {
                let state = match PaintState::from_config(&config) {
                    Ok(state) => {
                        let _ = ready_tx.send(Ok(()));
                        state
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                let mut worker = Worker {
                    state,
                    config,
                    commands: command_rx,
                    frames,
                    pointer,
                    camera_tx,
                    canvas_tx,
                    saved_tx,
                };
                worker.run(&running_worker);
            })
            .context("Failed to spawn paint engine thread")?;

        ready_rx
            .recv()
            .context("Paint engine exited during startup")??;
        log::info!("Paint engine started");

        Ok(Self {
            handle: EngineHandle {
                command_tx,
                camera_rx,
                canvas_rx,
                saved_rx,
            },
            running,
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for it to exit.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Paint engine thread panicked");
            } else {
                log::info!("Paint engine stopped");
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    state: PaintState,
    config: Config,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    frames: Option<Receiver<TrackedFrame>>,
    pointer: Option<SharedPointer>,
    camera_tx: watch::Sender<JpegFrame>,
    canvas_tx: watch::Sender<JpegFrame>,
    saved_tx: watch::Sender<Option<PathBuf>>,
}

impl Worker {
    fn run(&mut self, running: &AtomicBool) {
        let interval = self.config.performance.frame_interval();
        while running.load(Ordering::SeqCst) {
            let started = Instant::now();

            self.drain_commands();
            let latest = self.drain_frames();
            self.save_if_requested();
            self.publish(latest.as_ref());

            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    fn drain_commands(&mut self) {
        loop {
            match self.commands.try_recv() {
                Ok(command) => self.handle_command(command),
                Err(_) => return,
            }
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        log::debug!("Engine command: {:?}", command);
        match command {
            EngineCommand::SetColor(name) => {
                self.state.set_brush_color(&name);
            }
            EngineCommand::SetSize(name) => {
                self.state.set_brush_size(&name);
            }
            EngineCommand::Clear => {
                if let Err(err) = self.state.clear_canvas() {
                    log::error!("Failed to clear canvas: {}", err);
                }
            }
            EngineCommand::Save(reply) => {
                let result = self.save().map_err(|err| err.to_string());
                let _ = reply.send(result);
            }
            EngineCommand::Pointer(position) => match &self.pointer {
                Some(pointer) => match position {
                    Some((x, y)) => pointer.set(x, y),
                    None => pointer.release(),
                },
                None => log::warn!("Pointer command ignored: engine is not in simulate mode"),
            },
        }
    }

    /// Apply every queued frame in order and return the newest one.
    fn drain_frames(&mut self) -> Option<TrackedFrame> {
        let frames = self.frames.as_ref()?;
        let mut latest = None;
        loop {
            match frames.try_recv() {
                Ok(frame) => {
                    if let Err(err) = self.state.apply_frame(&frame) {
                        log::warn!("Failed to apply tracked frame: {}", err);
                    }
                    latest = Some(frame);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::error!("Hand tracking stopped; canvas commands still work");
                    self.frames = None;
                    self.state.lose_tracking();
                    break;
                }
            }
        }
        latest
    }

    /// Write the canvas and publish the new path before anyone is told.
    fn save(&mut self) -> Result<SavedPainting, CaptureError> {
        match capture::save_painting(&mut self.state.canvas, &self.config.capture) {
            Ok(saved) => {
                self.saved_tx.send_replace(Some(saved.path.clone()));
                Ok(saved)
            }
            Err(err) => {
                log::error!("{}", err);
                Err(err)
            }
        }
    }

    /// Save requested from a toolbar button or key.
    fn save_if_requested(&mut self) {
        if self.state.take_pending_save() {
            let _ = self.save();
        }
    }

    fn publish(&mut self, latest: Option<&TrackedFrame>) {
        let quality = self.config.server.stream_quality;

        if let Some(frame) = latest {
            match encode_camera(frame, self.config.ui.show_skeleton, quality) {
                Ok(Some(jpeg)) => {
                    self.camera_tx.send_replace(Some(Arc::new(jpeg)));
                }
                Ok(None) => {}
                Err(err) => log::warn!("Failed to encode camera frame: {err:#}"),
            }
        }

        match encode_canvas(&self.state, quality) {
            Ok(jpeg) => {
                self.canvas_tx.send_replace(Some(Arc::new(jpeg)));
            }
            Err(err) => log::warn!("Failed to encode canvas frame: {err:#}"),
        }
    }
}

fn encode_camera(
    frame: &TrackedFrame,
    show_skeleton: bool,
    quality: u8,
) -> Result<Option<Vec<u8>>> {
    let Some(mut preview) = ui::render_camera_preview(frame, show_skeleton)? else {
        return Ok(None);
    };
    let image = preview.to_rgb_image()?;
    Ok(Some(capture::encode_jpeg(&image, quality)?))
}

fn encode_canvas(state: &PaintState, quality: u8) -> Result<Vec<u8>> {
    let mut composed = state.render_overlay()?;
    let image = composed.to_rgb_image()?;
    Ok(capture::encode_jpeg(&image, quality)?)
}
