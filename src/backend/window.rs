//! Desktop variant: a `minifb` window showing the canvas, plus an optional
//! camera preview window.

use crate::capture;
use crate::config::Config;
use crate::input::{Key, Modifiers, MouseButton, PaintState};
use crate::tracking::{
    BridgeSource, HandSource, PointerSource, SharedPointer, TrackedFrame, spawn_source,
};
use crate::ui;
use anyhow::{Context, Result};
use minifb::{KeyRepeat, MouseMode, Window, WindowOptions};
use std::sync::mpsc::{Receiver, TryRecvError};

const CANVAS_TITLE: &str = "Fingerpaint";
const PREVIEW_TITLE: &str = "Fingerpaint - Camera";

/// How the desktop window gets its fingertips.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowSettings {
    /// Paint with the mouse instead of the hand tracker
    pub simulate: bool,
    /// Show the camera preview window
    pub preview: bool,
}

/// Run the desktop window until the exit action or the window closes.
pub fn run_window(config: &Config, settings: WindowSettings) -> Result<()> {
    let mut state = PaintState::from_config(config)?;
    let width = state.canvas.width() as usize;
    let height = state.canvas.height() as usize;

    let pointer = settings.simulate.then(SharedPointer::new);
    let source: Box<dyn HandSource> = match &pointer {
        Some(pointer) => Box::new(PointerSource::new(
            pointer.clone(),
            state.canvas.width(),
            state.canvas.height(),
            config.performance.frame_interval(),
        )),
        None => Box::new(BridgeSource::spawn(&config.tracker).context(
            "Failed to start the hand tracker (try --simulate to paint with the mouse)",
        )?),
    };
    let (frames, _source_thread) = spawn_source(source);

    let mut window = Window::new(
        CANVAS_TITLE,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .context("Failed to open canvas window")?;
    let fps = 1000 / config.performance.frame_interval_ms.max(1);
    window.set_target_fps(fps as usize);

    let mut preview: Option<PreviewWindow> = None;
    let mut preview_enabled = settings.preview && !settings.simulate;
    let mut buffer = Vec::with_capacity(width * height);
    let mut mouse_was_down = false;
    let mut tracking = true;

    log::info!(
        "Canvas window open ({}x{}, {})",
        width,
        height,
        if settings.simulate {
            "mouse input"
        } else {
            "hand tracking"
        }
    );

    while window.is_open() && !state.should_exit {
        state.modifiers = read_modifiers(&window);

        for key in window.get_keys_pressed(KeyRepeat::No) {
            if let Err(err) = state.on_key_press(map_key(key)) {
                log::warn!("Key action failed: {}", err);
            }
        }

        let mouse_down = window.get_mouse_down(minifb::MouseButton::Left);
        let mouse_pos = window.get_mouse_pos(MouseMode::Discard);
        match &pointer {
            Some(pointer) => match mouse_pos.filter(|_| mouse_down) {
                Some((x, y)) => pointer.set(x / width as f32, y / height as f32),
                None => pointer.release(),
            },
            None => {
                if mouse_down
                    && !mouse_was_down
                    && let Some((x, y)) = mouse_pos
                    && let Err(err) = state.on_mouse_press(MouseButton::Left, x as i32, y as i32)
                {
                    log::warn!("Toolbar click failed: {}", err);
                }
            }
        }
        mouse_was_down = mouse_down;

        let latest = if tracking {
            let (latest, alive) = drain_frames(&mut state, &frames);
            if !alive {
                log::error!("Hand tracking stopped; keyboard and mouse still work");
                state.lose_tracking();
                tracking = false;
            }
            latest
        } else {
            None
        };

        if state.take_pending_save()
            && let Err(err) = capture::save_painting(&mut state.canvas, &config.capture)
        {
            log::error!("{}", err);
        }

        let mut composed = state.render_overlay()?;
        composed.to_framebuffer(&mut buffer)?;
        window
            .update_with_buffer(&buffer, width, height)
            .context("Failed to update canvas window")?;

        if preview_enabled && let Some(frame) = latest {
            match update_preview(&mut preview, &frame, config.ui.show_skeleton) {
                Ok(true) => {}
                Ok(false) => {
                    log::info!("Camera preview closed");
                    preview = None;
                    preview_enabled = false;
                }
                Err(err) => log::warn!("Camera preview failed: {err:#}"),
            }
        }
    }

    log::info!("Canvas window closed");
    Ok(())
}

/// Apply all queued frames; returns the newest and whether the source is alive.
fn drain_frames(
    state: &mut PaintState,
    frames: &Receiver<TrackedFrame>,
) -> (Option<TrackedFrame>, bool) {
    let mut latest = None;
    loop {
        match frames.try_recv() {
            Ok(frame) => {
                if let Err(err) = state.apply_frame(&frame) {
                    log::warn!("Failed to apply tracked frame: {}", err);
                }
                latest = Some(frame);
            }
            Err(TryRecvError::Empty) => return (latest, true),
            Err(TryRecvError::Disconnected) => return (latest, false),
        }
    }
}

struct PreviewWindow {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

/// Show a camera frame, opening the preview window on first use.
///
/// Returns `Ok(false)` once the user has closed the preview.
fn update_preview(
    preview: &mut Option<PreviewWindow>,
    frame: &TrackedFrame,
    show_skeleton: bool,
) -> Result<bool> {
    let Some(mut image) = ui::render_camera_preview(frame, show_skeleton)? else {
        return Ok(true);
    };
    let (width, height) = (image.width() as usize, image.height() as usize);

    if preview
        .as_ref()
        .is_some_and(|p| p.width != width || p.height != height)
    {
        *preview = None;
    }
    if preview.is_none() {
        let window = Window::new(PREVIEW_TITLE, width, height, WindowOptions::default())
            .context("Failed to open camera preview window")?;
        *preview = Some(PreviewWindow {
            window,
            buffer: Vec::with_capacity(width * height),
            width,
            height,
        });
    }

    let Some(p) = preview.as_mut() else {
        return Ok(true);
    };
    if !p.window.is_open() {
        return Ok(false);
    }
    image.to_framebuffer(&mut p.buffer)?;
    p.window
        .update_with_buffer(&p.buffer, width, height)
        .context("Failed to update camera preview")?;
    Ok(true)
}

fn read_modifiers(window: &Window) -> Modifiers {
    use minifb::Key as K;
    let down = |left, right| window.is_key_down(left) || window.is_key_down(right);
    Modifiers {
        ctrl: down(K::LeftCtrl, K::RightCtrl),
        shift: down(K::LeftShift, K::RightShift),
        alt: down(K::LeftAlt, K::RightAlt),
    }
}

/// Map minifb key codes to generic keys.
fn map_key(key: minifb::Key) -> Key {
    use minifb::Key as K;
    match key {
        K::Escape => Key::Escape,
        K::Enter => Key::Return,
        K::Space => Key::Space,
        K::A => Key::Char('a'),
        K::B => Key::Char('b'),
        K::C => Key::Char('c'),
        K::D => Key::Char('d'),
        K::E => Key::Char('e'),
        K::F => Key::Char('f'),
        K::G => Key::Char('g'),
        K::H => Key::Char('h'),
        K::I => Key::Char('i'),
        K::J => Key::Char('j'),
        K::K => Key::Char('k'),
        K::L => Key::Char('l'),
        K::M => Key::Char('m'),
        K::N => Key::Char('n'),
        K::O => Key::Char('o'),
        K::P => Key::Char('p'),
        K::Q => Key::Char('q'),
        K::R => Key::Char('r'),
        K::S => Key::Char('s'),
        K::T => Key::Char('t'),
        K::U => Key::Char('u'),
        K::V => Key::Char('v'),
        K::W => Key::Char('w'),
        K::X => Key::Char('x'),
        K::Y => Key::Char('y'),
        K::Z => Key::Char('z'),
        K::Key0 | K::NumPad0 => Key::Char('0'),
        K::Key1 | K::NumPad1 => Key::Char('1'),
        K::Key2 | K::NumPad2 => Key::Char('2'),
        K::Key3 | K::NumPad3 => Key::Char('3'),
        K::Key4 | K::NumPad4 => Key::Char('4'),
        K::Key5 | K::NumPad5 => Key::Char('5'),
        K::Key6 | K::NumPad6 => Key::Char('6'),
        K::Key7 | K::NumPad7 => Key::Char('7'),
        K::Key8 | K::NumPad8 => Key::Char('8'),
        K::Key9 | K::NumPad9 => Key::Char('9'),
        _ => Key::Unknown,
    }
}
