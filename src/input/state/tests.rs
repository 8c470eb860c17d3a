use super::*;
use crate::config::{ButtonAction, ButtonConfig, Config, ToolbarConfig};
use crate::draw::{BLACK, BLUE, RED, WHITE};
use crate::input::{Key, MouseButton, Toolbar};
use crate::tracking::{Landmark, TrackedFrame};
use crate::util::Point;

const CANVAS_W: u32 = 1000;
const CANVAS_H: u32 = 480;

fn create_test_paint_state() -> PaintState {
    PaintState::from_config(&Config::default()).unwrap()
}

/// A frame the same size as the canvas whose fingertip lands on `(x, y)`.
fn frame_at(x: i32, y: i32) -> TrackedFrame {
    let tip = Landmark::new(
        (x as f32 + 0.5) / CANVAS_W as f32,
        (y as f32 + 0.5) / CANVAS_H as f32,
        0.0,
    );
    TrackedFrame::pointer(CANVAS_W, CANVAS_H, Some(tip))
}

fn lost() -> TrackedFrame {
    TrackedFrame::pointer(CANVAS_W, CANVAS_H, None)
}

#[test]
fn test_defaults() {
    let state = create_test_paint_state();
    assert_eq!(state.current_color, WHITE);
    assert_eq!(state.current_size, 5.0);
    assert!(state.last_point.is_none());
    assert!(state.pointer.is_none());
    assert_eq!(crate::ui::info_line(&state), "White | Size: Small");
}

#[test]
fn test_fingertip_maps_frame_to_canvas() {
    let mut state = create_test_paint_state();
    let frame = TrackedFrame::pointer(640, 480, Some(Landmark::new(0.5, 0.5, 0.0)));

    state.apply_frame(&frame).unwrap();

    // 0.5 * 640 = 320 -> 320 * 1000 / 640 = 500
    assert_eq!(state.pointer, Some(Point::new(500, 240)));
    assert_eq!(state.last_point, Some(Point::new(500, 240)));
}

#[test]
fn test_first_sample_draws_nothing_second_draws_segment() {
    let mut state = create_test_paint_state();
    state.set_brush_size("large");

    state.apply_frame(&frame_at(100, 200)).unwrap();
    assert_eq!(state.canvas.pixel(200, 200), Some([0, 0, 0]));

    state.apply_frame(&frame_at(300, 200)).unwrap();
    assert_eq!(state.canvas.pixel(200, 200), Some([255, 255, 255]));
    assert_eq!(state.last_point, Some(Point::new(300, 200)));
}

#[test]
fn test_tracking_loss_breaks_the_stroke() {
    let mut state = create_test_paint_state();
    state.set_brush_size("large");

    state.apply_frame(&frame_at(100, 300)).unwrap();
    state.apply_frame(&lost()).unwrap();
    assert!(state.pointer.is_none());
    assert!(state.last_point.is_none());

    state.apply_frame(&frame_at(300, 300)).unwrap();
    assert_eq!(state.canvas.pixel(200, 300), Some([0, 0, 0]));
    assert_eq!(state.last_point, Some(Point::new(300, 300)));
}

#[test]
fn test_button_hover_selects_and_breaks_stroke() {
    let mut state = create_test_paint_state();

    state.apply_frame(&frame_at(60, 200)).unwrap();
    state.apply_frame(&frame_at(60, 30)).unwrap(); // red button

    assert_eq!(state.current_color, RED);
    assert!(state.last_point.is_none());
    assert_eq!(state.pointer, Some(Point::new(60, 30)));
    // Nothing was painted towards the button
    assert_eq!(state.canvas.pixel(60, 100), Some([0, 0, 0]));
}

#[test]
fn test_button_fires_once_per_entry() {
    let mut state = create_test_paint_state();

    state.apply_frame(&frame_at(60, 30)).unwrap();
    assert_eq!(state.current_color, RED);

    // Switch away by keyboard while still hovering: no re-fire
    state.on_key_press(Key::Char('b')).unwrap();
    state.apply_frame(&frame_at(70, 35)).unwrap();
    assert_eq!(state.current_color, BLUE);

    // Leaving and re-entering fires again
    state.apply_frame(&frame_at(70, 200)).unwrap();
    state.apply_frame(&frame_at(70, 35)).unwrap();
    assert_eq!(state.current_color, RED);
}

#[test]
fn test_moving_between_buttons_fires_each() {
    let mut state = create_test_paint_state();

    state.apply_frame(&frame_at(60, 30)).unwrap();
    state.apply_frame(&frame_at(700, 30)).unwrap(); // medium
    assert_eq!(state.current_color, RED);
    assert_eq!(state.current_size, 10.0);
}

#[test]
fn test_set_brush_color_fallback_and_stroke_reset() {
    let mut state = create_test_paint_state();
    state.apply_frame(&frame_at(100, 200)).unwrap();
    assert!(state.last_point.is_some());

    assert_eq!(state.set_brush_color("eraser"), BLACK);
    assert!(state.last_point.is_none());

    assert_eq!(state.set_brush_color("purple"), WHITE);
    assert_eq!(state.current_color, WHITE);
}

#[test]
fn test_set_brush_size_fallback() {
    let mut state = create_test_paint_state();
    assert_eq!(state.set_brush_size("large"), 20.0);
    assert_eq!(state.set_brush_size("huge"), 5.0);
    assert_eq!(state.current_size, 5.0);
}

#[test]
fn test_keybindings_dispatch() {
    let mut state = create_test_paint_state();

    state.on_key_press(Key::Char('r')).unwrap();
    assert_eq!(state.current_color, RED);

    state.on_key_press(Key::Char('3')).unwrap();
    assert_eq!(state.current_size, 20.0);

    state.on_key_press(Key::Char('s')).unwrap();
    assert!(state.take_pending_save());
    assert!(!state.take_pending_save());

    state.on_key_press(Key::Char('x')).unwrap();
    assert!(!state.should_exit);

    state.on_key_press(Key::Escape).unwrap();
    assert!(state.should_exit);
}

#[test]
fn test_clear_key_wipes_canvas() {
    let mut state = create_test_paint_state();
    state.apply_frame(&frame_at(100, 200)).unwrap();
    state.apply_frame(&frame_at(300, 200)).unwrap();
    assert_eq!(state.canvas.pixel(200, 200), Some([255, 255, 255]));

    state.on_key_press(Key::Char('c')).unwrap();
    assert_eq!(state.canvas.pixel(200, 200), Some([0, 0, 0]));
    assert!(state.last_point.is_none());
}

#[test]
fn test_mouse_click_on_toolbar() {
    let mut state = create_test_paint_state();

    assert!(state.on_mouse_press(MouseButton::Left, 500, 30).unwrap()); // eraser
    assert_eq!(state.current_color, BLACK);

    assert!(!state.on_mouse_press(MouseButton::Left, 500, 300).unwrap());
    assert!(!state.on_mouse_press(MouseButton::Right, 60, 30).unwrap());
    assert_eq!(state.current_color, BLACK);
}

#[test]
fn test_clear_and_save_buttons() {
    let mut config = Config::default();
    config.toolbar = ToolbarConfig {
        buttons: vec![
            ButtonConfig {
                label: "clear".into(),
                rect: [10, 10, 110, 60],
                action: ButtonAction::Clear,
                fill: None,
            },
            ButtonConfig {
                label: "save".into(),
                rect: [120, 10, 220, 60],
                action: ButtonAction::Save,
                fill: None,
            },
        ],
    };
    let mut state = PaintState::from_config(&config).unwrap();
    assert_eq!(Toolbar::from_config(&config.toolbar).buttons().len(), 2);

    state.apply_frame(&frame_at(100, 200)).unwrap();
    state.apply_frame(&frame_at(300, 200)).unwrap();

    state.apply_frame(&frame_at(170, 30)).unwrap();
    assert!(state.take_pending_save());

    state.apply_frame(&frame_at(60, 30)).unwrap();
    assert_eq!(state.canvas.pixel(200, 200), Some([0, 0, 0]));
}

#[test]
fn test_overlay_leaves_canvas_untouched() {
    let mut state = create_test_paint_state();
    state.apply_frame(&frame_at(500, 300)).unwrap();

    let mut overlay = state.render_overlay().unwrap();
    assert_eq!(overlay.pixel(15, 15), Some([255, 0, 0]));
    // Pointer dot sits on the fingertip
    assert_eq!(overlay.pixel(500, 300), Some([255, 255, 0]));

    assert_eq!(state.canvas.pixel(15, 15), Some([0, 0, 0]));
    assert_eq!(state.canvas.pixel(500, 300), Some([0, 0, 0]));
}
