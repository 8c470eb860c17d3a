use fingerpaint::Config;
use fingerpaint::draw::{BLACK, Color, WHITE};
use fingerpaint::input::PaintState;
use fingerpaint::tracking::{HandLandmarks, LANDMARK_COUNT, Landmark, TrackedFrame};
use fingerpaint::ui;
use image::RgbImage;

fn make_state() -> PaintState {
    PaintState::from_config(&Config::default()).unwrap()
}

/// Wrist on the left, every other landmark on the right, all on one row.
fn stretched_hand() -> HandLandmarks {
    let mut landmarks = [Landmark::new(0.9, 0.5, 0.0); LANDMARK_COUNT];
    landmarks[0] = Landmark::new(0.1, 0.5, 0.0);
    HandLandmarks {
        landmarks,
        score: 0.95,
        handedness: "Right".to_string(),
    }
}

#[test]
fn camera_preview_draws_bones_and_joints() {
    let frame = TrackedFrame::from_hand(
        200,
        100,
        Some(RgbImage::new(200, 100)),
        Some(stretched_hand()),
    );

    let mut preview = ui::render_camera_preview(&frame, true).unwrap().unwrap();
    assert_eq!((preview.width(), preview.height()), (200, 100));
    // Bone from the wrist crosses the middle of the frame
    assert_eq!(preview.pixel(100, 50), Some([0, 255, 0]));
    // Joints sit on top of the bones
    assert_eq!(preview.pixel(180, 50), Some([255, 0, 0]));
    assert_eq!(preview.pixel(20, 50), Some([255, 0, 0]));
    assert_eq!(preview.pixel(100, 10), Some([0, 0, 0]));
}

#[test]
fn camera_preview_skips_skeleton_when_disabled() {
    let frame = TrackedFrame::from_hand(
        200,
        100,
        Some(RgbImage::new(200, 100)),
        Some(stretched_hand()),
    );

    let mut preview = ui::render_camera_preview(&frame, false).unwrap().unwrap();
    assert_eq!(preview.pixel(100, 50), Some([0, 0, 0]));
    assert_eq!(preview.pixel(180, 50), Some([0, 0, 0]));
}

#[test]
fn camera_preview_needs_an_image() {
    let frame = TrackedFrame::pointer(640, 480, Some(Landmark::new(0.5, 0.5, 0.0)));
    assert!(ui::render_camera_preview(&frame, true).unwrap().is_none());
}

#[test]
fn toolbar_renders_button_fills_on_overlay() {
    let state = make_state();
    let mut composed = state.render_overlay().unwrap();

    // Default layout: red at x 10..110, green at 120..220, eraser at 450..550
    assert_eq!(composed.pixel(20, 20), Some([255, 0, 0]));
    assert_eq!(composed.pixel(130, 20), Some([0, 255, 0]));
    assert_eq!(composed.pixel(460, 20), Some([0, 0, 0]));
    // Gap between buttons stays black
    assert_eq!(composed.pixel(115, 35), Some([0, 0, 0]));
}

#[test]
fn active_presets_are_outlined() {
    let mut state = make_state();
    state.set_brush_color("green");

    let mut composed = state.render_overlay().unwrap();
    // Outline sits 3px outside the green button (120..220, 10..60)
    assert_eq!(composed.pixel(117, 35), Some([255, 255, 0]));
    assert_eq!(composed.pixel(7, 35), Some([0, 0, 0]));
}

#[test]
fn info_line_tracks_brush_changes() {
    let mut state = make_state();
    assert_eq!(ui::info_line(&state), "White | Size: Small");

    state.set_brush_color("eraser");
    state.set_brush_size("large");
    assert_eq!(ui::info_line(&state), "Eraser | Size: Large");
}

#[test]
fn labels_are_white_on_dark_fills_and_black_otherwise() {
    let state = make_state();
    let label = |name: &str| {
        let button = state
            .toolbar
            .buttons()
            .iter()
            .find(|button| button.label == name)
            .unwrap();
        ui::label_color(button.fill)
    };

    assert_eq!(label("red"), WHITE);
    assert_eq!(label("blue"), WHITE);
    assert_eq!(label("eraser"), WHITE);
    assert_eq!(label("green"), BLACK);
    assert_eq!(label("white"), BLACK);
    for size in ["small", "medium", "large"] {
        assert_eq!(label(size), BLACK, "{size} button");
    }
}

#[test]
fn info_line_falls_back_to_unknown() {
    let mut state = make_state();
    state.current_size = 7.0;
    assert_eq!(ui::info_line(&state), "White | Size: Unknown");

    state.current_color = Color {
        r: 0.42,
        g: 0.42,
        b: 0.42,
        a: 1.0,
    };
    assert_eq!(ui::info_line(&state), "Unknown | Size: Unknown");
}

#[test]
fn fingertip_strokes_reach_the_saved_canvas_but_overlay_does_not() {
    let mut state = make_state();
    for x in [0.3, 0.45, 0.6] {
        let frame = TrackedFrame::pointer(640, 480, Some(Landmark::new(x, 0.5, 0.0)));
        state.apply_frame(&frame).unwrap();
    }

    assert_eq!(state.canvas.pixel(400, 240), Some([255, 255, 255]));
    // Toolbar lives only on the overlay
    assert_eq!(state.canvas.pixel(20, 20), Some([0, 0, 0]));
}
