//! Hand landmark types (21-point hand model).

/// Landmark indices of the 21-point hand model.
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Bone pairs used to draw the hand skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// A single hand landmark.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f32,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f32,
    /// Depth relative to the wrist (smaller is closer to the camera)
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Detection confidence (0.0 to 1.0)
    pub score: f32,
    /// "Left" or "Right" as reported by the detector
    pub handedness: String,
}

impl HandLandmarks {
    /// The index fingertip, which is what the brush follows.
    pub fn index_finger_tip(&self) -> Landmark {
        self.landmarks[index::INDEX_FINGER_TIP]
    }

    /// All landmarks in frame pixel coordinates, for skeleton drawing.
    pub fn to_pixels(&self, width: u32, height: u32) -> [(f64, f64); LANDMARK_COUNT] {
        let mut out = [(0.0, 0.0); LANDMARK_COUNT];
        for (slot, lm) in out.iter_mut().zip(self.landmarks.iter()) {
            *slot = (lm.x as f64 * width as f64, lm.y as f64 * height as f64);
        }
        out
    }
}
