use serde::{Deserialize, Serialize};

/// Indices into the 33-point MediaPipe Pose layout used by the aggregator.
pub mod joints {
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;

    /// Landmarks per detected person.
    pub const COUNT: usize = 33;
}

/// A single detected joint. `x`/`y` are normalized to the image, `z` is
/// relative depth and is not used by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }
}

/// One pose-model result: every person detected in a video frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Capture time in seconds.
    pub timestamp: f64,
    #[serde(default)]
    pub persons: Vec<Vec<Landmark>>,
}

impl PoseFrame {
    pub fn new(timestamp: f64, persons: Vec<Vec<Landmark>>) -> Self {
        Self { timestamp, persons }
    }

    /// Frame with exactly one tracked person.
    pub fn single(timestamp: f64, landmarks: Vec<Landmark>) -> Self {
        Self::new(timestamp, vec![landmarks])
    }

    /// Landmarks of the tracked person; additional detections are ignored.
    pub fn primary(&self) -> Option<&[Landmark]> {
        self.persons.first().map(Vec::as_slice)
    }
}
