use serde::{Deserialize, Serialize};

use crate::math::geometry::{back_tilt, joint_angle, midpoint, Point2};
use crate::pose_interface::{joints, Landmark};
use crate::processing::visibility::VisibilityFilter;

/// Per-frame measurements derived from one person's landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub left_knee_angle: Option<f32>,
    pub right_knee_angle: Option<f32>,
    /// The more flexed of the available sides.
    pub combined_knee_angle: f32,
    pub hip_y: f32,
    pub knee_y: f32,
    pub back_tilt: f32,
    pub timestamp: f64,
}

struct Leg {
    hip: usize,
    knee: usize,
    ankle: usize,
}

const LEFT_LEG: Leg = Leg {
    hip: joints::LEFT_HIP,
    knee: joints::LEFT_KNEE,
    ankle: joints::LEFT_ANKLE,
};

const RIGHT_LEG: Leg = Leg {
    hip: joints::RIGHT_HIP,
    knee: joints::RIGHT_KNEE,
    ankle: joints::RIGHT_ANKLE,
};

struct LegReading {
    angle: f32,
    hip: Point2,
    knee_y: f32,
}

/// Combines left and right leg readings into one sample, tolerating an
/// occluded side.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilateralAggregator {
    filter: VisibilityFilter,
}

impl BilateralAggregator {
    pub fn new(filter: VisibilityFilter) -> Self {
        Self { filter }
    }

    /// Returns `None` when neither leg is usable.
    pub fn aggregate(&self, landmarks: &[Landmark], timestamp: f64) -> Option<Sample> {
        let left = self.read_leg(landmarks, &LEFT_LEG);
        let right = self.read_leg(landmarks, &RIGHT_LEG);

        let readings: Vec<&LegReading> = left.iter().chain(right.iter()).collect();
        if readings.is_empty() {
            return None;
        }

        let count = readings.len() as f32;
        let combined_knee_angle = readings
            .iter()
            .map(|r| r.angle)
            .fold(f32::INFINITY, f32::min);
        let hip_y = readings.iter().map(|r| r.hip.y).sum::<f32>() / count;
        let knee_y = readings.iter().map(|r| r.knee_y).sum::<f32>() / count;

        Some(Sample {
            left_knee_angle: left.as_ref().map(|r| r.angle),
            right_knee_angle: right.as_ref().map(|r| r.angle),
            combined_knee_angle,
            hip_y,
            knee_y,
            back_tilt: self.torso_tilt(landmarks),
            timestamp,
        })
    }

    fn read_leg(&self, landmarks: &[Landmark], leg: &Leg) -> Option<LegReading> {
        let hip = self.filter.visible(landmarks, leg.hip)?;
        let knee = self.filter.visible(landmarks, leg.knee)?;
        let ankle = self.filter.visible(landmarks, leg.ankle)?;

        // Degenerate limbs count as invisible.
        let angle = joint_angle(hip.into(), knee.into(), ankle.into())?;
        Some(LegReading {
            angle,
            hip: hip.into(),
            knee_y: knee.y,
        })
    }

    /// Needs both shoulders and at least one hip; otherwise contributes no tilt.
    fn torso_tilt(&self, landmarks: &[Landmark]) -> f32 {
        let shoulders = [joints::LEFT_SHOULDER, joints::RIGHT_SHOULDER]
            .iter()
            .map(|&idx| self.filter.visible(landmarks, idx).map(Point2::from))
            .collect::<Option<Vec<_>>>();
        let hips: Vec<Point2> = [joints::LEFT_HIP, joints::RIGHT_HIP]
            .iter()
            .filter_map(|&idx| self.filter.visible(landmarks, idx).map(Point2::from))
            .collect();

        match (shoulders.as_deref().and_then(midpoint), midpoint(&hips)) {
            (Some(shoulder_mid), Some(hip_mid)) => back_tilt(shoulder_mid, hip_mid),
            _ => 0.0,
        }
    }
}
