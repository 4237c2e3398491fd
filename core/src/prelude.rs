use serde::{Deserialize, Serialize};

use crate::processing::feedback::FeedbackMessage;

/// Largest smoothing window a session accepts.
pub const MAX_WINDOW_SIZE: usize = 1024;

/// Tunable thresholds shared by every stage of a squat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of samples averaged before any decision is made.
    pub window_size: usize,
    pub visibility_threshold: f32,
    /// Knee angle (degrees) the window average must fall below to count as squatting.
    pub knee_down_angle: f32,
    /// Knee angle (degrees) the window average must exceed to count as standing.
    pub knee_up_angle: f32,
    /// Hip must sit lower than `knee_y * hip_ratio_down` while squatting.
    pub hip_ratio_down: f32,
    /// Hip must sit higher than `knee_y * hip_ratio_up` while standing.
    pub hip_ratio_up: f32,
    pub back_tilt_limit: f32,
    pub fast_motion_delta_angle: f32,
    /// Seconds.
    pub fast_motion_time_span: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: 8,
            visibility_threshold: 0.5,
            knee_down_angle: 110.0,
            knee_up_angle: 145.0,
            hip_ratio_down: 0.85,
            hip_ratio_up: 0.75,
            back_tilt_limit: 20.0,
            fast_motion_delta_angle: 30.0,
            fast_motion_time_span: 0.2,
        }
    }
}

impl SessionConfig {
    /// Rejects settings under which the rep counter cannot work.
    pub fn validate(&self) -> SessionResult<()> {
        if self.window_size == 0 {
            return Err(invalid("window_size must be at least 1"));
        }
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(invalid(&format!(
                "window_size must be at most {}, got {}",
                MAX_WINDOW_SIZE, self.window_size
            )));
        }

        let floats = [
            ("visibility_threshold", self.visibility_threshold),
            ("knee_down_angle", self.knee_down_angle),
            ("knee_up_angle", self.knee_up_angle),
            ("hip_ratio_down", self.hip_ratio_down),
            ("hip_ratio_up", self.hip_ratio_up),
            ("back_tilt_limit", self.back_tilt_limit),
            ("fast_motion_delta_angle", self.fast_motion_delta_angle),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(&format!("{} must be finite", name)));
        }
        if !self.fast_motion_time_span.is_finite() || self.fast_motion_time_span <= 0.0 {
            return Err(invalid("fast_motion_time_span must be a positive number of seconds"));
        }

        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(invalid("visibility_threshold must lie in [0, 1]"));
        }
        for (name, angle) in [
            ("knee_down_angle", self.knee_down_angle),
            ("knee_up_angle", self.knee_up_angle),
        ] {
            if angle <= 0.0 || angle > 180.0 {
                return Err(invalid(&format!("{} must lie in (0, 180]", name)));
            }
        }
        if self.knee_down_angle >= self.knee_up_angle {
            return Err(invalid(&format!(
                "knee_down_angle {} must be below knee_up_angle {}",
                self.knee_down_angle, self.knee_up_angle
            )));
        }
        if self.hip_ratio_down <= 0.0 || self.hip_ratio_up <= 0.0 {
            return Err(invalid("hip ratios must be positive"));
        }
        if self.back_tilt_limit < 0.0 {
            return Err(invalid("back_tilt_limit must not be negative"));
        }
        if self.fast_motion_delta_angle <= 0.0 {
            return Err(invalid("fast_motion_delta_angle must be positive"));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> SessionError {
    SessionError::InvalidConfiguration(reason.to_string())
}

/// Errors surfaced by the core. Missing or unusable input never errors; it
/// degrades to a feedback tag instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Outbound ports to the audio and toast collaborators.
pub trait SessionObserver {
    /// Fired exactly once per `Returning -> Standing` transition.
    fn on_rep_completed(&mut self, rep_count: u32);
    fn on_feedback(&mut self, message: FeedbackMessage);
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_rep_completed(&mut self, _rep_count: u32) {}

    fn on_feedback(&mut self, _message: FeedbackMessage) {}
}
