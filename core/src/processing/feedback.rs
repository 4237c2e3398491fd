use serde::{Deserialize, Serialize};

use crate::prelude::SessionConfig;
use crate::processing::aggregator::Sample;
use crate::processing::rep_counter::{RepState, RepThresholds};
use crate::processing::window::SlidingWindow;

/// Advisory tag surfaced once per frame. Display text is chosen by the
/// presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackMessage {
    InsufficientVisibility,
    WarmingUp,
    TooFast,
    NotLowEnough,
    BackNotStraight,
    Ready,
    #[default]
    None,
}

/// Stateless mapping from windowed metrics to a feedback tag.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackClassifier {
    thresholds: RepThresholds,
    back_tilt_limit: f32,
    fast_motion_delta_angle: f32,
    fast_motion_time_span: f64,
}

impl FeedbackClassifier {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            thresholds: RepThresholds::from_config(config),
            back_tilt_limit: config.back_tilt_limit,
            fast_motion_delta_angle: config.fast_motion_delta_angle,
            fast_motion_time_span: config.fast_motion_time_span,
        }
    }

    /// `current` is this frame's sample, absent when the frame was unusable.
    /// `state` only gates which messages are worth showing.
    pub fn classify(
        &self,
        current: Option<&Sample>,
        window: &SlidingWindow,
        state: RepState,
    ) -> FeedbackMessage {
        if current.is_none() {
            return FeedbackMessage::InsufficientVisibility;
        }
        let avg = match window.averages() {
            Some(avg) if window.is_full() => avg,
            _ => return FeedbackMessage::WarmingUp,
        };

        if window.recent_angle_swing(self.fast_motion_time_span) > self.fast_motion_delta_angle {
            return FeedbackMessage::TooFast;
        }

        let in_depth_band = avg.knee_angle >= self.thresholds.knee_down_angle
            && avg.knee_angle <= self.thresholds.knee_up_angle;
        if in_depth_band {
            let hip_low_enough = avg.hip_y > avg.knee_y * self.thresholds.hip_ratio_down;
            if state == RepState::Standing && !hip_low_enough {
                return FeedbackMessage::NotLowEnough;
            }
            if avg.back_tilt > self.back_tilt_limit {
                return FeedbackMessage::BackNotStraight;
            }
        }

        if state == RepState::Standing && self.thresholds.is_standing(&avg) {
            FeedbackMessage::Ready
        } else {
            FeedbackMessage::None
        }
    }
}
