use serde::{Deserialize, Serialize};

use crate::prelude::SessionConfig;
use crate::processing::window::WindowAverages;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepState {
    #[default]
    Standing,
    Squatting,
    Returning,
}

/// Enter/exit thresholds for the squat and standing postures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepThresholds {
    pub knee_down_angle: f32,
    pub knee_up_angle: f32,
    pub hip_ratio_down: f32,
    pub hip_ratio_up: f32,
}

impl RepThresholds {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            knee_down_angle: config.knee_down_angle,
            knee_up_angle: config.knee_up_angle,
            hip_ratio_down: config.hip_ratio_down,
            hip_ratio_up: config.hip_ratio_up,
        }
    }

    pub fn is_squatting(&self, avg: &WindowAverages) -> bool {
        avg.knee_angle < self.knee_down_angle && avg.hip_y > avg.knee_y * self.hip_ratio_down
    }

    pub fn is_standing(&self, avg: &WindowAverages) -> bool {
        avg.knee_angle > self.knee_up_angle && avg.hip_y < avg.knee_y * self.hip_ratio_up
    }
}

/// State change produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: RepState,
    pub to: RepState,
    pub rep_completed: bool,
}

/// Three-state hysteresis machine that owns the repetition count.
///
/// Transitions are evaluated on windowed averages only, so a single noisy
/// frame cannot move the machine. A rep is counted on the way back to
/// `Standing`, after `Squatting` and `Returning` were both visited.
pub struct RepStateMachine {
    thresholds: RepThresholds,
    state: RepState,
    count: u32,
}

impl RepStateMachine {
    pub fn new(thresholds: RepThresholds) -> Self {
        Self {
            thresholds,
            state: RepState::Standing,
            count: 0,
        }
    }

    pub fn state(&self) -> RepState {
        self.state
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Evaluates one fully-windowed frame. Returns `None` when the state holds.
    pub fn step(&mut self, avg: &WindowAverages) -> Option<Transition> {
        let next = match self.state {
            RepState::Standing if self.thresholds.is_squatting(avg) => RepState::Squatting,
            RepState::Squatting if self.thresholds.is_standing(avg) => RepState::Returning,
            RepState::Returning if self.thresholds.is_standing(avg) => RepState::Standing,
            _ => return None,
        };

        let rep_completed = self.state == RepState::Returning && next == RepState::Standing;
        if rep_completed {
            self.count = self.count.saturating_add(1);
        }

        let transition = Transition {
            from: self.state,
            to: next,
            rep_completed,
        };
        self.state = next;
        Some(transition)
    }

    pub fn reset(&mut self) {
        self.state = RepState::Standing;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> RepStateMachine {
        RepStateMachine::new(RepThresholds::from_config(&SessionConfig::default()))
    }

    fn squat() -> WindowAverages {
        WindowAverages {
            knee_angle: 90.0,
            hip_y: 0.6,
            knee_y: 0.5,
            back_tilt: 0.0,
        }
    }

    fn stand() -> WindowAverages {
        WindowAverages {
            knee_angle: 160.0,
            hip_y: 0.3,
            knee_y: 0.5,
            back_tilt: 0.0,
        }
    }

    #[test]
    fn full_cycle_counts_one_rep() {
        let mut m = machine();
        let down = m.step(&squat()).unwrap();
        assert_eq!(down.to, RepState::Squatting);
        assert!(!down.rep_completed);

        let up = m.step(&stand()).unwrap();
        assert_eq!((up.from, up.to), (RepState::Squatting, RepState::Returning));
        assert_eq!(m.count(), 0);

        let done = m.step(&stand()).unwrap();
        assert_eq!(done.to, RepState::Standing);
        assert!(done.rep_completed);
        assert_eq!(m.count(), 1);

        assert!(m.step(&stand()).is_none());
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn standing_alone_never_counts() {
        let mut m = machine();
        for _ in 0..50 {
            assert!(m.step(&stand()).is_none());
        }
        assert_eq!(m.state(), RepState::Standing);
        assert_eq!(m.count(), 0);
    }

    #[test]
    fn shallow_bend_never_enters_squatting() {
        let mut m = machine();
        let shallow = WindowAverages {
            knee_angle: 125.0,
            hip_y: 0.6,
            knee_y: 0.5,
            back_tilt: 0.0,
        };
        for _ in 0..20 {
            m.step(&shallow);
            m.step(&stand());
        }
        assert_eq!(m.count(), 0);
    }

    #[test]
    fn deep_angle_with_high_hip_is_not_a_squat() {
        let mut m = machine();
        let avg = WindowAverages {
            hip_y: 0.3,
            ..squat()
        };
        assert!(m.step(&avg).is_none());
    }

    #[test]
    fn jitter_between_thresholds_holds_state() {
        let mut m = machine();
        m.step(&squat());
        let middle = WindowAverages {
            knee_angle: 130.0,
            hip_y: 0.45,
            knee_y: 0.5,
            back_tilt: 0.0,
        };
        for _ in 0..10 {
            m.step(&middle);
            m.step(&squat());
        }
        assert_eq!(m.state(), RepState::Squatting);
        assert_eq!(m.count(), 0);
    }

    #[test]
    fn returning_falls_back_only_through_standing() {
        let mut m = machine();
        m.step(&squat());
        m.step(&stand());
        assert_eq!(m.state(), RepState::Returning);
        // Dropping again before standing is confirmed does not restart the cycle.
        assert!(m.step(&squat()).is_none());
        assert_eq!(m.state(), RepState::Returning);
        m.step(&stand());
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut m = machine();
        m.step(&squat());
        m.step(&stand());
        m.step(&stand());
        m.reset();
        assert_eq!(m.state(), RepState::Standing);
        assert_eq!(m.count(), 0);
    }
}
