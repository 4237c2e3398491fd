use log::info;
use squatcore::{FeedbackMessage, SessionObserver};
use std::collections::HashMap;

/// Stand-in for the audio and toast collaborators. Logs the reward cue and
/// tallies feedback.
#[derive(Debug, Default, Clone)]
pub struct ConsoleCue {
    pub feedback_counts: HashMap<FeedbackMessage, usize>,
}

impl ConsoleCue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionObserver for ConsoleCue {
    fn on_rep_completed(&mut self, rep_count: u32) {
        info!("[CUE] reward sound for rep {}", rep_count);
    }

    fn on_feedback(&mut self, message: FeedbackMessage) {
        *self.feedback_counts.entry(message).or_insert(0) += 1;
    }
}
