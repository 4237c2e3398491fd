use log::{debug, info, warn};

use crate::processing::rep_counter::Transition;

/// Session-scoped wrapper over the `log` facade.
pub struct LogManager {
    label: String,
}

impl LogManager {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn record_transition(&self, transition: &Transition, rep_count: u32) {
        if transition.rep_completed {
            info!("[{}] rep {} completed", self.label, rep_count);
        } else {
            info!(
                "[{}] {:?} -> {:?}",
                self.label, transition.from, transition.to
            );
        }
    }

    pub fn record_dropped(&self, timestamp: f64) {
        debug!(
            "[{}] frame at {:.3}s dropped: no usable leg",
            self.label, timestamp
        );
    }

    pub fn record_stale(&self, timestamp: f64, last: Option<f64>) {
        match last {
            Some(last) => warn!(
                "[{}] ignoring frame at {:.3}s, not after {:.3}s",
                self.label, timestamp, last
            ),
            None => warn!("[{}] ignoring frame with timestamp {}", self.label, timestamp),
        }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.label, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("session")
    }
}
