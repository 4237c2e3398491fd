use squatcore::FeedbackMessage;

/// Suppresses a message repeated within `interval` seconds of the last time
/// it was shown. Uses frame timestamps, not wall-clock time.
#[derive(Debug, Clone)]
pub struct FeedbackThrottle {
    interval: f64,
    last: Option<(FeedbackMessage, f64)>,
}

impl FeedbackThrottle {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true when `message` should be shown at time `now`.
    pub fn admit(&mut self, message: FeedbackMessage, now: f64) -> bool {
        if message == FeedbackMessage::None {
            return false;
        }
        if let Some((last_message, shown_at)) = self.last {
            if last_message == message && now - shown_at < self.interval {
                return false;
            }
        }
        self.last = Some((message, now));
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FeedbackThrottle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_message_is_held_back_for_the_interval() {
        let mut throttle = FeedbackThrottle::default();
        assert!(throttle.admit(FeedbackMessage::NotLowEnough, 0.0));
        assert!(!throttle.admit(FeedbackMessage::NotLowEnough, 0.5));
        assert!(throttle.admit(FeedbackMessage::NotLowEnough, 1.2));
    }

    #[test]
    fn a_different_message_passes_immediately() {
        let mut throttle = FeedbackThrottle::default();
        assert!(throttle.admit(FeedbackMessage::TooFast, 0.0));
        assert!(throttle.admit(FeedbackMessage::BackNotStraight, 0.1));
        assert!(!throttle.admit(FeedbackMessage::None, 0.2));
    }
}
