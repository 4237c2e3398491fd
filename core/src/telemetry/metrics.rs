use serde::{Deserialize, Serialize};

/// Frame counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames_seen: u64,
    pub samples_accepted: u64,
    pub frames_dropped: u64,
    pub stale_frames: u64,
    pub reps: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self) {
        self.frames_seen += 1;
    }

    pub fn record_sample(&mut self) {
        self.samples_accepted += 1;
    }

    pub fn record_dropped(&mut self) {
        self.frames_dropped += 1;
    }

    pub fn record_stale(&mut self) {
        self.stale_frames += 1;
    }

    pub fn record_rep(&mut self) {
        self.reps += 1;
    }

    pub fn snapshot(&self) -> SessionStats {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let mut stats = SessionStats::new();
        stats.record_frame();
        stats.record_frame();
        stats.record_sample();
        stats.record_dropped();
        stats.record_rep();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.frames_seen, 2);
        assert_eq!(snapshot.samples_accepted, 1);
        assert_eq!(snapshot.frames_dropped, 1);
        assert_eq!(snapshot.stale_frames, 0);
        assert_eq!(snapshot.reps, 1);
    }
}
