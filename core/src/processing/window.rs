use std::collections::VecDeque;

use crate::math::stats::StatsHelper;
use crate::processing::aggregator::Sample;

/// Means of the tracked sample fields over a full window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAverages {
    pub knee_angle: f32,
    pub hip_y: f32,
    pub knee_y: f32,
    pub back_tilt: f32,
}

/// Fixed-capacity FIFO of the most recent samples.
pub struct SlidingWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SlidingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest once over capacity.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn averages(&self) -> Option<WindowAverages> {
        if self.samples.is_empty() {
            return None;
        }
        let field = |f: fn(&Sample) -> f32| {
            let values: Vec<f32> = self.samples.iter().map(f).collect();
            StatsHelper::mean(&values)
        };
        Some(WindowAverages {
            knee_angle: field(|s| s.combined_knee_angle),
            hip_y: field(|s| s.hip_y),
            knee_y: field(|s| s.knee_y),
            back_tilt: field(|s| s.back_tilt),
        })
    }

    /// Max minus min knee angle over samples no older than `span` seconds
    /// before the newest one.
    pub fn recent_angle_swing(&self, span: f64) -> f32 {
        let Some(newest) = self.samples.back() else {
            return 0.0;
        };
        let cutoff = newest.timestamp - span;
        let recent: Vec<f32> = self
            .samples
            .iter()
            .rev()
            .take_while(|s| s.timestamp >= cutoff)
            .map(|s| s.combined_knee_angle)
            .collect();
        StatsHelper::spread(&recent)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
