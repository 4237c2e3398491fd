use crate::pose_interface::{FrameUpdate, PoseFrame};
use crate::prelude::{NullObserver, SessionConfig, SessionObserver, SessionResult};
use crate::processing::aggregator::{BilateralAggregator, Sample};
use crate::processing::feedback::{FeedbackClassifier, FeedbackMessage};
use crate::processing::rep_counter::{RepState, RepStateMachine, RepThresholds};
use crate::processing::visibility::VisibilityFilter;
use crate::processing::window::SlidingWindow;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::SessionStats;

/// Per-person squat tracking context.
///
/// Owns its window and rep state exclusively; frames must be fed in
/// timestamp order from a single caller.
pub struct SquatSession<O: SessionObserver = NullObserver> {
    config: SessionConfig,
    aggregator: BilateralAggregator,
    window: SlidingWindow,
    machine: RepStateMachine,
    classifier: FeedbackClassifier,
    observer: O,
    stats: SessionStats,
    logger: LogManager,
    last_timestamp: Option<f64>,
}

impl SquatSession<NullObserver> {
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        Self::with_observer(config, NullObserver)
    }
}

impl<O: SessionObserver> SquatSession<O> {
    pub fn with_observer(config: SessionConfig, observer: O) -> SessionResult<Self> {
        config.validate()?;
        let filter = VisibilityFilter::new(config.visibility_threshold);
        Ok(Self {
            aggregator: BilateralAggregator::new(filter),
            window: SlidingWindow::with_capacity(config.window_size),
            machine: RepStateMachine::new(RepThresholds::from_config(&config)),
            classifier: FeedbackClassifier::from_config(&config),
            observer,
            stats: SessionStats::new(),
            logger: LogManager::default(),
            last_timestamp: None,
            config,
        })
    }

    /// Tags log lines from this session.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.logger = LogManager::new(label);
        self
    }

    /// Processes one frame of pose output and reports the resulting state.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameUpdate {
        self.stats.record_frame();

        let advances = frame.timestamp.is_finite()
            && self
                .last_timestamp
                .map_or(true, |last| frame.timestamp > last);
        if !advances {
            self.stats.record_stale();
            self.logger
                .record_stale(frame.timestamp, self.last_timestamp);
            return self.update(FeedbackMessage::None, false, false);
        }
        self.last_timestamp = Some(frame.timestamp);

        let sample = frame
            .primary()
            .and_then(|landmarks| self.aggregator.aggregate(landmarks, frame.timestamp));

        let Some(sample) = sample else {
            self.stats.record_dropped();
            self.logger.record_dropped(frame.timestamp);
            return self.emit(None, false);
        };

        self.stats.record_sample();
        self.window.push(sample);

        let mut rep_completed = false;
        if self.window.is_full() {
            if let Some(avg) = self.window.averages() {
                if let Some(transition) = self.machine.step(&avg) {
                    self.logger
                        .record_transition(&transition, self.machine.count());
                    if transition.rep_completed {
                        rep_completed = true;
                        self.stats.record_rep();
                        self.observer.on_rep_completed(self.machine.count());
                    }
                }
            }
        }

        self.emit(Some(&sample), rep_completed)
    }

    fn emit(&mut self, current: Option<&Sample>, rep_completed: bool) -> FrameUpdate {
        let feedback = self
            .classifier
            .classify(current, &self.window, self.machine.state());
        if feedback != FeedbackMessage::None {
            self.observer.on_feedback(feedback);
        }
        self.update(feedback, rep_completed, true)
    }

    fn update(
        &self,
        feedback: FeedbackMessage,
        rep_completed: bool,
        accepted: bool,
    ) -> FrameUpdate {
        FrameUpdate {
            rep_count: self.machine.count(),
            feedback,
            state: self.machine.state(),
            rep_completed,
            accepted,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.machine.count()
    }

    pub fn state(&self) -> RepState {
        self.machine.state()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats.snapshot()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Starts over as if freshly constructed; the observer is kept.
    pub fn reset(&mut self) {
        self.window.clear();
        self.machine.reset();
        self.stats = SessionStats::new();
        self.last_timestamp = None;
        self.logger.record("session reset");
    }
}
