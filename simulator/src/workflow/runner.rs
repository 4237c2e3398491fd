use crate::workflow::config::WorkflowConfig;
use crate::workflow::cue::ConsoleCue;
use anyhow::Context;
use serde::Serialize;
use squatcore::telemetry::SessionStats;
use squatcore::{FeedbackMessage, PoseFrame, RepState, SquatSession};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub rep_count: u32,
    pub final_state: RepState,
    pub feedback_counts: HashMap<FeedbackMessage, usize>,
    pub stats: SessionStats,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Fresh session wired to the console cue.
    pub fn start_session(&self) -> anyhow::Result<SquatSession<ConsoleCue>> {
        let config = self.config.to_session_config();
        let session = SquatSession::with_observer(config, ConsoleCue::new())
            .context("building squat session")?;
        Ok(session.with_label(self.config.label()))
    }

    pub fn execute(&self, frames: &[PoseFrame]) -> anyhow::Result<WorkflowResult> {
        let mut session = self.start_session()?;
        for frame in frames {
            session.process_frame(frame);
        }

        Ok(WorkflowResult {
            rep_count: session.rep_count(),
            final_state: session.state(),
            feedback_counts: session.observer().feedback_counts.clone(),
            stats: session.stats(),
        })
    }
}
