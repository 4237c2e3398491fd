use serde::{Deserialize, Serialize};
use squatcore::{FeedbackMessage, RepState};

/// Latest session view served to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionModel {
    pub rep_count: u32,
    pub state: RepState,
    pub feedback: FeedbackMessage,
    /// Toast text that survived throttling on the latest frame.
    pub toast: Option<String>,
    pub frames_processed: u64,
    pub last_run: Option<RunSummary>,
}

/// Outcome of the most recent synthetic run submitted to the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub scenario: Option<String>,
    pub rep_count: u32,
    pub frames: u64,
}
