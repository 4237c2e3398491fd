use serde::{Deserialize, Serialize};

use crate::processing::feedback::FeedbackMessage;
use crate::processing::rep_counter::RepState;

/// Result of processing one frame, handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameUpdate {
    pub rep_count: u32,
    pub feedback: FeedbackMessage,
    pub state: RepState,
    /// Set only on the frame that completed a repetition.
    pub rep_completed: bool,
    /// False when the frame was ignored because its timestamp did not advance.
    pub accepted: bool,
}
