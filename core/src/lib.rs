//! Repetition-counting and form-feedback core for the squat coach.
//!
//! Frames of pose landmarks flow through visibility gating, joint geometry and
//! bilateral aggregation into a per-session sliding window. Windowed averages
//! then drive the hysteresis rep counter and the feedback classifier.

pub mod math;
pub mod pose_interface;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use pose_interface::{FrameUpdate, Landmark, PoseFrame};
pub use prelude::{NullObserver, SessionConfig, SessionError, SessionObserver, SessionResult};
pub use processing::{FeedbackMessage, RepState, SquatSession};
