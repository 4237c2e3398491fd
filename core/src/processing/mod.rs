pub mod aggregator;
pub mod feedback;
pub mod rep_counter;
pub mod session;
pub mod visibility;
pub mod window;

pub use aggregator::{BilateralAggregator, Sample};
pub use feedback::{FeedbackClassifier, FeedbackMessage};
pub use rep_counter::{RepState, RepStateMachine, RepThresholds, Transition};
pub use session::SquatSession;
pub use visibility::VisibilityFilter;
pub use window::{SlidingWindow, WindowAverages};
