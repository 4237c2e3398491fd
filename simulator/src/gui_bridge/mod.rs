pub mod bridge;
pub mod messages;
pub mod model;
pub mod throttle;
