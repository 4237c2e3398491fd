pub mod geometry;
pub mod stats;

pub use geometry::{back_tilt, joint_angle, midpoint, Point2};
pub use stats::StatsHelper;
