pub mod landmarks;
pub mod update;

pub use landmarks::{joints, Landmark, PoseFrame};
pub use update::FrameUpdate;
