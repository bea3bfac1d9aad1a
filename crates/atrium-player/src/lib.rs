//! First-person camera pose, motion integration, look smoothing, and head bob.

pub mod head_bob;
pub mod look;
pub mod motion;
pub mod pose;

pub use head_bob::HeadBob;
pub use look::{LookSmoother, smoothing_factor};
pub use motion::{MotionIntegrator, MotionParams, clamp_dt};
pub use pose::{PITCH_LIMIT, Pose};
