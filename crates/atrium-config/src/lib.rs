//! Configuration for the Atrium walkthrough core.
//!
//! Every tunable of the motion, collision, culling, and LOD layers lives here.
//! Settings persist to disk as RON and tolerate missing or unknown fields so
//! older and newer config files keep loading.

mod config;
mod error;

pub use config::{
    CONFIG_FILE_NAME, CameraConfig, CollisionConfig, Config, CullingConfig, DebugConfig,
    HeadBobConfig, LodConfig, MovementConfig,
};
pub use error::ConfigError;
