//! Read-only snapshots for tooling and benchmarks.

use std::fmt;

use atrium_culling::{FrustumStats, OcclusionStats};
use atrium_lod::LodStats;
use glam::Vec3;

/// What happened during one [`Walkthrough::step`](crate::Walkthrough::step).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Index of the frame just simulated, starting at 0.
    pub frame: u64,
    /// The `dt` actually integrated after clamping.
    pub dt: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Colliders that pushed the player this frame.
    pub contacts: u32,
    /// Whether the boundary clamp engaged.
    pub clamped: bool,
    pub frustum_ran: bool,
    pub occlusion_ran: bool,
    pub lod_ran: bool,
    /// Displays whose occlusion flag flipped this frame.
    pub visibility_changes: usize,
    /// LOD tier switches this frame.
    pub tier_switches: u64,
}

/// Aggregate statistics across all components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Diagnostics {
    pub frames: u64,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub frustum: FrustumStats,
    pub occlusion: OcclusionStats,
    pub lod: LodStats,
    /// Frames whose `dt` exceeded the integration limit.
    pub hitches: u64,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {} pos ({:.2}, {:.2}, {:.2}) speed {:.2} | frustum {}/{} | occlusion {}/{} ({:.1}% culled, {} draw calls saved) | lod {}h {}m {}l, {} switches, {} cached",
            self.frames,
            self.position.x,
            self.position.y,
            self.position.z,
            self.speed,
            self.frustum.visible,
            self.frustum.total,
            self.occlusion.visible,
            self.occlusion.total,
            self.occlusion.cull_percentage,
            self.occlusion.draw_calls_saved,
            self.lod.distribution.high,
            self.lod.distribution.medium,
            self.lod.distribution.low,
            self.lod.total_switches,
            self.lod.cache_size,
        )
    }
}
