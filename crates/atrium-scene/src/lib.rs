//! Display objects shared by the culling and LOD layers.
//!
//! The scene layer owns the transform hierarchy; the core only sees each
//! display object's resolved world position and an approximate bounding
//! sphere, plus the two pieces of state the core writes back each frame.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identity of a display object for the lifetime of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisplayId(pub u32);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display#{}", self.0)
    }
}

/// Distance-banded quality label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LodTier {
    /// Full resolution.
    #[default]
    High,
    /// Half resolution.
    Medium,
    /// Quarter resolution.
    Low,
}

impl LodTier {
    /// All tiers from finest to coarsest.
    pub const ALL: [LodTier; 3] = [LodTier::High, LodTier::Medium, LodTier::Low];

    /// Lowercase label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            LodTier::High => "high",
            LodTier::Medium => "medium",
            LodTier::Low => "low",
        }
    }
}

impl fmt::Display for LodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A wall-mounted object whose visibility and quality the core decides.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayObject {
    /// Stable identity.
    pub id: DisplayId,
    /// World-space position as resolved by the scene layer.
    pub position: Vec3,
    /// Approximate bounding-sphere radius.
    pub bounding_radius: f32,
    /// Current occlusion visibility. Written only when it changes.
    pub visible: bool,
    /// Current quality tier.
    pub lod_tier: LodTier,
}

impl DisplayObject {
    /// A visible, high-tier display object.
    pub fn new(id: DisplayId, position: Vec3, bounding_radius: f32) -> Self {
        Self {
            id,
            position,
            bounding_radius,
            visible: true,
            lod_tier: LodTier::High,
        }
    }

    /// Move the object (the scene layer re-resolved its transform).
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
