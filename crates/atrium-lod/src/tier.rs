//! Distance bands and per-tier texture quality.

use atrium_config::LodConfig;
use atrium_scene::LodTier;

/// Distance thresholds for tier selection.
///
/// Only `near` and `far` take part in selection; `low` is kept as the nominal
/// outer edge of the low band and is never compared against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodThresholds {
    near: f32,
    far: f32,
    low: f32,
}

impl LodThresholds {
    /// Thresholds in world units from the camera.
    pub fn new(near: f32, far: f32, low: f32) -> Self {
        Self { near, far, low }
    }

    /// Thresholds from the LOD config.
    pub fn from_config(config: &LodConfig) -> Self {
        Self::new(config.near, config.far, config.low)
    }

    /// Upper bound of the high band (inclusive).
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Upper bound of the medium band (inclusive).
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Nominal low boundary. Not used by [`select`](Self::select).
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Operator override of the two active thresholds.
    pub fn set_active(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Tier for a camera-to-object distance. Both boundaries are inclusive.
    pub fn select(&self, distance: f32) -> LodTier {
        if distance <= self.near {
            LodTier::High
        } else if distance <= self.far {
            LodTier::Medium
        } else {
            LodTier::Low
        }
    }
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self::from_config(&LodConfig::default())
    }
}

/// Resolution scale and mipmap policy of a tier's texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierQuality {
    /// Fraction of the source resolution along each axis.
    pub scale: f32,
    /// Whether the variant carries a mip chain.
    pub mipmaps: bool,
}

impl TierQuality {
    pub fn for_tier(tier: LodTier) -> Self {
        let scale = match tier {
            LodTier::High => 1.0,
            LodTier::Medium => 0.5,
            LodTier::Low => 0.25,
        };
        Self {
            scale,
            mipmaps: scale > 0.3,
        }
    }

    /// Scaled size of a `width × height` source, at least 1×1.
    pub fn scaled_size(&self, width: u32, height: u32) -> (u32, u32) {
        let w = ((width as f32 * self.scale).floor() as u32).max(1);
        let h = ((height as f32 * self.scale).floor() as u32).max(1);
        (w, h)
    }
}
