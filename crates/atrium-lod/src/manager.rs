//! Distance-driven tier tracking with a lazily filled texture cache.
//!
//! Tier changes are counted and written to each display's `lod_tier`; no
//! texture swap is tied to them. Textures are fetched through
//! [`LodManager::texture`] by whoever decides to act on a tier.

use atrium_config::LodConfig;
use atrium_scene::{DisplayId, DisplayObject, LodTier};
use glam::Vec3;
use image::RgbaImage;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use crate::cache::{LodTexture, TextureCache, TextureKey};
use crate::error::AssetError;
use crate::loader::{AssetLoader, load_image};
use crate::tier::LodThresholds;

/// Objects currently in each tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TierDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierDistribution {
    pub fn count(&self, tier: LodTier) -> usize {
        match tier {
            LodTier::High => self.high,
            LodTier::Medium => self.medium,
            LodTier::Low => self.low,
        }
    }
}

/// Snapshot of LOD bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodStats {
    pub total_switches: u64,
    pub distribution: TierDistribution,
    /// Number of cached texture sets.
    pub cache_size: usize,
    pub pending_loads: usize,
    pub load_failures: u64,
}

/// Tracks each display's tier and owns the texture cache.
pub struct LodManager {
    thresholds: LodThresholds,
    tiers: FxHashMap<DisplayId, LodTier>,
    switches: u64,
    cache: TextureCache,
    loader: Option<AssetLoader>,
    pending: FxHashSet<TextureKey>,
    load_failures: u64,
}

impl LodManager {
    /// A manager without a background loader.
    pub fn new(thresholds: LodThresholds) -> Self {
        Self {
            thresholds,
            tiers: FxHashMap::default(),
            switches: 0,
            cache: TextureCache::new(),
            loader: None,
            pending: FxHashSet::default(),
            load_failures: 0,
        }
    }

    /// A manager with thresholds from the LOD config and no loader.
    pub fn from_config(config: &LodConfig) -> Self {
        Self::new(LodThresholds::from_config(config))
    }

    /// Spawn the background loader used by [`request_textures`](Self::request_textures).
    pub fn with_background_loader(mut self) -> Self {
        self.loader = Some(AssetLoader::spawn());
        self
    }

    /// Active tier thresholds.
    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// Operator override of the near/far thresholds.
    pub fn set_thresholds(&mut self, near: f32, far: f32) {
        info!(near, far, "LOD thresholds overridden");
        self.thresholds.set_active(near, far);
    }

    /// Replace all three thresholds. Recorded tiers are kept until the next
    /// update.
    pub fn configure(&mut self, config: &LodConfig) {
        self.thresholds = LodThresholds::from_config(config);
    }

    /// Last tier recorded for `id`.
    pub fn tier_of(&self, id: DisplayId) -> Option<LodTier> {
        self.tiers.get(&id).copied()
    }

    /// Recompute one display's tier from its distance to the camera.
    ///
    /// An object with no recorded tier counts as high, so its first
    /// evaluation only counts a switch if it lands in medium or low.
    pub fn update_object(&mut self, object: &mut DisplayObject, camera_position: Vec3) -> LodTier {
        let distance = camera_position.distance(object.position);
        let tier = self.thresholds.select(distance);
        let previous = self.tiers.insert(object.id, tier).unwrap_or(LodTier::High);
        if previous != tier {
            self.switches += 1;
            debug!(id = %object.id, from = %previous, to = %tier, distance, "LOD tier switch");
        }
        object.lod_tier = tier;
        tier
    }

    /// Update every display. Returns the number of tier switches this call.
    pub fn update_all(&mut self, objects: &mut [DisplayObject], camera_position: Vec3) -> u64 {
        let before = self.switches;
        for object in objects.iter_mut() {
            self.update_object(object, camera_position);
        }
        self.switches - before
    }

    /// Queue a background load of `key`'s source image.
    ///
    /// No-op if the set is cached or already queued. Without a running
    /// loader the failure is logged and counted.
    pub fn request_textures(&mut self, key: TextureKey) {
        if self.cache.contains(&key) || self.pending.contains(&key) {
            return;
        }
        let result = match &self.loader {
            Some(loader) => loader.request(key.clone()),
            None => Err(AssetError::LoaderGone),
        };
        match result {
            Ok(()) => {
                self.pending.insert(key);
            }
            Err(err) => self.record_failure(&key, &err),
        }
    }

    /// Move finished background loads into the cache. Never blocks.
    /// Returns the number of sets cached.
    pub fn poll_loads(&mut self) -> usize {
        let Some(loader) = &self.loader else {
            return 0;
        };
        let results = loader.drain();
        let mut cached = 0;
        for result in results {
            // Dropped by a cache clear while in flight.
            if !self.pending.remove(&result.key) {
                continue;
            }
            match result.outcome {
                Ok(image) => {
                    if self.cache.insert_source(result.key, image) {
                        cached += 1;
                    }
                }
                Err(err) => self.record_failure(&result.key, &err),
            }
        }
        cached
    }

    /// Load `key`'s source image on the calling thread.
    pub fn load_textures_blocking(&mut self, key: TextureKey) -> Result<(), AssetError> {
        if self.cache.contains(&key) {
            return Ok(());
        }
        let image = load_image(&key.source)?;
        self.cache.insert_source(key, image);
        Ok(())
    }

    /// Cache an already decoded source image.
    pub fn insert_source(&mut self, key: TextureKey, image: RgbaImage) -> bool {
        self.pending.remove(&key);
        self.cache.insert_source(key, image)
    }

    /// The texture for `tier`, generating the variant on first demand.
    /// `None` until the source image is cached.
    pub fn texture(&mut self, key: &TextureKey, tier: LodTier) -> Option<&LodTexture> {
        self.cache.texture(key, tier)
    }

    /// The texture cache, read-only.
    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    /// Drop every cached texture set and all per-object tier state.
    /// Queued loads are abandoned; a load already being decoded is
    /// discarded when it arrives.
    pub fn clear_cache(&mut self) {
        let sets = self.cache.len();
        self.cache.clear();
        self.tiers.clear();
        self.pending.clear();
        let abandoned = self.loader.as_ref().map_or(0, AssetLoader::discard_queued);
        info!(sets, abandoned, "LOD cache cleared");
    }

    /// Switch count, tier distribution, and cache and loader counters.
    pub fn stats(&self) -> LodStats {
        let mut distribution = TierDistribution::default();
        for tier in self.tiers.values() {
            match tier {
                LodTier::High => distribution.high += 1,
                LodTier::Medium => distribution.medium += 1,
                LodTier::Low => distribution.low += 1,
            }
        }
        LodStats {
            total_switches: self.switches,
            distribution,
            cache_size: self.cache.len(),
            pending_loads: self.pending.len(),
            load_failures: self.load_failures,
        }
    }

    fn record_failure(&mut self, key: &TextureKey, err: &AssetError) {
        self.load_failures += 1;
        warn!(
            id = %key.id,
            source = %key.source.display(),
            error = %err,
            "LOD texture load failed"
        );
    }
}

impl Default for LodManager {
    fn default() -> Self {
        Self::new(LodThresholds::default())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
