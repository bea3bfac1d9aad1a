//! Per-display texture sets: the source image plus lazily resampled variants.

use std::path::PathBuf;

use atrium_scene::{DisplayId, LodTier};
use image::RgbaImage;
use image::imageops::FilterType;
use rustc_hash::FxHashMap;

use crate::tier::TierQuality;

/// Cache key: a display and the image it shows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureKey {
    pub id: DisplayId,
    pub source: PathBuf,
}

impl TextureKey {
    pub fn new(id: DisplayId, source: impl Into<PathBuf>) -> Self {
        Self {
            id,
            source: source.into(),
        }
    }
}

/// One tier's raster, optionally with a mip chain.
#[derive(Clone, Debug)]
pub struct LodTexture {
    pub tier: LodTier,
    pub image: RgbaImage,
    /// Successively halved levels below `image`, down to 1×1. Empty when the
    /// tier carries no mipmaps.
    pub mip_chain: Vec<RgbaImage>,
}

impl LodTexture {
    fn build(tier: LodTier, image: RgbaImage) -> Self {
        let mip_chain = if TierQuality::for_tier(tier).mipmaps {
            mip_chain(&image)
        } else {
            Vec::new()
        };
        Self {
            tier,
            image,
            mip_chain,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of mip levels including the base image.
    pub fn mip_levels(&self) -> usize {
        1 + self.mip_chain.len()
    }
}

fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let mut chain: Vec<RgbaImage> = Vec::new();
    let (mut w, mut h) = base.dimensions();
    while w > 1 || h > 1 {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        let previous = chain.last().unwrap_or(base);
        let next = image::imageops::resize(previous, w, h, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

/// The high-resolution texture and its lazily generated medium and low variants.
#[derive(Clone, Debug)]
pub struct LodTextureSet {
    high: LodTexture,
    medium: Option<LodTexture>,
    low: Option<LodTexture>,
}

impl LodTextureSet {
    pub fn new(source: RgbaImage) -> Self {
        Self {
            high: LodTexture::build(LodTier::High, source),
            medium: None,
            low: None,
        }
    }

    /// The cached texture for `tier`, if it exists yet.
    pub fn get(&self, tier: LodTier) -> Option<&LodTexture> {
        match tier {
            LodTier::High => Some(&self.high),
            LodTier::Medium => self.medium.as_ref(),
            LodTier::Low => self.low.as_ref(),
        }
    }

    /// Whether the variant for `tier` has been generated.
    pub fn has(&self, tier: LodTier) -> bool {
        self.get(tier).is_some()
    }

    /// The texture for `tier`, resampling from the high texture on first use.
    /// Returns the texture and whether it was generated by this call.
    pub fn get_or_generate(&mut self, tier: LodTier) -> (&LodTexture, bool) {
        let high = &self.high;
        let slot = match tier {
            LodTier::High => return (high, false),
            LodTier::Medium => &mut self.medium,
            LodTier::Low => &mut self.low,
        };
        let generated = slot.is_none();
        let texture = slot.get_or_insert_with(|| {
            let (w, h) = TierQuality::for_tier(tier).scaled_size(high.width(), high.height());
            let scaled = image::imageops::resize(&high.image, w, h, FilterType::Triangle);
            LodTexture::build(tier, scaled)
        });
        (texture, generated)
    }
}

/// Texture sets keyed by display and source image.
#[derive(Debug, Default)]
pub struct TextureCache {
    sets: FxHashMap<TextureKey, LodTextureSet>,
    variants_generated: u64,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded source image. Returns `false` and keeps the existing
    /// set if the key is already cached.
    pub fn insert_source(&mut self, key: TextureKey, source: RgbaImage) -> bool {
        if self.sets.contains_key(&key) {
            return false;
        }
        self.sets.insert(key, LodTextureSet::new(source));
        true
    }

    pub fn contains(&self, key: &TextureKey) -> bool {
        self.sets.contains_key(key)
    }

    pub fn get(&self, key: &TextureKey) -> Option<&LodTextureSet> {
        self.sets.get(key)
    }

    /// The texture for `tier`, generating and caching the variant on first demand.
    pub fn texture(&mut self, key: &TextureKey, tier: LodTier) -> Option<&LodTexture> {
        let set = self.sets.get_mut(key)?;
        let (texture, generated) = set.get_or_generate(tier);
        if generated {
            self.variants_generated += 1;
        }
        Some(texture)
    }

    /// Number of cached texture sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Total medium/low variants generated since construction.
    pub fn variants_generated(&self) -> u64 {
        self.variants_generated
    }

    /// Drop every texture set.
    pub fn clear(&mut self) {
        self.sets.clear();
    }
}
