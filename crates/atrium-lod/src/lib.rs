//! Distance-based level of detail for display objects.
//!
//! Each display's tier is derived from its distance to the camera and kept as
//! telemetry. Source images are decoded once (optionally on a background
//! thread); medium and low variants are resampled only when first asked for.

pub mod cache;
pub mod error;
pub mod loader;
pub mod manager;
pub mod tier;

pub use cache::{LodTexture, LodTextureSet, TextureCache, TextureKey};
pub use error::AssetError;
pub use loader::{AssetLoader, LoadResult, load_image};
pub use manager::{LodManager, LodStats, TierDistribution};
pub use tier::{LodThresholds, TierQuality};
