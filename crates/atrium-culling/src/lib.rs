//! Visibility heuristics for display objects: a plane-based view-frustum
//! test and a wall-granularity facing test.

pub mod frustum;
pub mod occlusion;

pub use frustum::{Aabb, Frustum, FrustumComparison, FrustumCuller, FrustumStats, Intersection};
pub use occlusion::{OcclusionCuller, OcclusionStats, WALLS, Wall, WallDescriptor, nearest_wall};
