//! Wall-granularity occlusion: each display object hangs on one of four walls,
//! and an object is shown only while the camera faces its wall or stands close.

use atrium_config::CullingConfig;
use atrium_scene::{DisplayId, DisplayObject};
use glam::Vec3;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// One of the four bounding walls of the room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    Front,
    Back,
    Left,
    Right,
}

impl Wall {
    /// The wall's fixed descriptor.
    pub fn descriptor(self) -> &'static WallDescriptor {
        match self {
            Wall::Front => &WALLS[0],
            Wall::Back => &WALLS[1],
            Wall::Left => &WALLS[2],
            Wall::Right => &WALLS[3],
        }
    }

    /// Lowercase wall name for logs.
    pub fn label(self) -> &'static str {
        self.descriptor().name
    }
}

/// A wall's inward normal and representative point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallDescriptor {
    pub wall: Wall,
    pub name: &'static str,
    pub normal: Vec3,
    pub point: Vec3,
}

/// The four walls, in tie-breaking order.
pub const WALLS: [WallDescriptor; 4] = [
    WallDescriptor {
        wall: Wall::Front,
        name: "front",
        normal: Vec3::Z,
        point: Vec3::new(0.0, 0.0, -13.7),
    },
    WallDescriptor {
        wall: Wall::Back,
        name: "back",
        normal: Vec3::NEG_Z,
        point: Vec3::new(0.0, 0.0, 10.0),
    },
    WallDescriptor {
        wall: Wall::Left,
        name: "left",
        normal: Vec3::X,
        point: Vec3::new(-13.7, 0.0, 0.0),
    },
    WallDescriptor {
        wall: Wall::Right,
        name: "right",
        normal: Vec3::NEG_X,
        point: Vec3::new(13.7, 0.0, 0.0),
    },
];

/// Nearest wall to `position` by distance to each representative point.
/// Ties go to the wall listed first.
pub fn nearest_wall(position: Vec3) -> Wall {
    let mut best = WALLS[0].wall;
    let mut best_distance = f32::INFINITY;
    for descriptor in &WALLS {
        let distance = position.distance(descriptor.point);
        if distance < best_distance {
            best = descriptor.wall;
            best_distance = distance;
        }
    }
    best
}

/// Counts from the last [`OcclusionCuller::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OcclusionStats {
    pub total: usize,
    pub visible: usize,
    pub culled: usize,
    /// `culled / total` as a percentage, 0 for an empty list.
    pub cull_percentage: f32,
    /// Rough estimate: culled objects times draw calls per object.
    pub draw_calls_saved: u32,
}

/// Per-object visible/culled state driven by which wall the camera faces.
#[derive(Clone, Debug)]
pub struct OcclusionCuller {
    threshold: f32,
    close_range: f32,
    draw_calls_per_object: u32,
    assignments: FxHashMap<DisplayId, Wall>,
    stats: OcclusionStats,
}

impl OcclusionCuller {
    /// A culler with no wall assignments yet.
    pub fn new(threshold: f32, close_range: f32, draw_calls_per_object: u32) -> Self {
        Self {
            threshold,
            close_range,
            draw_calls_per_object,
            assignments: FxHashMap::default(),
            stats: OcclusionStats::default(),
        }
    }

    /// Threshold, close range, and draw-call estimate from the culling config.
    pub fn from_config(config: &CullingConfig) -> Self {
        Self::new(
            config.occlusion_threshold,
            config.close_range,
            config.draw_calls_per_object,
        )
    }

    /// Facing threshold a wall's dot product must exceed.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Operator override of the facing threshold.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Take threshold, close range, and draw-call estimate from `config`.
    /// Wall assignments are kept.
    pub fn configure(&mut self, config: &CullingConfig) {
        self.threshold = config.occlusion_threshold;
        self.close_range = config.close_range;
        self.draw_calls_per_object = config.draw_calls_per_object;
    }

    /// Distance under which an object is shown regardless of facing.
    pub fn close_range(&self) -> f32 {
        self.close_range
    }

    /// Assign every not-yet-assigned object to its nearest wall.
    ///
    /// Existing assignments are kept; returns how many were added.
    pub fn assign_walls(&mut self, objects: &[DisplayObject]) -> usize {
        let mut added = 0;
        for object in objects {
            if self.assignments.contains_key(&object.id) {
                continue;
            }
            let wall = nearest_wall(object.position);
            debug!(id = %object.id, wall = wall.label(), "assigned display to wall");
            self.assignments.insert(object.id, wall);
            added += 1;
        }
        if added > 0 {
            info!(added, total = self.assignments.len(), "wall assignment");
        }
        added
    }

    /// Wall assigned to `id`, if any.
    pub fn assigned_wall(&self, id: DisplayId) -> Option<Wall> {
        self.assignments.get(&id).copied()
    }

    /// Number of assigned objects.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    fn facing(&self, wall: Wall, camera_position: Vec3, camera_forward: Vec3) -> f32 {
        let to_wall = (wall.descriptor().point - camera_position).normalize_or_zero();
        camera_forward.dot(to_wall)
    }

    /// Walls whose facing dot product exceeds the threshold, in wall order.
    pub fn visible_walls(&self, camera_position: Vec3, camera_forward: Vec3) -> Vec<Wall> {
        WALLS
            .iter()
            .map(|d| d.wall)
            .filter(|&wall| self.facing(wall, camera_position, camera_forward) > self.threshold)
            .collect()
    }

    /// Whether `object` should be shown. Unassigned objects are visible.
    pub fn is_visible(
        &self,
        object: &DisplayObject,
        camera_position: Vec3,
        camera_forward: Vec3,
    ) -> bool {
        let Some(wall) = self.assigned_wall(object.id) else {
            return true;
        };
        self.facing(wall, camera_position, camera_forward) > self.threshold
            || camera_position.distance(object.position) < self.close_range
    }

    /// Recompute visibility for every object, writing only changed flags.
    ///
    /// The first call after construction or [`reset`](Self::reset) assigns
    /// walls. Returns the number of objects whose flag changed.
    pub fn update(
        &mut self,
        objects: &mut [DisplayObject],
        camera_position: Vec3,
        camera_forward: Vec3,
    ) -> usize {
        if self.assignments.is_empty() {
            self.assign_walls(objects);
        }

        let forward = camera_forward.normalize_or_zero();
        let mut visible = 0;
        let mut changed = 0;
        for object in objects.iter_mut() {
            let show = self.is_visible(object, camera_position, forward);
            if object.visible != show {
                object.visible = show;
                changed += 1;
                debug!(id = %object.id, visible = show, "occlusion state changed");
            }
            visible += usize::from(show);
        }

        let total = objects.len();
        let culled = total - visible;
        self.stats = OcclusionStats {
            total,
            visible,
            culled,
            cull_percentage: if total > 0 {
                culled as f32 / total as f32 * 100.0
            } else {
                0.0
            },
            draw_calls_saved: culled as u32 * self.draw_calls_per_object,
        };
        changed
    }

    /// Counts from the last update.
    pub fn stats(&self) -> OcclusionStats {
        self.stats
    }

    /// Forget all assignments and counters; the next update reassigns.
    pub fn reset(&mut self) {
        self.assignments.clear();
        self.stats = OcclusionStats::default();
        info!("occlusion assignments reset");
    }
}

impl Default for OcclusionCuller {
    fn default() -> Self {
        Self::from_config(&CullingConfig::default())
    }
}

#[cfg(test)]
#[path = "occlusion_tests.rs"]
mod tests;
