//! Collision resolution: boundary clamp followed by single-pass circle push-out.
//!
//! The resolver is pure: it returns the corrected position together with a
//! [`ContactResponse`] describing how the caller's velocity must be scaled.

use atrium_config::CollisionConfig;
use glam::{Vec2, Vec3};
use tracing::trace;

use crate::collider::{Collider, ColliderClass};

/// Axis-aligned walkable rectangle on the floor plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl BoundaryBox {
    /// Creates a box from its four extents.
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Whether `(x, z)` lies inside or on the boundary.
    pub fn contains(&self, position: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_z..=self.max_z).contains(&position.z)
    }
}

impl Default for BoundaryBox {
    fn default() -> Self {
        let [min_x, max_x, min_z, max_z] = CollisionConfig::default().bounds;
        Self::new(min_x, max_x, min_z, max_z)
    }
}

/// Per-axis velocity scale produced by a resolution step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactResponse {
    /// Multiplier for velocity `x` (`.x`) and velocity `z` (`.y`).
    pub velocity_scale: Vec2,
}

impl ContactResponse {
    /// No contact: velocity unchanged.
    pub const NONE: Self = Self {
        velocity_scale: Vec2::ONE,
    };

    /// Whether any damping applies.
    pub fn is_contact(&self) -> bool {
        self.velocity_scale != Vec2::ONE
    }

    /// Apply the response to a velocity.
    pub fn apply(&self, velocity: Vec3) -> Vec3 {
        Vec3::new(
            velocity.x * self.velocity_scale.x,
            velocity.y,
            velocity.z * self.velocity_scale.y,
        )
    }
}

/// Result of resolving one proposed position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Corrected position, inside the boundary.
    pub position: Vec3,
    /// Velocity damping to feed back into the integrator.
    pub response: ContactResponse,
    /// Number of colliders that pushed the player this step.
    pub contacts: u32,
    /// Whether either axis hit the boundary.
    pub clamped: bool,
}

/// Resolver constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolverParams {
    /// Radius of the player disc.
    pub player_radius: f32,
    /// Walkable rectangle.
    pub bounds: BoundaryBox,
    /// Velocity scale on decoration contact.
    pub decoration_damping: f32,
    /// Velocity scale on catalogued-object contact.
    pub catalogued_damping: f32,
}

impl ResolverParams {
    /// Parameters from the collision config.
    pub fn from_config(config: &CollisionConfig) -> Self {
        let [min_x, max_x, min_z, max_z] = config.bounds;
        Self {
            player_radius: config.player_radius,
            bounds: BoundaryBox::new(min_x, max_x, min_z, max_z),
            decoration_damping: config.decoration_damping,
            catalogued_damping: config.catalogued_damping,
        }
    }
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}

/// Keeps the player disc inside the bounds and out of the colliders.
#[derive(Clone, Debug)]
pub struct CollisionResolver {
    params: ResolverParams,
}

impl CollisionResolver {
    /// Creates a resolver.
    pub fn new(params: ResolverParams) -> Self {
        Self { params }
    }

    /// The resolver constants.
    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Resolve a proposed position against the bounds and `colliders`.
    ///
    /// 1. Clamp each axis to the bounds; a clamped axis zeroes its velocity.
    /// 2. Visit colliders once, in order. Each overlap pushes the disc out
    ///    along the separation vector by the penetration depth and damps both
    ///    velocity axes. Later pushes see the already corrected position.
    /// 3. Clamp again so a push-out cannot leave the walkable area.
    pub fn resolve(&self, proposed: Vec3, colliders: &[Collider]) -> Resolution {
        let mut position = proposed;
        let mut scale = Vec2::ONE;
        let mut clamped = self.clamp_to_bounds(&mut position, &mut scale);

        let mut contacts = 0;
        for collider in colliders {
            if self.push_out(&mut position, collider) {
                let damping = match collider.class() {
                    ColliderClass::Decoration => self.params.decoration_damping,
                    ColliderClass::Catalogued => self.params.catalogued_damping,
                };
                scale *= damping;
                contacts += 1;
            }
        }

        if contacts > 0 {
            clamped |= self.clamp_to_bounds(&mut position, &mut scale);
            trace!(contacts, x = position.x, z = position.z, "pushed out of colliders");
        }

        Resolution {
            position,
            response: ContactResponse {
                velocity_scale: scale,
            },
            contacts,
            clamped,
        }
    }

    fn clamp_to_bounds(&self, position: &mut Vec3, scale: &mut Vec2) -> bool {
        let b = &self.params.bounds;
        let mut clamped = false;
        if position.x < b.min_x || position.x > b.max_x {
            position.x = position.x.clamp(b.min_x, b.max_x);
            scale.x = 0.0;
            clamped = true;
        }
        if position.z < b.min_z || position.z > b.max_z {
            position.z = position.z.clamp(b.min_z, b.max_z);
            scale.y = 0.0;
            clamped = true;
        }
        clamped
    }

    /// Returns `true` if the disc overlapped `collider` and was moved.
    fn push_out(&self, position: &mut Vec3, collider: &Collider) -> bool {
        let player = Vec2::new(position.x, position.z);
        let center = collider.center();
        let offset = player - center;
        let distance = offset.length();
        let min_distance = self.params.player_radius + collider.radius();
        if distance >= min_distance {
            return false;
        }

        // Coincident centers have no separation direction; push along +X.
        let direction = if distance > f32::EPSILON {
            offset / distance
        } else {
            Vec2::X
        };
        let corrected = player + direction * (min_distance - distance);
        position.x = corrected.x;
        position.z = corrected.y;
        true
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(ResolverParams::default())
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
