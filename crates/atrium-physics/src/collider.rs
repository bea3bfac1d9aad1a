//! Circular obstacles tested against the player disc on the floor plane.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Closed set of catalogued object kinds, each with a fixed collision radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    Sculpture,
    Plant,
    Bench,
    Table,
    Column,
    DisplayCase,
    Wall,
    Podium,
    MonumentalSculpture,
}

impl ObjectKind {
    /// Every kind, in declaration order.
    pub const ALL: [ObjectKind; 9] = [
        ObjectKind::Sculpture,
        ObjectKind::Plant,
        ObjectKind::Bench,
        ObjectKind::Table,
        ObjectKind::Column,
        ObjectKind::DisplayCase,
        ObjectKind::Wall,
        ObjectKind::Podium,
        ObjectKind::MonumentalSculpture,
    ];

    /// Collision radius on the floor plane.
    pub fn radius(self) -> f32 {
        match self {
            ObjectKind::Sculpture => 1.5,
            ObjectKind::Plant => 0.4,
            ObjectKind::Bench => 1.0,
            ObjectKind::Table => 0.8,
            ObjectKind::Column => 0.6,
            ObjectKind::DisplayCase => 1.0,
            ObjectKind::Wall => 2.0,
            ObjectKind::Podium => 0.8,
            ObjectKind::MonumentalSculpture => 1.8,
        }
    }
}

/// Which velocity damping applies on contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColliderClass {
    Decoration,
    Catalogued,
}

/// A static circular obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collider {
    /// A decoration with an explicit radius, centered at `(x, z)`.
    Decoration { x: f32, z: f32, radius: f32 },
    /// A catalogued object whose radius comes from its kind.
    Catalogued { position: Vec3, kind: ObjectKind },
}

impl Collider {
    /// Decoration collider.
    pub fn decoration(x: f32, z: f32, radius: f32) -> Self {
        Collider::Decoration { x, z, radius }
    }

    /// Catalogued object collider.
    pub fn catalogued(position: Vec3, kind: ObjectKind) -> Self {
        Collider::Catalogued { position, kind }
    }

    /// Center on the floor plane as `(x, z)`.
    pub fn center(&self) -> Vec2 {
        match *self {
            Collider::Decoration { x, z, .. } => Vec2::new(x, z),
            Collider::Catalogued { position, .. } => Vec2::new(position.x, position.z),
        }
    }

    /// Collision radius.
    pub fn radius(&self) -> f32 {
        match *self {
            Collider::Decoration { radius, .. } => radius,
            Collider::Catalogued { kind, .. } => kind.radius(),
        }
    }

    /// Damping class.
    pub fn class(&self) -> ColliderClass {
        match self {
            Collider::Decoration { .. } => ColliderClass::Decoration,
            Collider::Catalogued { .. } => ColliderClass::Catalogued,
        }
    }
}
