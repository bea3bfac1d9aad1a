//! Player-versus-scene collision: circular colliders inside a walkable rectangle.

pub mod collider;
pub mod resolver;

pub use collider::{Collider, ColliderClass, ObjectKind};
pub use resolver::{BoundaryBox, CollisionResolver, ContactResponse, Resolution, ResolverParams};
