use super::*;
use crate::collider::ObjectKind;

fn resolver() -> CollisionResolver {
    CollisionResolver::default()
}

fn floor_distance(a: Vec3, b: Vec2) -> f32 {
    Vec2::new(a.x, a.z).distance(b)
}

#[test]
fn test_free_position_is_untouched() {
    let r = resolver().resolve(Vec3::new(1.0, 1.7, 2.0), &[]);
    assert_eq!(r.position, Vec3::new(1.0, 1.7, 2.0));
    assert_eq!(r.response, ContactResponse::NONE);
    assert_eq!(r.contacts, 0);
    assert!(!r.clamped);
}

#[test]
fn test_clamps_each_axis_and_zeroes_its_velocity() {
    let r = resolver().resolve(Vec3::new(20.0, 1.7, 0.0), &[]);
    assert_eq!(r.position.x, 13.2);
    assert_eq!(r.response.velocity_scale, Vec2::new(0.0, 1.0));
    assert!(r.clamped);

    let r = resolver().resolve(Vec3::new(0.0, 1.7, -30.0), &[]);
    assert_eq!(r.position.z, -13.4);
    assert_eq!(r.response.velocity_scale, Vec2::new(1.0, 0.0));

    let r = resolver().resolve(Vec3::new(-50.0, 1.7, 50.0), &[]);
    assert_eq!(r.position.x, -13.2);
    assert_eq!(r.position.z, 11.0);
    assert_eq!(r.response.velocity_scale, Vec2::ZERO);
}

#[test]
fn test_height_is_preserved() {
    let colliders = [Collider::decoration(0.0, 0.0, 1.0)];
    let r = resolver().resolve(Vec3::new(0.5, 2.3, 0.0), &colliders);
    assert_eq!(r.position.y, 2.3);
}

#[test]
fn test_push_out_leaves_no_penetration() {
    let colliders = [Collider::catalogued(Vec3::new(0.0, 0.0, 0.0), ObjectKind::Sculpture)];
    let r = resolver().resolve(Vec3::new(1.0, 1.7, 0.0), &colliders);
    let min = 0.5 + ObjectKind::Sculpture.radius();
    assert!(floor_distance(r.position, Vec2::ZERO) >= min - 1e-4);
    assert!((r.position.x - min).abs() < 1e-4);
    assert_eq!(r.position.z, 0.0);
    assert_eq!(r.contacts, 1);
}

#[test]
fn test_damping_by_collider_class() {
    let r = resolver().resolve(Vec3::new(0.5, 1.7, 0.0), &[Collider::decoration(0.0, 0.0, 0.5)]);
    assert_eq!(r.response.velocity_scale, Vec2::splat(0.5));

    let r = resolver().resolve(
        Vec3::new(0.5, 1.7, 0.0),
        &[Collider::catalogued(Vec3::ZERO, ObjectKind::Plant)],
    );
    assert!((r.response.velocity_scale - Vec2::splat(0.3)).length() < 1e-6);
}

#[test]
fn test_touching_exactly_is_not_a_contact() {
    let r = resolver().resolve(Vec3::new(1.5, 1.7, 0.0), &[Collider::decoration(0.0, 0.0, 1.0)]);
    assert_eq!(r.contacts, 0);
    assert_eq!(r.position.x, 1.5);
}

#[test]
fn test_coincident_center_pushes_along_x() {
    let r = resolver().resolve(Vec3::new(2.0, 1.7, 3.0), &[Collider::decoration(2.0, 3.0, 1.0)]);
    assert!(r.position.is_finite());
    assert!((r.position.x - 3.5).abs() < 1e-5);
    assert_eq!(r.position.z, 3.0);
}

#[test]
fn test_resolve_is_idempotent_for_single_collider() {
    let colliders = [Collider::catalogued(Vec3::new(3.0, 0.0, -2.0), ObjectKind::Bench)];
    let first = resolver().resolve(Vec3::new(3.4, 1.7, -1.6), &colliders);
    let second = resolver().resolve(first.position, &colliders);
    assert!((first.position - second.position).length() < 1e-4);
}

#[test]
fn test_stacked_colliders_resolve_in_order() {
    // The second push sees the position corrected by the first.
    let colliders = [
        Collider::decoration(0.0, 0.0, 1.0),
        Collider::decoration(1.2, 0.0, 0.4),
    ];
    let r = resolver().resolve(Vec3::new(0.5, 1.7, 0.0), &colliders);
    assert_eq!(r.contacts, 2);
    assert!(floor_distance(r.position, Vec2::new(1.2, 0.0)) >= 0.9 - 1e-4);
    assert_eq!(r.response.velocity_scale, Vec2::splat(0.25));
}

#[test]
fn test_push_out_never_leaves_bounds() {
    let colliders = [Collider::decoration(13.0, 0.0, 1.0)];
    let r = resolver().resolve(Vec3::new(13.1, 1.7, 0.0), &colliders);
    assert_eq!(r.position.x, 13.2);
    assert_eq!(r.response.velocity_scale.x, 0.0);
    assert!(r.clamped);
}

#[test]
fn test_positions_always_inside_bounds() {
    let resolver = resolver();
    let bounds = resolver.params().bounds;
    let colliders = [
        Collider::catalogued(Vec3::new(-12.0, 0.0, -12.0), ObjectKind::Column),
        Collider::catalogued(Vec3::new(0.0, 0.0, 0.0), ObjectKind::MonumentalSculpture),
        Collider::decoration(12.5, 10.5, 1.5),
    ];
    for ix in -20..=20 {
        for iz in -20..=20 {
            let proposed = Vec3::new(ix as f32, 1.7, iz as f32);
            let r = resolver.resolve(proposed, &colliders);
            assert!(bounds.contains(r.position), "{proposed} -> {}", r.position);
        }
    }
}

#[test]
fn test_custom_params_from_config() {
    let config = atrium_config::CollisionConfig {
        player_radius: 1.0,
        bounds: [-1.0, 1.0, -2.0, 2.0],
        decoration_damping: 0.9,
        catalogued_damping: 0.1,
    };
    let resolver = CollisionResolver::new(ResolverParams::from_config(&config));
    let r = resolver.resolve(Vec3::new(5.0, 0.0, 5.0), &[]);
    assert_eq!(r.position, Vec3::new(1.0, 0.0, 2.0));
}

#[test]
fn test_response_apply_keeps_vertical() {
    let response = ContactResponse {
        velocity_scale: Vec2::new(0.0, 0.5),
    };
    assert_eq!(
        response.apply(Vec3::new(2.0, 1.0, 4.0)),
        Vec3::new(0.0, 1.0, 2.0)
    );
    assert!(response.is_contact());
    assert!(!ContactResponse::NONE.is_contact());
}
