//! View-frustum culling against planes extracted from projection × view.
//!
//! Independent of any renderer-side culling so its counts can be checked
//! against a reference test. Planes are rebuilt in full on every update.

use atrium_scene::{DisplayId, DisplayObject};
use glam::{Mat4, Vec3, Vec4};
use tracing::debug;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// An axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of half-size `half` around `center`.
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Three-way result of a volume test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intersection {
    /// Entirely inside all six planes.
    Inside,
    /// Straddles at least one plane.
    Intersecting,
    /// Entirely outside at least one plane.
    Outside,
}

/// Six inward-facing planes: left, right, bottom, top, near, far.
///
/// Each `Vec4(a, b, c, d)` holds a unit normal `(a, b, c)` and offset `d`,
/// so `normal · p + d` is the signed distance of `p` from the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract the planes from a combined projection × view matrix
    /// (Gribb-Hartmann). Assumes OpenGL clip depth `[-1, 1]`.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        planes[NEAR] = rows[3] + rows[2];
        planes[FAR] = rows[3] - rows[2];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 1e-8 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// From separate projection and view transforms.
    pub fn from_projection_view(projection: &Mat4, view: &Mat4) -> Self {
        Self::from_view_projection(&(*projection * *view))
    }

    /// The six planes.
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    fn signed_distance(plane: Vec4, point: Vec3) -> f32 {
        plane.truncate().dot(point) + plane.w
    }

    /// `true` unless the sphere lies fully behind some plane.
    ///
    /// A sphere centred on the eye sits `near` behind the near plane, so it
    /// is visible only when its radius is strictly greater than the near
    /// distance. At exactly `near` rounding in the extracted plane culls it.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|&plane| Self::signed_distance(plane, center) >= -radius)
    }

    /// Inside / intersecting / outside classification of a sphere.
    pub fn classify_sphere(&self, center: Vec3, radius: f32) -> Intersection {
        let mut all_inside = true;
        for &plane in &self.planes {
            let d = Self::signed_distance(plane, center);
            if d < -radius {
                return Intersection::Outside;
            }
            if d < radius {
                all_inside = false;
            }
        }
        if all_inside {
            Intersection::Inside
        } else {
            Intersection::Intersecting
        }
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// p-vertex method: for each plane take the corner furthest along the
    /// normal; if even that corner is behind the plane the box is outside.
    /// Conservative near frustum corners.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        for &plane in &self.planes {
            let normal = plane.truncate();
            let p = Vec3::select(normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
            if Self::signed_distance(plane, p) < 0.0 {
                return false;
            }
        }
        true
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::from_view_projection(&Mat4::IDENTITY)
    }
}

/// Counts from the last [`FrustumCuller::evaluate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrustumStats {
    pub total: usize,
    pub visible: usize,
    pub culled: usize,
}

/// Agreement between the plane test and a reference predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumComparison {
    /// Objects the plane test reports visible.
    pub manual_visible: usize,
    /// Objects the reference predicate reports visible.
    pub reference_visible: usize,
    /// Fraction of objects on which both agree, in `[0, 1]`.
    pub accuracy: f32,
}

/// Frustum culling over a display-object list with visible/culled counts.
#[derive(Clone, Debug, Default)]
pub struct FrustumCuller {
    frustum: Frustum,
    stats: FrustumStats,
}

impl FrustumCuller {
    /// A culler with identity planes until the first [`update`](Self::update).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild all six planes from the camera transforms.
    pub fn update(&mut self, projection: &Mat4, view: &Mat4) {
        self.frustum = Frustum::from_projection_view(projection, view);
    }

    /// Current planes.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Sphere test against the current planes.
    pub fn is_sphere_visible(&self, center: Vec3, radius: f32) -> bool {
        self.frustum.intersects_sphere(center, radius)
    }

    /// Box test against the current planes.
    pub fn is_box_visible(&self, aabb: &Aabb) -> bool {
        self.frustum.intersects_aabb(aabb)
    }

    /// Ids of the objects whose bounding sphere passes, in input order.
    /// Objects themselves are not modified.
    pub fn evaluate(&mut self, objects: &[DisplayObject]) -> Vec<DisplayId> {
        let visible: Vec<DisplayId> = objects
            .iter()
            .filter(|o| self.is_sphere_visible(o.position, o.bounding_radius))
            .map(|o| o.id)
            .collect();

        self.stats = FrustumStats {
            total: objects.len(),
            visible: visible.len(),
            culled: objects.len() - visible.len(),
        };
        visible
    }

    /// Counts from the last evaluation.
    pub fn stats(&self) -> FrustumStats {
        self.stats
    }

    /// Run the plane test and `reference` side by side on every object.
    pub fn compare_with_reference<F>(
        &self,
        objects: &[DisplayObject],
        reference: F,
    ) -> FrustumComparison
    where
        F: Fn(Vec3, f32) -> bool,
    {
        let mut manual_visible = 0;
        let mut reference_visible = 0;
        let mut matches = 0;
        for object in objects {
            let manual = self.is_sphere_visible(object.position, object.bounding_radius);
            let expected = reference(object.position, object.bounding_radius);
            manual_visible += usize::from(manual);
            reference_visible += usize::from(expected);
            matches += usize::from(manual == expected);
        }

        let accuracy = if objects.is_empty() {
            1.0
        } else {
            matches as f32 / objects.len() as f32
        };
        debug!(manual_visible, reference_visible, accuracy, "frustum comparison");

        FrustumComparison {
            manual_visible,
            reference_visible,
            accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Mat4 {
        Mat4::perspective_rh_gl(60f32.to_radians(), 16.0 / 9.0, 0.1, 200.0)
    }

    /// Camera at the origin looking down -Z.
    fn origin_culler() -> FrustumCuller {
        let mut culler = FrustumCuller::new();
        culler.update(&projection(), &Mat4::IDENTITY);
        culler
    }

    fn display(id: u32, position: Vec3) -> DisplayObject {
        DisplayObject::new(DisplayId(id), position, 2.0)
    }

    #[test]
    fn test_planes_are_normalized() {
        let culler = origin_culler();
        for plane in culler.frustum().planes() {
            assert!((plane.truncate().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_ahead_visible() {
        let culler = origin_culler();
        assert!(culler.is_sphere_visible(Vec3::new(0.0, 0.0, -10.0), 1.0));
    }

    #[test]
    fn test_sphere_behind_culled() {
        let culler = origin_culler();
        assert!(!culler.is_sphere_visible(Vec3::new(0.0, 0.0, 10.0), 1.0));
    }

    #[test]
    fn test_sphere_beyond_far_culled() {
        let culler = origin_culler();
        assert!(!culler.is_sphere_visible(Vec3::new(0.0, 0.0, -250.0), 1.0));
        assert!(culler.is_sphere_visible(Vec3::new(0.0, 0.0, -199.5), 1.0));
    }

    #[test]
    fn test_sphere_off_to_side_culled() {
        let culler = origin_culler();
        assert!(!culler.is_sphere_visible(Vec3::new(100.0, 0.0, -10.0), 1.0));
        assert!(!culler.is_sphere_visible(Vec3::new(0.0, 50.0, -10.0), 1.0));
    }

    #[test]
    fn test_sphere_straddling_edge_visible() {
        let culler = origin_culler();
        // Horizontal half-angle is about 45.8 degrees; x = 10 at depth 10 is
        // just outside the edge but the radius reaches back in.
        assert!(culler.is_sphere_visible(Vec3::new(10.7, 0.0, -10.0), 1.0));
    }

    #[test]
    fn test_sphere_at_camera_is_visible() {
        // Holds whenever the radius reaches past the near plane.
        let proj = projection();
        for (eye, target) in [
            (Vec3::ZERO, Vec3::NEG_Z),
            (Vec3::new(0.0, 1.7, -8.0), Vec3::new(0.0, 1.7, 0.0)),
            (Vec3::new(5.0, 1.7, 3.0), Vec3::new(-2.0, 2.0, 1.0)),
        ] {
            let mut culler = FrustumCuller::new();
            culler.update(&proj, &Mat4::look_at_rh(eye, target, Vec3::Y));
            assert!(culler.is_sphere_visible(eye, 0.5), "eye {eye}");
        }
    }

    #[test]
    fn test_sphere_at_camera_needs_radius_past_near() {
        // near = 0.1
        let culler = origin_culler();
        for radius in [0.05, 0.09, 0.1] {
            assert!(!culler.is_sphere_visible(Vec3::ZERO, radius), "radius {radius}");
        }
        for radius in [0.101, 0.11, 0.5] {
            assert!(culler.is_sphere_visible(Vec3::ZERO, radius), "radius {radius}");
        }
    }

    #[test]
    fn test_classify_sphere() {
        let frustum = origin_culler().frustum().clone();
        assert_eq!(
            frustum.classify_sphere(Vec3::new(0.0, 0.0, -50.0), 1.0),
            Intersection::Inside
        );
        assert_eq!(
            frustum.classify_sphere(Vec3::new(0.0, 0.0, -0.5), 1.0),
            Intersection::Intersecting
        );
        assert_eq!(
            frustum.classify_sphere(Vec3::new(0.0, 0.0, 50.0), 1.0),
            Intersection::Outside
        );
    }

    #[test]
    fn test_aabb_inside_and_outside() {
        let culler = origin_culler();
        let ahead = Aabb::from_center(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE);
        let behind = Aabb::from_center(Vec3::new(0.0, 0.0, 10.0), Vec3::ONE);
        assert!(culler.is_box_visible(&ahead));
        assert!(!culler.is_box_visible(&behind));
    }

    #[test]
    fn test_aabb_straddling_near_plane_visible() {
        let culler = origin_culler();
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(culler.is_box_visible(&aabb));
        assert_eq!(aabb.center(), Vec3::ZERO);
    }

    #[test]
    fn test_update_replaces_planes() {
        let mut culler = origin_culler();
        let target = Vec3::new(0.0, 0.0, 10.0);
        assert!(!culler.is_sphere_visible(target, 1.0));

        // Turn around.
        culler.update(
            &projection(),
            &Mat4::look_at_rh(Vec3::ZERO, Vec3::Z, Vec3::Y),
        );
        assert!(culler.is_sphere_visible(target, 1.0));
    }

    #[test]
    fn test_evaluate_counts_and_order() {
        let mut culler = origin_culler();
        let objects = [
            display(0, Vec3::new(0.0, 1.0, -9.8)),
            display(1, Vec3::new(0.0, 1.0, 9.8)),
            display(2, Vec3::new(-3.0, 1.0, -12.0)),
            display(3, Vec3::new(90.0, 1.0, -5.0)),
        ];
        let visible = culler.evaluate(&objects);
        assert_eq!(visible, vec![DisplayId(0), DisplayId(2)]);
        assert_eq!(
            culler.stats(),
            FrustumStats {
                total: 4,
                visible: 2,
                culled: 2
            }
        );
        // Evaluation does not touch the objects' own flags.
        assert!(objects.iter().all(|o| o.visible));
    }

    #[test]
    fn test_evaluate_empty_list() {
        let mut culler = origin_culler();
        assert!(culler.evaluate(&[]).is_empty());
        assert_eq!(culler.stats(), FrustumStats::default());
    }

    #[test]
    fn test_compare_with_identical_reference() {
        let culler = origin_culler();
        let objects: Vec<_> = (0..8)
            .map(|i| display(i, Vec3::new(i as f32 * 4.0 - 16.0, 1.0, -6.0)))
            .collect();
        let frustum = culler.frustum().clone();
        let cmp = culler.compare_with_reference(&objects, |c, r| frustum.intersects_sphere(c, r));
        assert_eq!(cmp.manual_visible, cmp.reference_visible);
        assert_eq!(cmp.accuracy, 1.0);
    }

    #[test]
    fn test_compare_with_disagreeing_reference() {
        let culler = origin_culler();
        let objects = [
            display(0, Vec3::new(0.0, 0.0, -10.0)),
            display(1, Vec3::new(0.0, 0.0, 10.0)),
        ];
        let cmp = culler.compare_with_reference(&objects, |_, _| true);
        assert_eq!(cmp.manual_visible, 1);
        assert_eq!(cmp.reference_visible, 2);
        assert!((cmp.accuracy - 0.5).abs() < 1e-6);
    }
}
