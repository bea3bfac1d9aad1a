use atrium_culling::{Frustum, FrustumCuller, OcclusionCuller};
use atrium_scene::{DisplayId, DisplayObject};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{Mat4, Vec3};

fn ring_of_displays(count: u32) -> Vec<DisplayObject> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos() * 13.0, 2.6, angle.sin() * 13.0);
            DisplayObject::new(DisplayId(i), position, 2.0)
        })
        .collect()
}

fn camera() -> (Mat4, Mat4) {
    let projection = Mat4::perspective_rh_gl(60f32.to_radians(), 16.0 / 9.0, 0.1, 200.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 1.7, -8.0), Vec3::new(0.0, 1.7, 0.0), Vec3::Y);
    (projection, view)
}

fn bench_plane_extraction(c: &mut Criterion) {
    let (projection, view) = camera();
    let vp = projection * view;
    c.bench_function("frustum_from_view_projection", |bencher| {
        bencher.iter(|| black_box(Frustum::from_view_projection(black_box(&vp))))
    });
}

fn bench_frustum_evaluate(c: &mut Criterion) {
    let (projection, view) = camera();
    let objects = ring_of_displays(17);
    let mut culler = FrustumCuller::new();
    culler.update(&projection, &view);
    c.bench_function("frustum_evaluate_17", |bencher| {
        bencher.iter(|| black_box(culler.evaluate(black_box(&objects))))
    });
}

fn bench_frustum_evaluate_large(c: &mut Criterion) {
    let (projection, view) = camera();
    let objects = ring_of_displays(1_000);
    let mut culler = FrustumCuller::new();
    culler.update(&projection, &view);
    c.bench_function("frustum_evaluate_1000", |bencher| {
        bencher.iter(|| black_box(culler.evaluate(black_box(&objects))))
    });
}

fn bench_occlusion_update(c: &mut Criterion) {
    let mut objects = ring_of_displays(17);
    let mut culler = OcclusionCuller::default();
    culler.assign_walls(&objects);
    let eye = Vec3::new(0.0, 1.7, -8.0);
    let mut yaw = 0.0f32;
    c.bench_function("occlusion_update_17", |bencher| {
        bencher.iter(|| {
            yaw += 0.05;
            let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
            black_box(culler.update(&mut objects, eye, forward))
        })
    });
}

criterion_group!(
    benches,
    bench_plane_extraction,
    bench_frustum_evaluate,
    bench_frustum_evaluate_large,
    bench_occlusion_update,
);
criterion_main!(benches);
