//! The simulation context owned by the frame loop.
//!
//! Each [`Walkthrough::step`] runs, in order: intent snapshot, motion
//! integration, look smoothing, collision resolution with contact feedback,
//! head bob, then the throttled visibility and quality passes.

use std::path::Path;

use atrium_config::{Config, ConfigError};
use atrium_culling::{FrustumCuller, OcclusionCuller};
use atrium_input::{InputSettings, IntentTracker};
use atrium_lod::{LodManager, TextureKey};
use atrium_physics::{Collider, CollisionResolver, ResolverParams};
use atrium_player::{HeadBob, LookSmoother, MotionIntegrator, MotionParams, Pose};
use atrium_scene::{DisplayId, DisplayObject};
use glam::{Mat4, Vec3};
use tracing::{info, warn};

use crate::diagnostics::{Diagnostics, FrameReport};
use crate::layout::SceneLayout;

/// Run a pass every `every` frames; 0 behaves like 1.
fn due(frame: u64, every: u32) -> bool {
    frame % u64::from(every.max(1)) == 0
}

/// Camera, player, scene and the three visibility/quality components.
pub struct Walkthrough {
    config: Config,
    input: IntentTracker,
    pose: Pose,
    motion: MotionIntegrator,
    look: LookSmoother,
    head_bob: HeadBob,
    resolver: CollisionResolver,
    colliders: Vec<Collider>,
    displays: Vec<DisplayObject>,
    frustum: FrustumCuller,
    frustum_visible: Vec<DisplayId>,
    occlusion: OcclusionCuller,
    lod: LodManager,
    aspect: f32,
    frame: u64,
    hitches: u64,
}

impl Walkthrough {
    /// Build the context at the configured spawn point. Displays that name a
    /// source image get a background texture load.
    pub fn new(config: Config, layout: &SceneLayout) -> Self {
        let camera = &config.camera;
        let pose = Pose::new(Vec3::from_array(camera.start_position), camera.start_yaw, 0.0);

        let mut lod = LodManager::from_config(&config.lod);
        if layout.display_images().next().is_some() {
            lod = lod.with_background_loader();
        }
        for (id, image) in layout.display_images() {
            lod.request_textures(TextureKey::new(id, image));
        }

        let displays = layout.display_objects(config.culling.display_radius);
        info!(
            displays = displays.len(),
            colliders = layout.colliders.len(),
            "walkthrough ready"
        );

        Self {
            input: IntentTracker::new(
                InputSettings::from_config(&config.movement),
                camera.start_yaw,
            ),
            pose,
            motion: MotionIntegrator::new(MotionParams::from_config(&config.movement)),
            look: LookSmoother::new(config.movement.look_smoothing),
            head_bob: HeadBob::new(config.head_bob.clone(), camera.eye_height),
            resolver: CollisionResolver::new(ResolverParams::from_config(&config.collision)),
            colliders: layout.colliders.clone(),
            displays,
            frustum: FrustumCuller::new(),
            frustum_visible: Vec::new(),
            occlusion: OcclusionCuller::from_config(&config.culling),
            lod,
            aspect: 16.0 / 9.0,
            frame: 0,
            hitches: 0,
            config,
        }
    }

    /// Input events go here.
    pub fn input_mut(&mut self) -> &mut IntentTracker {
        &mut self.input
    }

    pub fn input(&self) -> &IntentTracker {
        &self.input
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn displays(&self) -> &[DisplayObject] {
        &self.displays
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Ids that passed the last frustum pass.
    pub fn frustum_visible(&self) -> &[DisplayId] {
        &self.frustum_visible
    }

    pub fn occlusion(&self) -> &OcclusionCuller {
        &self.occlusion
    }

    pub fn occlusion_mut(&mut self) -> &mut OcclusionCuller {
        &mut self.occlusion
    }

    pub fn lod(&self) -> &LodManager {
        &self.lod
    }

    pub fn lod_mut(&mut self) -> &mut LodManager {
        &mut self.lod
    }

    /// Viewport width over height. Non-positive or non-finite values are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn projection(&self) -> Mat4 {
        let camera = &self.config.camera;
        Mat4::perspective_rh_gl(
            camera.fov_y_deg.to_radians(),
            self.aspect,
            camera.near,
            camera.far,
        )
    }

    /// Push a changed config into every component.
    ///
    /// Pose, velocity, held intents, wall assignments and cached textures
    /// survive. Spawn settings and the default display radius only apply to
    /// new walkthroughs.
    pub fn apply_config(&mut self, config: Config) {
        self.input.set_settings(InputSettings::from_config(&config.movement));
        self.motion.set_params(MotionParams::from_config(&config.movement));
        self.look = LookSmoother::new(config.movement.look_smoothing);
        self.head_bob.set_config(config.head_bob.clone(), config.camera.eye_height);
        self.resolver = CollisionResolver::new(ResolverParams::from_config(&config.collision));
        self.occlusion.configure(&config.culling);
        self.lod.configure(&config.lod);
        info!("walkthrough config applied");
        self.config = config;
    }

    /// Re-read `config.ron` from `config_dir` and apply it if it changed.
    /// Returns whether anything was applied.
    pub fn reload_config(&mut self, config_dir: &Path) -> Result<bool, ConfigError> {
        match self.config.reload(config_dir)? {
            Some(config) => {
                self.apply_config(config);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the display list. Wall assignments are dropped so the next
    /// occlusion pass reassigns.
    pub fn set_displays(&mut self, displays: Vec<DisplayObject>) {
        self.displays = displays;
        self.frustum_visible.clear();
        self.occlusion.reset();
    }

    /// Advance one frame by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        let max_dt = self.motion.params().max_dt;
        if dt.is_finite() && dt > max_dt {
            self.hitches += 1;
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                dt * 1000.0,
                max_dt * 1000.0
            );
        }
        let dt = atrium_player::clamp_dt(dt, max_dt);

        let intents = self.input.snapshot();
        let delta = self.motion.integrate(&intents, &self.pose, dt);
        self.look.apply(&mut self.pose, &intents, dt);

        let resolution = self.resolver.resolve(self.pose.position + delta, &self.colliders);
        self.pose.position = resolution.position;
        self.motion.apply_contact(resolution.response.velocity_scale);
        self.pose.position.y = self.head_bob.update(self.motion.velocity(), dt);

        let frame = self.frame;
        let culling = &self.config.culling;
        let frustum_ran = due(frame, culling.frustum_every_n_frames);
        let occlusion_ran = due(frame, culling.occlusion_every_n_frames);
        let lod_ran = due(frame, culling.lod_every_n_frames);

        if frustum_ran {
            self.run_frustum();
        }
        let visibility_changes = if occlusion_ran { self.run_occlusion() } else { 0 };
        let tier_switches = if lod_ran { self.run_lod() } else { 0 };
        self.lod.poll_loads();

        self.frame += 1;
        FrameReport {
            frame,
            dt,
            position: self.pose.position,
            velocity: self.motion.velocity(),
            contacts: resolution.contacts,
            clamped: resolution.clamped,
            frustum_ran,
            occlusion_ran,
            lod_ran,
            visibility_changes,
            tier_switches,
        }
    }

    /// Run the frustum, occlusion and LOD passes now, regardless of cadence.
    pub fn evaluate_visibility(&mut self) {
        self.run_frustum();
        self.run_occlusion();
        self.run_lod();
    }

    fn run_frustum(&mut self) {
        let projection = self.projection();
        self.frustum.update(&projection, &self.pose.view_matrix());
        self.frustum_visible = self.frustum.evaluate(&self.displays);
    }

    fn run_occlusion(&mut self) -> usize {
        self.occlusion
            .update(&mut self.displays, self.pose.position, self.pose.forward())
    }

    fn run_lod(&mut self) -> u64 {
        self.lod.update_all(&mut self.displays, self.pose.position)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            frames: self.frame,
            position: self.pose.position,
            yaw: self.pose.yaw(),
            pitch: self.pose.pitch(),
            speed: self.motion.horizontal_speed(),
            frustum: self.frustum.stats(),
            occlusion: self.occlusion.stats(),
            lod: self.lod.stats(),
            hitches: self.hitches,
        }
    }
}

#[cfg(test)]
#[path = "walkthrough_tests.rs"]
mod tests;
