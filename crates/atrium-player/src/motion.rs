//! Motion integrator: intents to velocity via acceleration and friction, velocity to displacement.
//!
//! The integrator owns the persistent velocity. Contact damping from the
//! collision resolver is fed back through [`MotionIntegrator::apply_contact`]
//! so velocity is only ever mutated here.

use atrium_config::MovementConfig;
use atrium_input::IntentSnapshot;
use glam::{Vec2, Vec3};
use tracing::trace;

use crate::pose::Pose;

/// Integration constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    /// Base speed when walking (units/s).
    pub walk_speed: f32,
    /// Base speed when running (units/s).
    pub run_speed: f32,
    /// Pursuit rate toward the target velocity (1/s).
    pub acceleration: f32,
    /// Exponential friction coefficient (1/s).
    pub friction: f32,
    /// Largest step integrated in one call (s).
    pub max_dt: f32,
    /// Horizontal speed cap as a multiple of base speed.
    pub max_speed_factor: f32,
}

impl MotionParams {
    /// Parameters from the movement config.
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            run_speed: config.run_speed,
            acceleration: config.acceleration,
            friction: config.friction,
            max_dt: config.max_frame_dt,
            max_speed_factor: config.max_speed_factor,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

/// Clamp a frame delta to `[0, max_dt]`; zero, negative, or non-finite input yields zero.
#[must_use]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

/// Turns intents into a velocity and a per-frame displacement.
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    params: MotionParams,
    velocity: Vec3,
}

impl MotionIntegrator {
    /// Creates an integrator at rest.
    #[must_use]
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            velocity: Vec3::ZERO,
        }
    }

    /// Current velocity (y is always zero).
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Magnitude of the horizontal velocity.
    #[must_use]
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }

    /// The integration constants.
    #[must_use]
    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Advance one frame and return the position delta.
    ///
    /// Each axis (view-forward and view-right, flattened onto the floor)
    /// pursues its target speed at `acceleration * dt` of the remaining
    /// difference. Axes without a held key only feel friction.
    pub fn integrate(&mut self, intents: &IntentSnapshot, pose: &Pose, dt: f32) -> Vec3 {
        let dt = clamp_dt(dt, self.params.max_dt);
        if dt == 0.0 {
            return Vec3::ZERO;
        }

        let friction = self.params.friction * dt;
        self.velocity.x -= self.velocity.x * friction;
        self.velocity.z -= self.velocity.z * friction;

        let mut direction = Vec2::new(
            axis_input(intents.right, intents.left),
            axis_input(intents.forward, intents.backward),
        );
        if direction.length_squared() > 0.0 {
            direction = direction.normalize();
        }

        let speed = self.base_speed(intents);

        if intents.forward || intents.backward {
            self.pursue(pose.horizontal_forward(), direction.y * speed, dt);
        }
        if intents.left || intents.right {
            self.pursue(pose.horizontal_right(), direction.x * speed, dt);
        }

        let max_speed = speed * self.params.max_speed_factor;
        let horizontal = Vec2::new(self.velocity.x, self.velocity.z);
        if horizontal.length() > max_speed {
            let capped = horizontal.normalize_or_zero() * max_speed;
            self.velocity.x = capped.x;
            self.velocity.z = capped.y;
        }

        trace!(speed = self.horizontal_speed(), "integrated velocity");
        self.velocity * dt
    }

    /// Scale the horizontal velocity per axis after a contact (`x`, `z`).
    pub fn apply_contact(&mut self, scale: Vec2) {
        self.velocity.x *= scale.x;
        self.velocity.z *= scale.y;
    }

    /// Replace the integration constants; velocity is kept.
    pub fn set_params(&mut self, params: MotionParams) {
        self.params = params;
    }

    /// Stop immediately.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    fn base_speed(&self, intents: &IntentSnapshot) -> f32 {
        if intents.run {
            self.params.run_speed
        } else {
            self.params.walk_speed
        }
    }

    fn pursue(&mut self, axis: Vec3, target: f32, dt: f32) {
        if axis == Vec3::ZERO {
            return;
        }
        let diff = target - self.velocity.dot(axis);
        self.velocity += axis * (diff * self.params.acceleration * dt);
    }
}

fn axis_input(positive: bool, negative: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}
