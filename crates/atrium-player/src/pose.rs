//! Camera pose: position plus yaw/pitch with roll fixed at zero.

use glam::{Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_3;

/// Hard pitch limit (±60°).
pub const PITCH_LIMIT: f32 = FRAC_PI_3;

/// Position and orientation of the walkthrough camera.
///
/// Orientation is yaw about world Y followed by pitch about the local X axis,
/// so the horizon never tilts. Pitch is kept inside `±PITCH_LIMIT` by every
/// mutator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// World-space eye position.
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Pose {
    /// Creates a pose; pitch is clamped.
    #[must_use]
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Horizontal rotation in radians. Yaw 0 looks down -Z; positive yaw turns left.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Vertical rotation in radians, positive looks up.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Always zero.
    #[must_use]
    pub fn roll(&self) -> f32 {
        0.0
    }

    /// Sets yaw and pitch, clamping pitch.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = clamp_pitch(pitch);
    }

    /// Rotation quaternion: extrinsic yaw, then intrinsic pitch.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// View direction projected onto the floor plane, or zero.
    #[must_use]
    pub fn horizontal_forward(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    }

    /// Camera right axis projected onto the floor plane, or zero.
    #[must_use]
    pub fn horizontal_right(&self) -> Vec3 {
        let r = self.rotation() * Vec3::X;
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    }

    /// World-to-view transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position).inverse()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        0.0
    } else {
        pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
    }
}
