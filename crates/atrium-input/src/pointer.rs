//! Pointer capture and look-target accumulation.
//!
//! [`LookTarget`] holds the yaw/pitch the camera is steering toward. Captured
//! pointer motion and touch drags both feed it; yaw is unbounded while pitch
//! stays inside `±max_pitch`.

use glam::Vec2;

/// Target look angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookTarget {
    yaw: f32,
    pitch: f32,
    max_pitch: f32,
}

impl LookTarget {
    /// Creates a target facing `yaw` with level pitch.
    #[must_use]
    pub fn new(yaw: f32, max_pitch: f32) -> Self {
        Self {
            yaw,
            pitch: 0.0,
            max_pitch: max_pitch.abs(),
        }
    }

    /// Accumulate a pixel delta at the given sensitivity (radians per pixel).
    ///
    /// Moving right turns right (yaw decreases); moving down looks down.
    pub fn accumulate(&mut self, delta: Vec2, sensitivity: f32) {
        if !delta.is_finite() {
            return;
        }
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-self.max_pitch, self.max_pitch);
    }

    /// Current target yaw.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current target pitch, always within `±max_pitch`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// The pitch limit in radians.
    #[must_use]
    pub fn max_pitch(&self) -> f32 {
        self.max_pitch
    }

    /// Change the pitch limit, pulling the current target inside it.
    pub fn set_max_pitch(&mut self, max_pitch: f32) {
        self.max_pitch = max_pitch.abs();
        self.pitch = self.pitch.clamp(-self.max_pitch, self.max_pitch);
    }
}

/// Pointer-lock state plus the motion it gates.
#[derive(Debug, Clone)]
pub struct PointerState {
    captured: bool,
    sensitivity: f32,
}

impl PointerState {
    /// Creates an uncaptured pointer.
    #[must_use]
    pub fn new(sensitivity: f32) -> Self {
        Self {
            captured: false,
            sensitivity,
        }
    }

    /// Records a capture change. Returns `true` if the state actually changed.
    pub fn set_captured(&mut self, captured: bool) -> bool {
        let changed = self.captured != captured;
        self.captured = captured;
        changed
    }

    /// Radians per pixel of captured motion.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Whether the pointer is locked to the view.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Forward raw motion into `target`; ignored while uncaptured.
    pub fn on_motion(&self, target: &mut LookTarget, dx: f64, dy: f64) {
        if self.captured {
            target.accumulate(Vec2::new(dx as f32, dy as f32), self.sensitivity);
        }
    }
}
