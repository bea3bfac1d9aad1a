//! Frame-rate independent smoothing of the view angles toward their targets.

use atrium_input::IntentSnapshot;

use crate::pose::Pose;

/// Fraction of the remaining angle covered this frame.
///
/// `smoothing` is the fraction covered per 60 Hz frame; the result is
/// `1 - (1 - smoothing)^(dt * 60)` so two half-length frames cover the same
/// angle as one full-length frame.
#[must_use]
pub fn smoothing_factor(smoothing: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    let smoothing = smoothing.clamp(0.0, 1.0);
    1.0 - (1.0 - smoothing).powf(dt * 60.0)
}

/// Eases a pose's yaw and pitch toward the look target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookSmoother {
    smoothing: f32,
}

impl LookSmoother {
    /// `smoothing` in `[0, 1]`; 1 snaps instantly, 0 never moves.
    #[must_use]
    pub fn new(smoothing: f32) -> Self {
        Self { smoothing }
    }

    /// Moves the pose orientation toward the intent targets.
    pub fn apply(&self, pose: &mut Pose, intents: &IntentSnapshot, dt: f32) {
        let t = smoothing_factor(self.smoothing, dt);
        let yaw = pose.yaw() + (intents.target_yaw - pose.yaw()) * t;
        let pitch = pose.pitch() + (intents.target_pitch - pose.pitch()) * t;
        pose.set_orientation(yaw, pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::PITCH_LIMIT;
    use glam::Vec3;

    fn target(yaw: f32, pitch: f32) -> IntentSnapshot {
        IntentSnapshot {
            target_yaw: yaw,
            target_pitch: pitch,
            ..Default::default()
        }
    }

    #[test]
    fn test_factor_at_one_frame_equals_smoothing() {
        assert!((smoothing_factor(0.3, 1.0 / 60.0) - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_factor_zero_for_degenerate_dt() {
        assert_eq!(smoothing_factor(0.3, 0.0), 0.0);
        assert_eq!(smoothing_factor(0.3, -1.0), 0.0);
    }

    #[test]
    fn test_frame_rate_independent() {
        let smoother = LookSmoother::new(0.3);
        let goal = target(1.0, 0.0);

        let mut coarse = Pose::default();
        smoother.apply(&mut coarse, &goal, 1.0 / 30.0);

        let mut fine = Pose::default();
        smoother.apply(&mut fine, &goal, 1.0 / 60.0);
        smoother.apply(&mut fine, &goal, 1.0 / 60.0);

        assert!((coarse.yaw() - fine.yaw()).abs() < 1e-5);
    }

    #[test]
    fn test_converges_to_target() {
        let smoother = LookSmoother::new(0.3);
        let mut pose = Pose::default();
        for _ in 0..200 {
            smoother.apply(&mut pose, &target(2.0, 0.5), 1.0 / 60.0);
        }
        assert!((pose.yaw() - 2.0).abs() < 1e-4);
        assert!((pose.pitch() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_stays_in_range_for_any_target() {
        let smoother = LookSmoother::new(1.0);
        let mut pose = Pose::new(Vec3::ZERO, 0.0, 0.0);
        for pitch in [-10.0, -1.2, 0.0, 1.2, 10.0] {
            smoother.apply(&mut pose, &target(0.0, pitch), 0.1);
            assert!(pose.pitch().abs() <= PITCH_LIMIT + 1e-6);
            assert_eq!(pose.roll(), 0.0);
        }
    }
}
