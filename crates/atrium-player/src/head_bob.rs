//! Walking head bob: a vertical eye-height oscillation while moving.

use atrium_config::HeadBobConfig;
use glam::Vec3;

/// Horizontal speed on either axis above which the player counts as walking.
const WALKING_THRESHOLD: f32 = 0.1;

/// Eye-height oscillation driven by horizontal velocity.
#[derive(Clone, Debug)]
pub struct HeadBob {
    config: HeadBobConfig,
    eye_height: f32,
    phase: f32,
    height: f32,
}

impl HeadBob {
    /// Starts at rest at `eye_height`.
    #[must_use]
    pub fn new(config: HeadBobConfig, eye_height: f32) -> Self {
        Self {
            config,
            eye_height,
            phase: 0.0,
            height: eye_height,
        }
    }

    /// Advance by `dt` and return the eye height for this frame.
    pub fn update(&mut self, velocity: Vec3, dt: f32) -> f32 {
        if !self.config.enabled {
            self.height = self.eye_height;
            return self.height;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return self.height;
        }

        let walking = velocity.x.abs() > WALKING_THRESHOLD || velocity.z.abs() > WALKING_THRESHOLD;
        if walking {
            self.phase += dt * self.config.frequency;
            self.height = self.eye_height + (self.phase * 2.0).sin() * self.config.amplitude;
        } else {
            let t = (dt * self.config.settle_rate).min(1.0);
            self.height += (self.eye_height - self.height) * t;
        }
        self.height
    }

    /// Replace the bob parameters and resting eye height. The phase is kept
    /// and the height moves on the next update.
    pub fn set_config(&mut self, config: HeadBobConfig, eye_height: f32) {
        self.config = config;
        self.eye_height = eye_height;
    }

    /// Eye height from the last update.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_still_keeps_eye_height() {
        let mut bob = HeadBob::new(HeadBobConfig::default(), 1.7);
        for _ in 0..10 {
            assert!((bob.update(Vec3::ZERO, 1.0 / 60.0) - 1.7).abs() < 1e-6);
        }
    }

    #[test]
    fn test_walking_oscillates_within_amplitude() {
        let config = HeadBobConfig::default();
        let mut bob = HeadBob::new(config.clone(), 1.7);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..120 {
            let h = bob.update(Vec3::new(0.0, 0.0, -2.0), 1.0 / 60.0);
            min = min.min(h);
            max = max.max(h);
        }
        assert!(max > 1.7 && min < 1.7);
        assert!(max <= 1.7 + config.amplitude + 1e-6);
        assert!(min >= 1.7 - config.amplitude - 1e-6);
    }

    #[test]
    fn test_settles_back_after_stopping() {
        let mut bob = HeadBob::new(HeadBobConfig::default(), 1.7);
        for _ in 0..10 {
            bob.update(Vec3::new(3.0, 0.0, 0.0), 1.0 / 60.0);
        }
        for _ in 0..300 {
            bob.update(Vec3::ZERO, 1.0 / 60.0);
        }
        assert!((bob.height() - 1.7).abs() < 1e-4);
    }

    #[test]
    fn test_disabled_pins_height() {
        let config = HeadBobConfig {
            enabled: false,
            ..Default::default()
        };
        let mut bob = HeadBob::new(config, 1.6);
        assert_eq!(bob.update(Vec3::new(5.0, 0.0, 5.0), 0.016), 1.6);
    }
}
