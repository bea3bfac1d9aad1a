//! Intent tracking: raw key, pointer, and touch events folded into movement intents.
//!
//! [`IntentTracker`] is mutated only by input events and read once per frame
//! through [`IntentTracker::snapshot`].

use atrium_config::MovementConfig;
use glam::Vec2;
use tracing::debug;
use winit::event::ElementState;

use crate::keyboard::{Intent, KeyInput, intent_for_key};
use crate::pointer::{LookTarget, PointerState};

/// Read-only view of the current intents handed to the motion integrator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntentSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    /// Target yaw in radians (unbounded).
    pub target_yaw: f32,
    /// Target pitch in radians, within the configured pitch limit.
    pub target_pitch: f32,
}

impl IntentSnapshot {
    /// Whether any directional intent is held.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Tuning for the tracker, usually taken from [`MovementConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    /// Radians per pixel of captured pointer motion.
    pub look_sensitivity: f32,
    /// Radians per pixel of touch drag.
    pub touch_look_sensitivity: f32,
    /// Pitch limit in radians.
    pub max_pitch: f32,
    /// Joystick dead zone per axis.
    pub joystick_deadzone: f32,
    /// Release all intents when pointer capture is lost.
    pub clear_intents_on_capture_loss: bool,
}

impl InputSettings {
    /// Settings derived from the movement config.
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            look_sensitivity: config.look_sensitivity,
            touch_look_sensitivity: config.touch_look_sensitivity,
            max_pitch: config.max_pitch_deg.to_radians(),
            joystick_deadzone: config.joystick_deadzone,
            clear_intents_on_capture_loss: config.clear_intents_on_capture_loss,
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

/// Converts input events into movement intents and look targets.
///
/// Key handling is idempotent: a repeated key-down leaves the intent set.
/// Arrow keys and WASD drive the same flags, so releasing either clears it.
#[derive(Debug, Clone)]
pub struct IntentTracker {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    run: bool,
    look: LookTarget,
    pointer: PointerState,
    settings: InputSettings,
}

impl IntentTracker {
    /// Creates a tracker at rest, looking toward `start_yaw`.
    #[must_use]
    pub fn new(settings: InputSettings, start_yaw: f32) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            run: false,
            look: LookTarget::new(start_yaw, settings.max_pitch),
            pointer: PointerState::new(settings.look_sensitivity),
            settings,
        }
    }

    /// Processes a key event. Keys without an intent are ignored.
    pub fn on_key(&mut self, input: KeyInput) {
        if let Some(intent) = intent_for_key(input.code) {
            self.set_intent(intent, input.state == ElementState::Pressed);
        }
    }

    /// Processes a winit key event.
    pub fn on_key_event(&mut self, event: &winit::event::KeyEvent) {
        if let Some(input) = KeyInput::from_winit(event) {
            self.on_key(input);
        }
    }

    /// Sets one intent flag directly.
    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        let slot = match intent {
            Intent::Forward => &mut self.forward,
            Intent::Backward => &mut self.backward,
            Intent::Left => &mut self.left,
            Intent::Right => &mut self.right,
            Intent::Run => &mut self.run,
        };
        *slot = active;
    }

    /// Raw pointer motion in pixels. Only applied while the pointer is captured.
    pub fn on_pointer_motion(&mut self, dx: f64, dy: f64) {
        self.pointer.on_motion(&mut self.look, dx, dy);
    }

    /// Pointer lock gained or lost.
    ///
    /// Losing capture releases every held intent when configured to, since the
    /// matching key-up events will be delivered elsewhere.
    pub fn on_capture_changed(&mut self, captured: bool) {
        if !self.pointer.set_captured(captured) {
            return;
        }
        debug!(captured, "pointer capture changed");
        if !captured && self.settings.clear_intents_on_capture_loss {
            self.release_all();
        }
    }

    /// Whether the pointer is captured.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.pointer.is_captured()
    }

    /// Virtual joystick position, each axis normalized to `[-1, 1]`, +y pointing down.
    pub fn on_joystick(&mut self, x: f32, y: f32) {
        let dz = self.settings.joystick_deadzone;
        self.forward = y < -dz;
        self.backward = y > dz;
        self.left = x < -dz;
        self.right = x > dz;
    }

    /// Joystick released: clear the directional intents.
    pub fn release_joystick(&mut self) {
        for intent in Intent::DIRECTIONAL {
            self.set_intent(intent, false);
        }
    }

    /// Touch-drag look in pixels. Does not require pointer capture.
    pub fn on_touch_look(&mut self, dx: f32, dy: f32) {
        self.look
            .accumulate(Vec2::new(dx, dy), self.settings.touch_look_sensitivity);
    }

    /// Clears every intent, including run.
    pub fn release_all(&mut self) {
        self.release_joystick();
        self.run = false;
    }

    /// Current intents and look target.
    #[must_use]
    pub fn snapshot(&self) -> IntentSnapshot {
        IntentSnapshot {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            run: self.run,
            target_yaw: self.look.yaw(),
            target_pitch: self.look.pitch(),
        }
    }

    /// The tracker's settings.
    #[must_use]
    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    /// Swap in new settings. Held intents, capture, and the look target are
    /// kept; the target pitch is clamped to the new limit.
    pub fn set_settings(&mut self, settings: InputSettings) {
        self.pointer.set_sensitivity(settings.look_sensitivity);
        self.look.set_max_pitch(settings.max_pitch);
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_3, PI};
    use winit::keyboard::KeyCode;

    fn tracker() -> IntentTracker {
        IntentTracker::new(InputSettings::default(), PI)
    }

    #[test]
    fn test_initial_snapshot_at_rest() {
        let snap = tracker().snapshot();
        assert!(!snap.is_moving());
        assert!(!snap.run);
        assert_eq!(snap.target_yaw, PI);
        assert_eq!(snap.target_pitch, 0.0);
    }

    #[test]
    fn test_key_down_and_up() {
        let mut t = tracker();
        t.on_key(KeyInput::pressed(KeyCode::KeyW));
        assert!(t.snapshot().forward);
        t.on_key(KeyInput::released(KeyCode::KeyW));
        assert!(!t.snapshot().forward);
    }

    #[test]
    fn test_repeated_key_down_is_noop() {
        let mut t = tracker();
        t.on_key(KeyInput::pressed(KeyCode::KeyD));
        let first = t.snapshot();
        t.on_key(KeyInput::pressed(KeyCode::KeyD));
        t.on_key(KeyInput::pressed(KeyCode::KeyD));
        assert_eq!(t.snapshot(), first);
    }

    #[test]
    fn test_shift_sets_run() {
        let mut t = tracker();
        t.on_key(KeyInput::pressed(KeyCode::ShiftRight));
        assert!(t.snapshot().run);
        t.on_key(KeyInput::released(KeyCode::ShiftRight));
        assert!(!t.snapshot().run);
    }

    #[test]
    fn test_opposing_keys_both_held() {
        let mut t = tracker();
        t.on_key(KeyInput::pressed(KeyCode::KeyA));
        t.on_key(KeyInput::pressed(KeyCode::KeyD));
        let snap = t.snapshot();
        assert!(snap.left && snap.right);
    }

    #[test]
    fn test_pointer_motion_requires_capture() {
        let mut t = tracker();
        t.on_pointer_motion(50.0, 0.0);
        assert_eq!(t.snapshot().target_yaw, PI);

        t.on_capture_changed(true);
        t.on_pointer_motion(50.0, 0.0);
        assert!((t.snapshot().target_yaw - (PI - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_target_pitch_clamped() {
        let mut t = tracker();
        t.on_capture_changed(true);
        t.on_pointer_motion(0.0, -5000.0);
        assert!((t.snapshot().target_pitch - FRAC_PI_3).abs() < 1e-5);
    }

    #[test]
    fn test_capture_loss_releases_intents() {
        let mut t = tracker();
        t.on_capture_changed(true);
        t.on_key(KeyInput::pressed(KeyCode::KeyW));
        t.on_key(KeyInput::pressed(KeyCode::ShiftLeft));
        t.on_capture_changed(false);
        let snap = t.snapshot();
        assert!(!snap.is_moving());
        assert!(!snap.run);
    }

    #[test]
    fn test_capture_loss_keeps_intents_when_disabled() {
        let settings = InputSettings {
            clear_intents_on_capture_loss: false,
            ..InputSettings::default()
        };
        let mut t = IntentTracker::new(settings, 0.0);
        t.on_capture_changed(true);
        t.on_key(KeyInput::pressed(KeyCode::KeyW));
        t.on_capture_changed(false);
        assert!(t.snapshot().forward);
    }

    #[test]
    fn test_joystick_deadzone() {
        let mut t = tracker();
        t.on_joystick(0.2, -0.25);
        assert!(!t.snapshot().is_moving());

        t.on_joystick(0.5, -0.8);
        let snap = t.snapshot();
        assert!(snap.forward && snap.right);
        assert!(!snap.backward && !snap.left);

        t.release_joystick();
        assert!(!t.snapshot().is_moving());
    }

    #[test]
    fn test_touch_look_without_capture() {
        let mut t = tracker();
        t.on_touch_look(20.0, 10.0);
        let snap = t.snapshot();
        assert!((snap.target_yaw - (PI - 0.1)).abs() < 1e-6);
        assert!((snap.target_pitch + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_set_settings_keeps_intents_and_clamps_pitch() {
        let mut t = tracker();
        t.set_intent(Intent::Forward, true);
        t.on_capture_changed(true);
        t.on_pointer_motion(0.0, -1.0e4);

        t.set_settings(InputSettings {
            max_pitch: 0.2,
            look_sensitivity: 0.01,
            ..InputSettings::default()
        });
        let snap = t.snapshot();
        assert!(snap.forward);
        assert!((snap.target_pitch - 0.2).abs() < 1e-6);

        t.on_pointer_motion(0.0, 10.0);
        assert!((t.snapshot().target_pitch - 0.1).abs() < 1e-6);
    }
}
