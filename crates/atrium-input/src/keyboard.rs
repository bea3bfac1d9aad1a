//! Key events and the key-to-intent table.
//!
//! Physical key codes are used so WASD works the same on every layout. Arrow
//! keys mirror WASD and either Shift key requests running.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event (platform-independent, test-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// The physical key involved.
    pub code: KeyCode,
    /// Whether the key was pressed or released.
    pub state: ElementState,
}

impl KeyInput {
    /// A key-down event.
    pub fn pressed(code: KeyCode) -> Self {
        Self {
            code,
            state: ElementState::Pressed,
        }
    }

    /// A key-up event.
    pub fn released(code: KeyCode) -> Self {
        Self {
            code,
            state: ElementState::Released,
        }
    }

    /// Converts a winit [`KeyEvent`]. Unidentified physical keys yield `None`.
    pub fn from_winit(event: &KeyEvent) -> Option<Self> {
        match event.physical_key {
            PhysicalKey::Code(code) => Some(Self {
                code,
                state: event.state,
            }),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}

/// A discrete movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Run,
}

impl Intent {
    /// The four directional intents.
    pub const DIRECTIONAL: [Intent; 4] = [
        Intent::Forward,
        Intent::Backward,
        Intent::Left,
        Intent::Right,
    ];
}

/// Maps a physical key to the intent it drives, if any.
pub fn intent_for_key(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Intent::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Intent::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Intent::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Intent::Right),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Intent::Run),
        _ => None,
    }
}
