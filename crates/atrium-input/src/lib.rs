//! Input state tracking: keyboard, pointer, and touch events mapped to movement intents.

pub mod intent;
pub mod keyboard;
pub mod pointer;

pub use intent::{InputSettings, IntentSnapshot, IntentTracker};
pub use keyboard::{Intent, KeyInput, intent_for_key};
pub use pointer::{LookTarget, PointerState};
