//! Frame-loop glue for the Atrium walkthrough.
//!
//! [`Walkthrough`] owns the pose, motion, collision, and visibility state and
//! advances them one frame at a time. Scene content comes from a RON
//! [`SceneLayout`].

pub mod diagnostics;
pub mod layout;
pub mod startup;
pub mod walkthrough;

pub use diagnostics::{Diagnostics, FrameReport};
pub use layout::{DisplaySpec, GALLERY_LAYOUT, LayoutError, SceneLayout};
pub use startup::{load_config, start};
pub use walkthrough::Walkthrough;
