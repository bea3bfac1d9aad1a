//! Scene layout: display objects and colliders, read from RON.

use std::path::{Path, PathBuf};

use atrium_physics::Collider;
use atrium_scene::{DisplayId, DisplayObject};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The default gallery layout shipped with the crate.
pub const GALLERY_LAYOUT: &str = include_str!("../assets/gallery.ron");

/// Errors from reading a layout file.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The file could not be read.
    #[error("failed to read layout {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid layout, including unknown object kinds.
    #[error("failed to parse layout: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// One wall-mounted display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySpec {
    pub id: u32,
    pub position: Vec3,
    /// Bounding-sphere radius; the configured default when absent.
    #[serde(default)]
    pub radius: Option<f32>,
    /// Source image for the LOD texture cache.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Everything the core reads from the scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    pub displays: Vec<DisplaySpec>,
    pub colliders: Vec<Collider>,
}

impl SceneLayout {
    /// Parse a layout from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, LayoutError> {
        Ok(ron::from_str(source)?)
    }

    /// Read a layout file. Relative image paths are resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut layout = Self::from_ron_str(&contents)?;
        if let Some(base) = path.parent() {
            for display in &mut layout.displays {
                if let Some(image) = display.image.as_mut()
                    && image.is_relative()
                {
                    *image = base.join(&*image);
                }
            }
        }
        tracing::info!(
            path = %path.display(),
            displays = layout.displays.len(),
            colliders = layout.colliders.len(),
            "loaded scene layout"
        );
        Ok(layout)
    }

    /// The built-in gallery.
    pub fn gallery() -> Result<Self, LayoutError> {
        Self::from_ron_str(GALLERY_LAYOUT)
    }

    /// Display objects, visible and high-tier, with `default_radius` filling
    /// in missing radii.
    pub fn display_objects(&self, default_radius: f32) -> Vec<DisplayObject> {
        self.displays
            .iter()
            .map(|display| {
                DisplayObject::new(
                    DisplayId(display.id),
                    display.position,
                    display.radius.unwrap_or(default_radius),
                )
            })
            .collect()
    }

    /// `(id, image)` for every display that names a source image.
    pub fn display_images(&self) -> impl Iterator<Item = (DisplayId, &Path)> {
        self.displays.iter().filter_map(|display| {
            display
                .image
                .as_deref()
                .map(|image| (DisplayId(display.id), image))
        })
    }
}
