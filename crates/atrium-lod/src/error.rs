use std::path::PathBuf;

/// Errors from loading a display's source image.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a supported image.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decoded image has a zero dimension.
    #[error("image {path} has zero size ({width}x{height})")]
    ZeroDimensions { path: PathBuf, width: u32, height: u32 },

    /// The background loader has shut down.
    #[error("asset loader is not running")]
    LoaderGone,
}
