//! Data types for flattening and exporting annotated images.

use thiserror::Error;

/// A flattened image ready to hand to the user.
///
/// Produced by the engine without touching the filesystem; hosts decide
/// where the bytes go (see [`super::file::write_download`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested filename, always ending in `.png`.
    pub filename: String,
    /// PNG-encoded image data.
    pub bytes: Vec<u8>,
}

/// Errors that can occur while flattening or writing an image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image has not finished loading")]
    NotReady,

    #[error("Canvas has zero size")]
    EmptyCanvas,

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("Failed to save image: {0}")]
    Io(#[from] std::io::Error),
}
