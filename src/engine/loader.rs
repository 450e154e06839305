//! Source image loading and the decode readiness gate.

use crate::draw::SourceImage;
use image::{ImageReader, RgbaImage};
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching or decoding the source image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid image location: {0}")]
    InvalidLocation(String),

    #[error("Unsupported image URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to prepare image surface: {0}")]
    Surface(#[from] cairo::Error),
}

/// Decode state of the engine's source image.
///
/// Resolved exactly once; drawing and rendering wait for `Ready`.
#[derive(Debug)]
pub enum ImageState {
    Loading,
    Ready(SourceImage),
    Failed(ImageError),
}

impl ImageState {
    pub fn source(&self) -> Option<&SourceImage> {
        match self {
            ImageState::Ready(image) => Some(image),
            _ => None,
        }
    }
}

/// Something that turns an image location into decoded pixels.
pub trait ImageLoader {
    fn load(&self, location: &str) -> Result<RgbaImage, ImageError>;
}

/// Loads images from local paths or `file://` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageLoader;

impl FileImageLoader {
    /// Maps a location to a filesystem path.
    ///
    /// Plain paths pass through; `file://` URLs are converted. Any other URL
    /// scheme is rejected. Single-letter schemes are Windows drive letters.
    pub fn resolve(location: &str) -> Result<PathBuf, ImageError> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|_| ImageError::InvalidLocation(location.to_string())),
            Ok(url) if url.scheme().len() > 1 => {
                Err(ImageError::UnsupportedScheme(url.scheme().to_string()))
            }
            _ => Ok(PathBuf::from(location)),
        }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, location: &str) -> Result<RgbaImage, ImageError> {
        let path = Self::resolve(location)?;
        log::debug!("Decoding image from {}", path.display());

        let decoded = ImageReader::open(&path)?.with_guessed_format()?.decode()?;
        Ok(decoded.to_rgba8())
    }
}
