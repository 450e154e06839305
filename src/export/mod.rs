//! Flattening the annotated canvas into a PNG raster.
//!
//! This module provides:
//! - [`flatten`]: paint the source image and committed annotations onto a fresh surface
//! - [`encode_png`]: encode a surface with Cairo's PNG writer
//! - [`file`]: filename generation and writing downloads to disk

pub mod file;
pub mod types;

pub use types::{Download, ExportError};

use crate::draw::{Annotation, RenderStyle, SourceImage, render_scene};
use crate::geometry::CanvasSize;

/// Paints the image and committed annotations onto a new surface of `size`.
///
/// The in-progress gesture is never part of the output.
pub fn flatten(
    image: &SourceImage,
    size: CanvasSize,
    annotations: &[Annotation],
    style: &RenderStyle,
) -> Result<cairo::ImageSurface, ExportError> {
    if size.is_empty() {
        return Err(ExportError::EmptyCanvas);
    }

    let surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, size.width as i32, size.height as i32)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_scene(&ctx, Some(image), size, annotations, None, style);
    }
    surface.flush();

    log::debug!(
        "Flattened {} annotations onto {}x{} surface",
        annotations.len(),
        size.width,
        size.height
    );

    Ok(surface)
}

/// Encodes a surface as PNG bytes.
pub fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    surface.write_to_png(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Color, Shape};
    use crate::geometry::Point;
    use image::{Rgba, RgbaImage};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn white_image() -> SourceImage {
        SourceImage::from_rgba(&RgbaImage::from_pixel(20, 10, Rgba([255, 255, 255, 255])))
            .unwrap()
    }

    #[test]
    fn flatten_rejects_empty_canvas() {
        let result = flatten(
            &white_image(),
            CanvasSize::ZERO,
            &[],
            &RenderStyle::default(),
        );
        assert!(matches!(result, Err(ExportError::EmptyCanvas)));
    }

    #[test]
    fn encoded_output_is_png_of_canvas_size() {
        let size = CanvasSize {
            width: 20,
            height: 10,
            scale: 1.0,
        };
        let rect = Annotation::new(
            1,
            Shape::Rectangle {
                start: Point::new(2.0, 2.0),
                end: Point::new(12.0, 8.0),
            },
            Color::new(1.0, 0.0, 0.0, 1.0),
            2,
        );
        let surface = flatten(&white_image(), size, &[rect], &RenderStyle::default()).unwrap();
        let bytes = encode_png(&surface).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 20);
        assert_eq!(decoded.height(), 10);
    }
}
