//! Decoded source raster held as a Cairo surface.

use image::RgbaImage;

/// The decoded source image, ready to be painted under the annotations.
#[derive(Debug, Clone)]
pub struct SourceImage {
    surface: cairo::ImageSurface,
    width: u32,
    height: u32,
}

impl SourceImage {
    /// Converts straight-alpha RGBA pixels into a Cairo ARGB32 surface.
    ///
    /// Cairo expects premultiplied alpha in native-endian 32-bit words, which is
    /// BGRA byte order on little-endian machines.
    pub fn from_rgba(rgba: &RgbaImage) -> Result<Self, cairo::Error> {
        let (width, height) = rgba.dimensions();
        let stride = cairo::Format::ARgb32.stride_for_width(width)?;
        let stride_len = stride as usize;

        let mut buf = vec![0u8; stride_len * height as usize];
        for (y, row) in rgba.rows().enumerate() {
            let line = &mut buf[y * stride_len..y * stride_len + width as usize * 4];
            for (px, out) in row.zip(line.chunks_exact_mut(4)) {
                let [r, g, b, a] = px.0;
                let premultiply = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
                let word = u32::from_be_bytes([a, premultiply(r), premultiply(g), premultiply(b)]);
                out.copy_from_slice(&word.to_ne_bytes());
            }
        }

        let surface = cairo::ImageSurface::create_for_data(
            buf,
            cairo::Format::ARgb32,
            width as i32,
            height as i32,
            stride,
        )?;

        Ok(Self {
            surface,
            width,
            height,
        })
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Natural (unscaled) width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural (unscaled) height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}
