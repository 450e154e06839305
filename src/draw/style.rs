//! Rendering parameters shared by every annotation.

use super::font::FontDescriptor;
use crate::config::Config;

/// Arrowhead barb base length in pixels; the line width is added per annotation.
pub const DEFAULT_ARROW_HEAD_BASE: f64 = 10.0;
/// Arrowhead barb angle from the shaft, in degrees.
pub const DEFAULT_ARROW_HEAD_ANGLE: f64 = 30.0;
/// Text size in pixels per unit of line width.
pub const DEFAULT_TEXT_SCALE: f64 = 5.0;

/// Style knobs the renderer needs beyond what each annotation stores.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub arrow_head_base: f64,
    pub arrow_head_angle: f64,
    pub text_scale: f64,
    pub font: FontDescriptor,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            arrow_head_base: DEFAULT_ARROW_HEAD_BASE,
            arrow_head_angle: DEFAULT_ARROW_HEAD_ANGLE,
            text_scale: DEFAULT_TEXT_SCALE,
            font: FontDescriptor::default(),
        }
    }
}

impl RenderStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            arrow_head_base: config.arrow.head_base,
            arrow_head_angle: config.arrow.head_angle_degrees,
            text_scale: config.drawing.text_scale,
            font: FontDescriptor::new(
                config.drawing.font_family.clone(),
                config.drawing.font_weight.clone(),
                config.drawing.font_style.clone(),
            ),
        }
    }

    /// Barb length for an arrow drawn at `line_width`.
    pub fn arrow_head_length(&self, line_width: u32) -> f64 {
        self.arrow_head_base + line_width as f64
    }

    /// Font pixel size for text drawn at `line_width`.
    pub fn text_size(&self, line_width: u32) -> f64 {
        line_width as f64 * self.text_scale
    }
}
