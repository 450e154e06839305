//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool defaults when an editing session starts. Hosts can
/// change color and line width at runtime.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default stroke color - a named color (red, green, blue, yellow, white, black),
    /// a hex string like `"#ff0000"`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1 - `max_line_width`)
    #[serde(default = "default_line_width")]
    pub default_line_width: u32,

    /// Largest stroke width a session accepts (valid range: 1 - 200)
    #[serde(default = "default_max_line_width")]
    pub max_line_width: u32,

    /// Text size in pixels per unit of line width (valid range: 1.0 - 20.0)
    #[serde(default = "default_text_scale")]
    pub text_scale: f64,

    /// Font family name for text annotations (e.g., "Sans", "DejaVu Sans")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_line_width: default_line_width(),
            max_line_width: default_max_line_width(),
            text_scale: default_text_scale(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Arrow drawing settings.
///
/// Barb length is `head_base + line_width` pixels.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Barb length before the line width is added (valid range: 0.0 - 100.0)
    #[serde(default = "default_arrow_head_base")]
    pub head_base: f64,

    /// Barb angle from the shaft in degrees (valid range: 10.0 - 80.0)
    #[serde(default = "default_arrow_head_angle")]
    pub head_angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            head_base: default_arrow_head_base(),
            head_angle_degrees: default_arrow_head_angle(),
        }
    }
}

/// Where downloads land when written by a file-based host.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for downloaded images (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Default filename template (chrono format specifiers, no extension)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

/// Performance tuning options.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Maximum annotations per image (0 = unlimited). Every repaint redraws
    /// the whole list, so very long sessions can be capped.
    #[serde(default)]
    pub max_annotations: usize,
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_line_width() -> u32 {
    3
}

fn default_max_line_width() -> u32 {
    50
}

fn default_text_scale() -> f64 {
    crate::draw::style::DEFAULT_TEXT_SCALE
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_arrow_head_base() -> f64 {
    crate::draw::style::DEFAULT_ARROW_HEAD_BASE
}

fn default_arrow_head_angle() -> f64 {
    crate::draw::style::DEFAULT_ARROW_HEAD_ANGLE
}

fn default_save_directory() -> String {
    "~/Pictures/Imgscribe".to_string()
}

fn default_filename_template() -> String {
    "annotated_%Y-%m-%d_%H%M%S".to_string()
}
