//! Configuration file support for imgscribe.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/imgscribe/config.toml`. Settings include drawing defaults,
//! arrow appearance, export locations, and performance limits.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{ArrowConfig, DrawingConfig, ExportConfig, PerformanceConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#ff0000"
/// default_line_width = 3
/// text_scale = 5.0
///
/// [arrow]
/// head_base = 10.0
/// head_angle_degrees = 30.0
///
/// [export]
/// save_directory = "~/Pictures/Imgscribe"
/// filename_template = "annotated_%Y-%m-%d_%H%M%S"
///
/// [performance]
/// max_annotations = 0
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (color, line width, text font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead appearance
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Download locations
    #[serde(default)]
    pub export: ExportConfig,

    /// Performance limits
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `max_line_width`: 1 - 200
    /// - `default_line_width`: 1 - `max_line_width`
    /// - `text_scale`: 1.0 - 20.0
    /// - `arrow.head_base`: 0.0 - 100.0
    /// - `arrow.head_angle_degrees`: 10.0 - 80.0
    fn validate_and_clamp(&mut self) {
        if !(1..=200).contains(&self.drawing.max_line_width) {
            log::warn!(
                "Invalid max_line_width {}, clamping to 1-200 range",
                self.drawing.max_line_width
            );
            self.drawing.max_line_width = self.drawing.max_line_width.clamp(1, 200);
        }

        let max_width = self.drawing.max_line_width;
        if !(1..=max_width).contains(&self.drawing.default_line_width) {
            log::warn!(
                "Invalid default_line_width {}, clamping to 1-{} range",
                self.drawing.default_line_width,
                max_width
            );
            self.drawing.default_line_width = self.drawing.default_line_width.clamp(1, max_width);
        }

        if !(1.0..=20.0).contains(&self.drawing.text_scale) {
            log::warn!(
                "Invalid text_scale {:.1}, clamping to 1.0-20.0 range",
                self.drawing.text_scale
            );
            self.drawing.text_scale = clamp_or(self.drawing.text_scale, 1.0, 20.0, 5.0);
        }

        if !(0.0..=100.0).contains(&self.arrow.head_base) {
            log::warn!(
                "Invalid arrow head_base {:.1}, clamping to 0.0-100.0 range",
                self.arrow.head_base
            );
            self.arrow.head_base = clamp_or(self.arrow.head_base, 0.0, 100.0, 10.0);
        }

        if !(10.0..=80.0).contains(&self.arrow.head_angle_degrees) {
            log::warn!(
                "Invalid arrow head_angle_degrees {:.1}°, clamping to 10.0-80.0° range",
                self.arrow.head_angle_degrees
            );
            self.arrow.head_angle_degrees =
                clamp_or(self.arrow.head_angle_degrees, 10.0, 80.0, 30.0);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export filename_template, using default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/imgscribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("imgscribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Clamps `value` into `min..=max`, substituting `fallback` for NaN.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.drawing.default_line_width, 3);
        assert_eq!(config.arrow.head_base, 10.0);
        assert_eq!(config.arrow.head_angle_degrees, 30.0);
        assert_eq!(config.drawing.text_scale, 5.0);
        assert_eq!(config.performance.max_annotations, 0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[drawing]\ndefault_color = \"#00ff00\"\n\n[arrow]\nhead_base = 14.0\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.drawing.default_color,
            ColorSpec::Name("#00ff00".to_string())
        );
        assert_eq!(config.arrow.head_base, 14.0);
        assert_eq!(config.arrow.head_angle_degrees, 30.0);
        assert_eq!(config.drawing.font_family, "Sans");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[drawing]\ndefault_line_width = 0\nmax_line_width = 500\ntext_scale = 99.0\nfont_style = \"wavy\"\n\n[arrow]\nhead_angle_degrees = 5.0\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.max_line_width, 200);
        assert_eq!(config.drawing.default_line_width, 1);
        assert_eq!(config.drawing.text_scale, 20.0);
        assert_eq!(config.drawing.font_style, "normal");
        assert_eq!(config.arrow.head_angle_degrees, 10.0);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[drawing\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["drawing", "arrow", "export", "performance"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
