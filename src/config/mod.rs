//! Configuration file support for scribepad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/scribepad/config.toml`. Settings include the capture surface
//! dimensions and pen defaults, where exported samples go, and the glyph sheet layout.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, ExportConfig, SheetConfig};

use crate::export::file;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 256
/// height = 256
/// pen_width = 20.0
/// pen_color = "black"
/// background_color = "white"
///
/// [export]
/// save_directory = "~/Pictures/Scribepad"
///
/// [sheet]
/// tile_width = 20
/// columns = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Capture surface dimensions and pen defaults
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Output location for exported samples
    #[serde(default)]
    pub export: ExportConfig,

    /// Glyph sheet layout
    #[serde(default)]
    pub sheet: SheetConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 4096
    /// - `canvas.pen_width`: 0.5 - 200.0
    /// - `sheet.tile_width`, `sheet.tile_height`: 1 - 512
    /// - `sheet.columns`: 1 - 100
    pub fn validate_and_clamp(&mut self) {
        clamp_u32("canvas.width", &mut self.canvas.width, 1, 4096);
        clamp_u32("canvas.height", &mut self.canvas.height, 1, 4096);

        if !self.canvas.pen_width.is_finite() {
            log::warn!("Invalid pen_width, falling back to 20.0");
            self.canvas.pen_width = 20.0;
        } else if !(0.5..=200.0).contains(&self.canvas.pen_width) {
            log::warn!(
                "Invalid pen_width {:.1}, clamping to 0.5-200.0 range",
                self.canvas.pen_width
            );
            self.canvas.pen_width = self.canvas.pen_width.clamp(0.5, 200.0);
        }

        for (name, spec, fallback) in [
            ("pen_color", &mut self.canvas.pen_color, "black"),
            ("background_color", &mut self.canvas.background_color, "white"),
        ] {
            if !spec.is_known() {
                log::warn!("Invalid {} {:?}, falling back to '{}'", name, spec, fallback);
                *spec = ColorSpec::Name(fallback.to_string());
            }
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, falling back to default");
            self.export.filename_template = ExportConfig::default().filename_template;
        } else if !file::is_valid_template(&self.export.filename_template) {
            log::warn!(
                "Invalid filename_template {:?}, falling back to default",
                self.export.filename_template
            );
            self.export.filename_template = ExportConfig::default().filename_template;
        }

        clamp_u32("sheet.tile_width", &mut self.sheet.tile_width, 1, 512);
        clamp_u32("sheet.tile_height", &mut self.sheet.tile_height, 1, 512);
        clamp_u32("sheet.columns", &mut self.sheet.columns, 1, 100);
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/scribepad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("scribepad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
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

    /// Saves the current configuration to `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists there or it cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_u32(name: &str, value: &mut u32, min: u32, max: u32) {
    if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {}, clamping to {}-{} range",
            name,
            value,
            min,
            max
        );
        *value = (*value).clamp(min, max);
    }
}
