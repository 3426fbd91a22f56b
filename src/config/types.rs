//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Capture surface settings.
///
/// Dimensions are fixed once a surface is built; pen settings are only the
/// starting values and can be changed while drawing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Raster width in pixels (valid range: 1 - 4096)
    #[serde(default = "default_canvas_size")]
    pub width: u32,

    /// Raster height in pixels (valid range: 1 - 4096)
    #[serde(default = "default_canvas_size")]
    pub height: u32,

    /// Initial pen width in buffer pixels (valid range: 0.5 - 200.0)
    #[serde(default = "default_pen_width")]
    pub pen_width: f64,

    /// Pen color - a named color (white, black, red, green, blue) or `[r, g, b]`
    #[serde(default = "default_pen_color")]
    pub pen_color: ColorSpec,

    /// Background color; always rendered fully opaque
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_size(),
            height: default_canvas_size(),
            pen_width: default_pen_width(),
            pen_color: default_pen_color(),
            background_color: default_background_color(),
        }
    }
}

/// Where exported samples are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output directory (`~/` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template; chrono format specifiers are expanded
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

/// Glyph sheet layout.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SheetConfig {
    /// Tile width in pixels (valid range: 1 - 512)
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,

    /// Tile height in pixels (valid range: 1 - 512)
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,

    /// Tiles per row (valid range: 1 - 100)
    #[serde(default = "default_columns")]
    pub columns: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            tile_width: default_tile_size(),
            tile_height: default_tile_size(),
            columns: default_columns(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_size() -> u32 {
    256
}

fn default_pen_width() -> f64 {
    20.0
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_save_directory() -> String {
    "~/Pictures/Scribepad".to_string()
}

fn default_filename_template() -> String {
    "sample_%Y-%m-%d_%H%M%S%.3f".to_string()
}

fn default_tile_size() -> u32 {
    20
}

fn default_columns() -> u32 {
    20
}
