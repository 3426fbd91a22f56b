//! Handwriting capture for training-data collection.
//!
//! A [`draw::DrawingSurface`] records freehand strokes from host pointer and
//! touch events into a fixed-size raster, reports when it gains or loses ink,
//! and exports its contents as PNG. The remaining modules wrap that core:
//! configuration, file and data URL export, sample submission, glyph sheets,
//! and scripted playback.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod replay;
pub mod submit;
pub mod util;

pub use config::Config;
pub use draw::{DrawingSurface, SurfaceSettings};
