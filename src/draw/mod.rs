//! Raster drawing primitives (Cairo-based).
//!
//! This module defines the core drawing types used for handwriting capture:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`DrawingSurface`]: the fixed-size capture raster and its stroke session
//! - Rendering functions for Cairo-based output
//! - Glyph sheet composition for generated character images

pub mod color;
pub mod render;
pub mod sheet;
pub mod surface;

pub use color::{BLACK, Color, WHITE};
pub use sheet::{SheetLayout, compose_sheet};
pub use surface::{ChangeCallback, DrawingSurface, SurfaceError, SurfaceSettings};
