//! Glyph sheet composition.
//!
//! Lays a sequence of per-character PNG images out on a fixed grid and
//! encodes the result as one PNG. `None` entries leave their tile blank,
//! which is how spaces between words are represented.

use super::color::Color;
use super::render::{render_background, render_scaled_image};
use crate::config::SheetConfig;
use crate::export::{ExportError, ExportedImage, decode_png};

/// Grid geometry for a glyph sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Width of each tile in pixels
    pub tile_width: u32,
    /// Height of each tile in pixels
    pub tile_height: u32,
    /// Number of tiles per row
    pub columns: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            tile_width: 20,
            tile_height: 20,
            columns: 20,
        }
    }
}

impl From<&SheetConfig> for SheetLayout {
    fn from(config: &SheetConfig) -> Self {
        Self {
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            columns: config.columns,
        }
    }
}

impl SheetLayout {
    /// Number of rows needed to hold `count` tiles.
    pub fn rows_for(&self, count: u32) -> u32 {
        count.div_ceil(self.columns.max(1))
    }

    /// Top-left pixel of the tile at `index`.
    pub fn tile_origin(&self, index: usize) -> (u32, u32) {
        let columns = self.columns.max(1) as usize;
        let col = (index % columns) as u32;
        let row = (index / columns) as u32;
        (col * self.tile_width, row * self.tile_height)
    }
}

/// Composites `glyphs` (PNG bytes, or `None` for a gap) into a single sheet.
///
/// # Errors
/// Fails on an empty glyph list, a degenerate layout, or a glyph that is not a
/// decodable PNG.
pub fn compose_sheet(
    glyphs: &[Option<Vec<u8>>],
    layout: SheetLayout,
    background: Color,
) -> Result<ExportedImage, ExportError> {
    if glyphs.is_empty() {
        return Err(ExportError::Encode("no glyphs to compose".to_string()));
    }
    if layout.tile_width == 0 || layout.tile_height == 0 || layout.columns == 0 {
        return Err(ExportError::Encode(format!("invalid sheet layout {layout:?}")));
    }

    let too_large = || {
        ExportError::Encode(format!(
            "{} glyphs do not fit a sheet with layout {layout:?}",
            glyphs.len()
        ))
    };
    let count = u32::try_from(glyphs.len()).map_err(|_| too_large())?;
    let columns = layout.columns.min(count);
    let rows = layout.rows_for(count);
    let width = columns.checked_mul(layout.tile_width).ok_or_else(too_large)?;
    let height = rows.checked_mul(layout.tile_height).ok_or_else(too_large)?;
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(too_large());
    };

    let sheet = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
    {
        let ctx = cairo::Context::new(&sheet)?;
        render_background(&ctx, background);

        for (index, glyph) in glyphs.iter().enumerate() {
            let Some(png) = glyph else { continue };
            let image = decode_png(png)?;
            let (x, y) = layout.tile_origin(index);
            render_scaled_image(
                &ctx,
                &image,
                x as f64,
                y as f64,
                layout.tile_width as f64,
                layout.tile_height as f64,
            )?;
        }
    }

    let mut png = Vec::new();
    sheet
        .write_to_png(&mut png)
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    log::debug!(
        "Composed glyph sheet {}x{} from {} tiles",
        width,
        height,
        glyphs.len()
    );

    Ok(ExportedImage { width, height, png })
}
