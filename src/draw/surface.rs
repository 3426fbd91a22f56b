//! The capture surface: a fixed-size raster that records freehand strokes.

use super::color::{BLACK, Color, WHITE};
use super::render::{render_background, render_segment};
use crate::config::CanvasConfig;
use crate::export::{ExportError, ExportedImage};
use crate::util::Point;
use log::{debug, warn};
use std::fmt;
use thiserror::Error;

/// Callback fired whenever the "has ink" flag flips.
///
/// Invoked synchronously from [`DrawingSurface::extend`] and
/// [`DrawingSurface::clear`]; it cannot reach back into the surface because the
/// surface is mutably borrowed for the duration of the call.
pub type ChangeCallback = Box<dyn FnMut(bool)>;

/// Default raster width and height in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// Default pen width in buffer pixels.
pub const DEFAULT_PEN_WIDTH: f64 = 20.0;

/// Construction parameters for a [`DrawingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSettings {
    pub width: u32,
    pub height: u32,
    pub pen_width: f64,
    pub pen_color: Color,
    pub background: Color,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            pen_width: DEFAULT_PEN_WIDTH,
            pen_color: BLACK,
            background: WHITE,
        }
    }
}

impl From<&CanvasConfig> for SurfaceSettings {
    fn from(config: &CanvasConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pen_width: config.pen_width,
            pen_color: config.pen_color.to_color(),
            background: config.background_color.to_color(),
        }
    }
}

/// Errors raised while constructing a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}

/// Interactive raster capture surface.
///
/// Holds a fixed-size, fully opaque buffer. Strokes are fed in as
/// `begin` → `extend`* → `end`, each `extend` rasterizing one segment from the
/// previous point. Out-of-order calls are ignored.
pub struct DrawingSurface {
    buffer: cairo::ImageSurface,
    width: u32,
    height: u32,
    background: Color,
    pen_color: Color,
    pen_width: f64,
    /// Last point of the active stroke session, if any
    last_point: Option<Point>,
    has_ink: bool,
    on_change: Option<ChangeCallback>,
}

impl DrawingSurface {
    /// Allocates the buffer and paints it with the background color.
    ///
    /// # Errors
    /// Returns [`SurfaceError::InvalidDimensions`] for zero or oversized
    /// dimensions, or the cairo error if the buffer cannot be allocated.
    pub fn new(settings: SurfaceSettings) -> Result<Self, SurfaceError> {
        let invalid = SurfaceError::InvalidDimensions {
            width: settings.width,
            height: settings.height,
        };
        if settings.width == 0 || settings.height == 0 {
            return Err(invalid);
        }
        let (Ok(w), Ok(h)) = (
            i32::try_from(settings.width),
            i32::try_from(settings.height),
        ) else {
            return Err(invalid);
        };

        if settings.background.a < 1.0 {
            warn!("Background color must be opaque; ignoring alpha {:.2}", settings.background.a);
        }
        let background = settings.background.opaque();

        let buffer = blank_buffer(w, h, background)?;

        let mut surface = Self {
            buffer,
            width: settings.width,
            height: settings.height,
            background,
            pen_color: settings.pen_color,
            pen_width: DEFAULT_PEN_WIDTH,
            last_point: None,
            has_ink: false,
            on_change: None,
        };
        surface.set_pen_width(settings.pen_width);
        debug!(
            "Created {}x{} drawing surface (pen width {:.1})",
            surface.width, surface.height, surface.pen_width
        );
        Ok(surface)
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Whether a stroke session is currently open.
    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    /// Installs (or replaces) the change-notification callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Removes and returns the current change-notification callback.
    pub fn take_on_change(&mut self) -> Option<ChangeCallback> {
        self.on_change.take()
    }

    /// Starts a stroke session at `point` (buffer coordinates).
    ///
    /// Nothing is drawn until the first [`extend`](Self::extend). A `begin`
    /// while a session is already open restarts it at the new point.
    pub fn begin(&mut self, point: Point) {
        if !point.is_finite() {
            debug!("Ignoring begin at non-finite point {:?}", point);
            return;
        }
        self.last_point = Some(point);
    }

    /// Rasterizes a segment from the last recorded point to `point`.
    ///
    /// No-op without an active session. The first segment drawn since
    /// construction or the last clear fires the change callback with `true`.
    pub fn extend(&mut self, point: Point) {
        let Some(from) = self.last_point else {
            debug!("Ignoring extend without an active stroke");
            return;
        };
        if !point.is_finite() {
            debug!("Ignoring extend to non-finite point {:?}", point);
            return;
        }

        if let Err(err) = self.stroke(from, point) {
            warn!("Failed to render stroke segment: {}", err);
            return;
        }
        self.last_point = Some(point);

        if !self.has_ink {
            self.has_ink = true;
            self.notify(true);
        }
    }

    /// Closes the active stroke session. No-op without one.
    pub fn end(&mut self) {
        if self.last_point.take().is_none() {
            debug!("Ignoring end without an active stroke");
        }
    }

    /// Changes the width used for subsequently rendered segments.
    ///
    /// Already rendered pixels and the ink flag are untouched. Non-finite or
    /// non-positive widths are rejected.
    pub fn set_pen_width(&mut self, width: f64) {
        if !width.is_finite() || width <= 0.0 {
            warn!("Ignoring invalid pen width {}", width);
            return;
        }
        self.pen_width = width;
    }

    /// Changes the color used for subsequently rendered segments.
    pub fn set_pen_color(&mut self, color: Color) {
        self.pen_color = color;
    }

    /// Repaints the background, drops any open stroke, and resets the ink flag.
    ///
    /// Fires the change callback with `false` on every successful clear. If the
    /// buffer cannot be repainted nothing changes and no callback fires.
    pub fn clear(&mut self) {
        match cairo::Context::new(&self.buffer) {
            Ok(ctx) => render_background(&ctx, self.background),
            Err(err) => {
                warn!("Failed to clear drawing surface: {}", err);
                return;
            }
        }
        self.last_point = None;
        self.has_ink = false;
        self.notify(false);
    }

    /// True iff no ink has been rendered since construction or the last clear.
    pub fn is_empty(&self) -> bool {
        !self.has_ink
    }

    /// Encodes the current buffer as PNG without mutating anything.
    pub fn export_image(&self) -> Result<ExportedImage, ExportError> {
        let mut png = Vec::new();
        self.buffer
            .write_to_png(&mut png)
            .map_err(|err| ExportError::Encode(err.to_string()))?;
        Ok(ExportedImage {
            width: self.width,
            height: self.height,
            png,
        })
    }

    /// Compares every pixel against a freshly painted background buffer.
    ///
    /// O(pixels); use [`is_empty`](Self::is_empty) for the cheap check. Returns
    /// `false` if either buffer cannot be read.
    pub fn matches_blank(&self) -> bool {
        let Ok(reference) = blank_buffer(self.buffer.width(), self.buffer.height(), self.background)
        else {
            return false;
        };
        let mut expected = Vec::new();
        if reference
            .with_data(|data| expected.extend_from_slice(data))
            .is_err()
        {
            return false;
        }
        let mut same = false;
        if self
            .buffer
            .with_data(|data| same = data == expected.as_slice())
            .is_err()
        {
            return false;
        }
        same
    }

    /// Returns the straight (non-premultiplied) RGBA value of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        read_pixel(&self.buffer, x, y)
    }

    /// Copies every pixel out as row-major RGBA.
    pub fn pixels(&self) -> Vec<[u8; 4]> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        let stride = self.buffer.stride() as usize;
        let _ = self.buffer.with_data(|data| {
            for y in 0..self.height as usize {
                let row = &data[y * stride..];
                for x in 0..self.width as usize {
                    out.push(unpack_argb32(&row[x * 4..x * 4 + 4]));
                }
            }
        });
        out
    }

    fn stroke(&mut self, from: Point, to: Point) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.buffer)?;
        render_segment(&ctx, from, to, self.pen_color, self.pen_width)
    }

    fn notify(&mut self, has_ink: bool) {
        debug!("Drawing state changed: has_ink={}", has_ink);
        if let Some(callback) = self.on_change.as_mut() {
            callback(has_ink);
        }
    }
}

impl fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pen_width", &self.pen_width)
            .field("pen_color", &self.pen_color)
            .field("background", &self.background)
            .field("last_point", &self.last_point)
            .field("has_ink", &self.has_ink)
            .finish_non_exhaustive()
    }
}

fn blank_buffer(width: i32, height: i32, background: Color) -> Result<cairo::ImageSurface, cairo::Error> {
    let buffer = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&buffer)?;
        render_background(&ctx, background);
    }
    buffer.flush();
    Ok(buffer)
}

/// Reads one pixel of an ARGB32 image surface as straight RGBA.
pub(crate) fn read_pixel(surface: &cairo::ImageSurface, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= surface.width().max(0) as u32 || y >= surface.height().max(0) as u32 {
        return None;
    }
    let stride = surface.stride() as usize;
    let offset = y as usize * stride + x as usize * 4;
    let mut pixel = None;
    surface
        .with_data(|data| {
            if let Some(bytes) = data.get(offset..offset + 4) {
                pixel = Some(unpack_argb32(bytes));
            }
        })
        .ok()?;
    pixel
}

/// Unpacks a native-endian premultiplied ARGB32 word into straight RGBA.
fn unpack_argb32(bytes: &[u8]) -> [u8; 4] {
    let word = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let a = (word >> 24) as u8;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let unpremultiply = |c: u32| ((c * 255 + a as u32 / 2) / a as u32).min(255) as u8;
    [
        unpremultiply((word >> 16) & 0xFF),
        unpremultiply((word >> 8) & 0xFF),
        unpremultiply(word & 0xFF),
        a,
    ]
}
