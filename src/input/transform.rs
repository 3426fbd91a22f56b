//! Display-to-buffer coordinate mapping.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// On-screen rectangle the surface currently occupies, in client coordinates.
///
/// Hosts measure this at every event; responsive layout can resize the
/// displayed surface between two events of the same stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect at the origin displaying the buffer at 1:1.
    pub fn identity(buffer_width: u32, buffer_height: u32) -> Self {
        Self::new(0.0, 0.0, buffer_width as f64, buffer_height as f64)
    }

    /// Per-axis `buffer / displayed` scale factors.
    ///
    /// An axis with a zero, negative, or non-finite displayed size falls back
    /// to scale 1 so a collapsed layout never produces NaN coordinates.
    pub fn scale_for(&self, buffer_width: u32, buffer_height: u32) -> (f64, f64) {
        let axis = |buffer: u32, displayed: f64| {
            if displayed.is_finite() && displayed > 0.0 {
                buffer as f64 / displayed
            } else {
                1.0
            }
        };
        (
            axis(buffer_width, self.width),
            axis(buffer_height, self.height),
        )
    }

    /// Maps a client-space point into buffer coordinates.
    pub fn to_buffer(&self, client: Point, buffer_width: u32, buffer_height: u32) -> Point {
        let (sx, sy) = self.scale_for(buffer_width, buffer_height);
        Point::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }
}
