//! Small geometry helpers shared by the input and draw modules.

use serde::{Deserialize, Serialize};

/// A 2-D point in either display (client) or buffer coordinates.
///
/// Which space a point lives in is determined by where it came from: points
/// carried by [`crate::input::PointerEvent`] are client coordinates, points
/// passed to [`crate::draw::DrawingSurface`] are buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_points_are_detected() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
    }
}
