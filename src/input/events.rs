//! Host-neutral pointer and touch events.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Pointer or touch event as delivered by the host, in client coordinates.
///
/// Mouse and touch origins are unified onto one stroke: touch events carry
/// every active touch point, but only the first is ever used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Primary button pressed
    MouseDown { x: f64, y: f64 },
    /// Pointer moved (with or without a button held)
    MouseMove { x: f64, y: f64 },
    /// Primary button released
    MouseUp,
    /// Pointer left the surface
    MouseOut,
    /// One or more touches began
    TouchStart { touches: Vec<Point> },
    /// Active touches moved
    TouchMove { touches: Vec<Point> },
    /// Touches lifted
    TouchEnd,
    /// Touch sequence interrupted by the host
    TouchCancel,
}

/// What an event means for the stroke session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeAction {
    Begin(Point),
    Extend(Point),
    End,
}

impl PointerEvent {
    /// Client-space position of the event, if it has one.
    ///
    /// Multi-touch collapses to the first touch; a touch event with an empty
    /// touch list has no position.
    pub fn client_position(&self) -> Option<Point> {
        match self {
            PointerEvent::MouseDown { x, y } | PointerEvent::MouseMove { x, y } => {
                Some(Point::new(*x, *y))
            }
            PointerEvent::TouchStart { touches } | PointerEvent::TouchMove { touches } => {
                touches.first().copied()
            }
            PointerEvent::MouseUp
            | PointerEvent::MouseOut
            | PointerEvent::TouchEnd
            | PointerEvent::TouchCancel => None,
        }
    }

    /// Maps the event to a stroke action, still in client coordinates.
    pub fn stroke_action(&self) -> Option<StrokeAction> {
        match self {
            PointerEvent::MouseDown { .. } | PointerEvent::TouchStart { .. } => {
                self.client_position().map(StrokeAction::Begin)
            }
            PointerEvent::MouseMove { .. } | PointerEvent::TouchMove { .. } => {
                self.client_position().map(StrokeAction::Extend)
            }
            PointerEvent::MouseUp
            | PointerEvent::MouseOut
            | PointerEvent::TouchEnd
            | PointerEvent::TouchCancel => Some(StrokeAction::End),
        }
    }
}
