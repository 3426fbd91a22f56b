//! Input handling for the capture surface.
//!
//! This module translates host pointer and touch events into stroke session
//! calls on a [`DrawingSurface`](crate::draw::DrawingSurface), mapping client
//! coordinates into buffer coordinates on every event.

pub mod events;
mod pointer;
pub mod transform;

pub use events::{PointerEvent, StrokeAction};
pub use transform::DisplayRect;
