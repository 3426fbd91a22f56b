use crate::draw::DrawingSurface;
use log::trace;

use super::events::{PointerEvent, StrokeAction};
use super::transform::DisplayRect;

impl DrawingSurface {
    /// Processes one host pointer/touch event.
    ///
    /// # Arguments
    /// * `event` - The event, in client coordinates
    /// * `display` - Where the surface is displayed right now; the scale is
    ///   derived from it on every call
    ///
    /// # Behavior
    /// - Mouse down / touch start: begins a stroke
    /// - Mouse move / touch move: extends the active stroke (ignored when idle)
    /// - Mouse up / out, touch end / cancel: ends the stroke
    pub fn handle_event(&mut self, event: &PointerEvent, display: &DisplayRect) {
        let Some(action) = event.stroke_action() else {
            trace!("Ignoring positionless event {:?}", event);
            return;
        };

        let (width, height) = (self.width(), self.height());
        match action {
            StrokeAction::Begin(client) => self.begin(display.to_buffer(client, width, height)),
            StrokeAction::Extend(client) => {
                if self.is_drawing() {
                    self.extend(display.to_buffer(client, width, height));
                }
            }
            StrokeAction::End => {
                if self.is_drawing() {
                    self.end();
                }
            }
        }
    }

    /// Feeds a batch of events measured against the same display rect.
    pub fn handle_events<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a PointerEvent>,
        display: &DisplayRect,
    ) {
        for event in events {
            self.handle_event(event, display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SurfaceSettings;
    use crate::util::Point;

    fn surface() -> DrawingSurface {
        DrawingSurface::new(SurfaceSettings::default()).unwrap()
    }

    #[test]
    fn mouse_drag_matches_direct_calls() {
        let display = DisplayRect::new(100.0, 200.0, 512.0, 512.0);
        let mut via_events = surface();
        via_events.handle_events(
            &[
                PointerEvent::MouseDown { x: 120.0, y: 220.0 },
                PointerEvent::MouseMove { x: 200.0, y: 300.0 },
                PointerEvent::MouseUp,
            ],
            &display,
        );

        let mut direct = surface();
        direct.begin(Point::new(10.0, 10.0));
        direct.extend(Point::new(50.0, 50.0));
        direct.end();

        assert!(!via_events.is_empty());
        assert_eq!(via_events.pixels(), direct.pixels());
    }

    #[test]
    fn hover_without_press_draws_nothing() {
        let mut surface = surface();
        let display = DisplayRect::identity(256, 256);
        surface.handle_event(&PointerEvent::MouseMove { x: 10.0, y: 10.0 }, &display);
        surface.handle_event(&PointerEvent::MouseOut, &display);
        surface.handle_event(&PointerEvent::MouseMove { x: 40.0, y: 40.0 }, &display);
        assert!(surface.is_empty());
        assert!(surface.matches_blank());
    }

    #[test]
    fn mouse_out_ends_the_stroke() {
        let mut surface = surface();
        let display = DisplayRect::identity(256, 256);
        surface.handle_event(&PointerEvent::MouseDown { x: 10.0, y: 10.0 }, &display);
        surface.handle_event(&PointerEvent::MouseOut, &display);
        surface.handle_event(&PointerEvent::MouseMove { x: 90.0, y: 90.0 }, &display);
        assert!(surface.is_empty());
        assert!(!surface.is_drawing());
    }

    #[test]
    fn multi_touch_uses_first_touch() {
        let display = DisplayRect::identity(256, 256);
        let mut surface = surface();
        surface.handle_events(
            &[
                PointerEvent::TouchStart {
                    touches: vec![Point::new(10.0, 10.0), Point::new(200.0, 10.0)],
                },
                PointerEvent::TouchMove {
                    touches: vec![Point::new(50.0, 10.0), Point::new(240.0, 10.0)],
                },
                PointerEvent::TouchEnd,
            ],
            &display,
        );

        assert!(!surface.is_empty());
        let [r, ..] = surface.pixel(30, 10).unwrap();
        assert!(r < 64);
        assert_eq!(surface.pixel(220, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn scale_is_recomputed_per_event() {
        let mut surface = surface();
        surface.handle_event(
            &PointerEvent::MouseDown { x: 20.0, y: 20.0 },
            &DisplayRect::new(0.0, 0.0, 512.0, 512.0),
        );
        // Layout shrinks to 1:1 mid-stroke; the move lands at (100, 100) in the buffer.
        surface.handle_event(
            &PointerEvent::MouseMove { x: 100.0, y: 100.0 },
            &DisplayRect::identity(256, 256),
        );
        let [r, ..] = surface.pixel(100, 100).unwrap();
        assert!(r < 64);
        let [r, ..] = surface.pixel(10, 10).unwrap();
        assert!(r < 64);
    }

    #[test]
    fn corner_to_corner_drag_reaches_corner_pixels() {
        for size in [128.0, 300.0, 1024.0] {
            let display = DisplayRect::new(0.0, 0.0, size, size);
            let mut surface = surface();
            surface.handle_events(
                &[
                    PointerEvent::MouseDown { x: 0.0, y: 0.0 },
                    PointerEvent::MouseMove { x: size, y: size },
                    PointerEvent::MouseUp,
                ],
                &display,
            );
            for (x, y) in [(0, 0), (255, 255)] {
                let [r, ..] = surface.pixel(x, y).unwrap();
                assert!(r < 64, "corner ({x}, {y}) should be inked at display size {size}");
            }
        }
    }
}
