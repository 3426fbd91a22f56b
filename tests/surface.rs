use scribepad::draw::{DrawingSurface, SurfaceSettings, WHITE};
use scribepad::input::{DisplayRect, PointerEvent};
use scribepad::util::Point;
use std::cell::RefCell;
use std::rc::Rc;

const WHITE_PX: [u8; 4] = [255, 255, 255, 255];
const BLACK_PX: [u8; 4] = [0, 0, 0, 255];

fn default_surface() -> DrawingSurface {
    DrawingSurface::new(SurfaceSettings::default()).unwrap()
}

fn blank_png() -> Vec<u8> {
    default_surface().export_image().unwrap().png
}

#[test]
fn handwriting_round_trip() {
    let mut surface = default_surface();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let recorded = Rc::clone(&changes);
    surface.set_on_change(move |has_ink| recorded.borrow_mut().push(has_ink));

    assert_eq!((surface.width(), surface.height()), (256, 256));
    assert_eq!(surface.pen_width(), 20.0);
    assert!(surface.is_empty());

    surface.begin(Point::new(10.0, 10.0));
    surface.extend(Point::new(50.0, 50.0));
    surface.end();
    assert!(!surface.is_empty());

    for i in [10, 20, 30, 40, 49] {
        assert_eq!(surface.pixel(i, i), Some(BLACK_PX), "on the line at {i}");
    }
    for (x, y) in [(50, 10), (10, 50), (128, 128), (200, 30), (255, 255), (0, 255)] {
        assert_eq!(surface.pixel(x, y), Some(WHITE_PX), "off the line at ({x}, {y})");
    }

    let image = surface.export_image().unwrap();
    assert_eq!((image.width, image.height), (256, 256));
    assert_ne!(image.png, blank_png());

    surface.clear();
    assert!(surface.is_empty());
    assert!(surface.pixels().iter().all(|px| *px == WHITE_PX));
    assert_eq!(surface.export_image().unwrap().png, blank_png());

    assert_eq!(*changes.borrow(), vec![true, false]);
}

#[test]
fn inkless_sessions_export_the_background() {
    let mut surface = default_surface();
    surface.extend(Point::new(30.0, 30.0));
    surface.begin(Point::new(40.0, 40.0));
    surface.end();
    surface.end();
    surface.begin(Point::new(1.0, 1.0));
    surface.begin(Point::new(2.0, 2.0));
    surface.end();

    assert!(surface.is_empty());
    assert_eq!(surface.export_image().unwrap().png, blank_png());
}

#[test]
fn repeated_end_keeps_ink_flag() {
    let mut surface = default_surface();
    surface.begin(Point::new(5.0, 5.0));
    surface.extend(Point::new(9.0, 9.0));
    surface.end();
    surface.end();
    surface.extend(Point::new(100.0, 100.0));

    assert!(!surface.is_empty());
    assert_eq!(surface.pixel(100, 100), Some(WHITE_PX));
}

#[test]
fn clear_after_heavy_drawing_restores_background() {
    let mut surface = default_surface();
    for row in 0..16 {
        let y = row as f64 * 16.0;
        surface.begin(Point::new(0.0, y));
        for step in 1..=32 {
            surface.extend(Point::new(step as f64 * 8.0, y + (step % 3) as f64 * 4.0));
        }
        surface.end();
        surface.set_pen_width(2.0 + row as f64 * 3.0);
    }
    assert!(!surface.is_empty());

    surface.clear();
    assert!(surface.is_empty());
    assert!(surface.matches_blank());
    assert_eq!(surface.export_image().unwrap().png, blank_png());
}

#[test]
fn pen_width_change_leaves_earlier_strokes_alone() {
    let mut surface = default_surface();
    surface.set_pen_width(4.0);
    surface.begin(Point::new(20.0, 20.0));
    surface.extend(Point::new(100.0, 20.0));
    surface.end();

    let top_rows = |surface: &DrawingSurface| -> Vec<[u8; 4]> {
        (0..60)
            .flat_map(|y| (0..256).map(move |x| (x, y)))
            .filter_map(|(x, y)| surface.pixel(x, y))
            .collect()
    };
    let before = top_rows(&surface);

    surface.set_pen_width(60.0);
    surface.begin(Point::new(40.0, 200.0));
    surface.extend(Point::new(200.0, 200.0));
    surface.end();

    assert_eq!(top_rows(&surface), before);
    assert_eq!(surface.pixel(20, 30), Some(WHITE_PX));
    assert_ne!(surface.pixel(120, 225), Some(WHITE_PX));
}

#[test]
fn display_corners_map_to_buffer_corners() {
    for (left, top, width, height) in [
        (0.0, 0.0, 256.0, 256.0),
        (10.0, 40.0, 128.0, 128.0),
        (0.0, 0.0, 1024.0, 512.0),
        (300.0, 5.0, 77.0, 333.0),
    ] {
        let rect = DisplayRect::new(left, top, width, height);
        let mut surface = default_surface();
        surface.set_pen_width(2.0);
        surface.handle_events(
            &[
                PointerEvent::MouseDown { x: left, y: top },
                PointerEvent::MouseMove {
                    x: left + width,
                    y: top + height,
                },
                PointerEvent::MouseUp,
            ],
            &rect,
        );

        assert_ne!(surface.pixel(0, 0), Some(WHITE_PX), "top-left for {rect:?}");
        assert_ne!(
            surface.pixel(255, 255),
            Some(WHITE_PX),
            "bottom-right for {rect:?}"
        );
        assert_eq!(surface.pixel(255, 0), Some(WHITE_PX));
    }
}

#[test]
fn touch_and_mouse_draw_the_same_footprint() {
    let rect = DisplayRect::new(0.0, 0.0, 512.0, 512.0);
    let mut mouse = default_surface();
    mouse.handle_events(
        &[
            PointerEvent::MouseDown { x: 40.0, y: 60.0 },
            PointerEvent::MouseMove { x: 300.0, y: 260.0 },
            PointerEvent::MouseUp,
        ],
        &rect,
    );

    let mut touch = default_surface();
    touch.handle_events(
        &[
            PointerEvent::TouchStart {
                touches: vec![Point::new(40.0, 60.0), Point::new(500.0, 10.0)],
            },
            PointerEvent::TouchMove {
                touches: vec![Point::new(300.0, 260.0), Point::new(10.0, 500.0)],
            },
            PointerEvent::TouchEnd,
        ],
        &rect,
    );

    assert_eq!(mouse.pixels(), touch.pixels());
    assert_eq!(mouse.background(), WHITE);
}
