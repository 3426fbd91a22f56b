//! Cairo-based rendering functions for the capture surface.

use super::color::Color;
use crate::util::Point;

/// Fills the whole target with an opaque background color.
///
/// Uses the `Source` operator so any previous content (including partially
/// transparent pixels) is replaced rather than blended over.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `color` - Background color; alpha is forced to 1.0
pub fn render_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    color.opaque().apply(ctx);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Renders one stroke segment between two buffer-space points.
///
/// Round caps make consecutive segments of a stroke join seamlessly and turn a
/// zero-length segment into a dot the size of the pen.
///
/// # Errors
/// Returns the cairo error if stroking fails (e.g. the context is in an error state).
pub fn render_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    color: Color,
    width: f64,
) -> Result<(), cairo::Error> {
    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()
}

/// Paints `image` scaled into the `width`×`height` box at (`x`, `y`).
pub fn render_scaled_image(
    ctx: &cairo::Context,
    image: &cairo::ImageSurface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let src_w = image.width();
    let src_h = image.height();
    if src_w <= 0 || src_h <= 0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.translate(x, y);
    ctx.scale(width / src_w as f64, height / src_h as f64);
    ctx.set_source_surface(image, 0.0, 0.0)?;
    let result = ctx.paint();
    ctx.restore()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};

    fn surface(width: i32, height: i32) -> cairo::ImageSurface {
        cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap()
    }

    fn first_pixel(surface: &cairo::ImageSurface) -> u32 {
        let mut value = 0;
        surface
            .with_data(|data| {
                value = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
            })
            .unwrap();
        value
    }

    #[test]
    fn background_replaces_transparent_pixels() {
        let target = surface(4, 4);
        {
            let ctx = cairo::Context::new(&target).unwrap();
            render_background(&ctx, WHITE);
        }
        assert_eq!(first_pixel(&target), 0xFFFF_FFFF);
    }

    #[test]
    fn zero_length_segment_leaves_a_dot() {
        let target = surface(16, 16);
        {
            let ctx = cairo::Context::new(&target).unwrap();
            render_background(&ctx, WHITE);
            render_segment(&ctx, Point::new(1.0, 1.0), Point::new(1.0, 1.0), BLACK, 6.0)
                .unwrap();
        }
        let pixel = first_pixel(&target);
        assert_eq!(pixel >> 24, 0xFF);
        assert!((pixel >> 16) & 0xFF < 0x20, "pixel {pixel:#010x} should be inked");
    }
}
