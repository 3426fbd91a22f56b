//! RGBA color type and the named colors accepted by the configuration file.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use scribepad::draw::Color;
/// let ink = Color::new(0.0, 0.0, 0.0, 1.0);
/// assert_eq!(ink.to_rgba8(), [0, 0, 0, 255]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Converts to 8-bit channels, rounding each component.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Returns the same color with alpha forced to 1.0.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// Sets this color as the cairo source.
    pub(crate) fn apply(self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

/// Predefined white color, the default canvas background
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined black color, the default pen
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Predefined red color
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Predefined green color
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Predefined blue color
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Maps color name strings to Color values (case-insensitive).
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_rounds_components() {
        assert_eq!(WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::new(0.5, 0.0, 1.2, 1.0).to_rgba8(), [128, 0, 255, 255]);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(name_to_color("Black"), Some(BLACK));
        assert_eq!(name_to_color("WHITE"), Some(WHITE));
        assert_eq!(name_to_color("mauve"), None);
    }
}
