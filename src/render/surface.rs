//! The drawing seam between the painter and whatever owns the pixels.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA colour. Serialises as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// CSS `rgba(..)` form, as used by SVG and canvas back ends.
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            f64::from(self.a) / 255.0
        )
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color { r, g, b, a }
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Translate-then-scale drawing transform: `screen = translate + p * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: DVec2,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: DVec2::ZERO,
        scale: 1.0,
    };

    pub fn apply(&self, point: DVec2) -> DVec2 {
        self.translate + point * self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Average glyph advance relative to font size, for surfaces without real
/// text shaping.
pub const APPROX_GLYPH_ADVANCE: f64 = 0.6;

/// A 2-D drawing target. Coordinates and sizes are in drawing units, which
/// the surface maps to pixels through the current [`Transform`].
pub trait Surface {
    fn clear(&mut self, color: Color);

    fn set_transform(&mut self, transform: Transform);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Color);

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color);

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color);

    /// `origin` is the top-left corner of the text box.
    fn text(&mut self, origin: DVec2, text: &str, font_size: f64, color: Color);

    /// Width and height of `text` at `font_size`, in the same units.
    fn measure_text(&self, text: &str, font_size: f64) -> DVec2 {
        DVec2::new(
            text.chars().count() as f64 * font_size * APPROX_GLYPH_ADVANCE,
            font_size,
        )
    }
}
