//! Stroke definitions for curves, glyph outlines, and chip borders.
//!
//! Stroke opacity is carried by the color's alpha channel, so a single
//! [`StrokeDefinition`] maps onto `stroke`, `stroke-opacity` and
//! `stroke-width`.
//!
//! ```
//! use liaison_core::color::Color;
//! use liaison_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("#606060").unwrap().with_alpha(0.85), 1.8);
//! let path = svg_element::Path::new().set("d", "M 0 0 L 10 10");
//! let path = liaison_core::apply_stroke!(path, &stroke);
//! assert!(path.to_string().contains("stroke-width=\"1.8\""));
//! ```

use crate::color::Color;

/// Color and width of a stroked outline.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke opacity, taken from the color's alpha channel.
    pub fn opacity(&self) -> f32 {
        self.color.alpha()
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets `stroke`, `stroke-opacity` and `stroke-width` from a
/// [`StrokeDefinition`](crate::draw::StrokeDefinition).
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_opaque_string())
            .set("stroke-opacity", $stroke.opacity())
            .set("stroke-width", $stroke.width())
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.opacity(), 1.0);
    }

    #[test]
    fn test_stroke_setters() {
        let mut stroke = StrokeDefinition::default();
        stroke.set_color(Color::new("#08875d").unwrap());
        stroke.set_width(3.0);

        assert_eq!(stroke.width(), 3.0);
        assert_eq!(stroke.color(), Color::new("#08875d").unwrap());
    }

    #[test]
    fn test_stroke_opacity_from_alpha() {
        let stroke = StrokeDefinition::new(Color::new("#606060").unwrap().with_alpha(0.85), 1.8);
        assert!((stroke.opacity() - 0.85).abs() < 0.001);
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::new(Color::new("white").unwrap(), 2.0);
        let circle = crate::apply_stroke!(svg_element::Circle::new(), &stroke);
        let rendered = circle.to_string();

        assert!(rendered.contains("stroke=\"white\""));
        assert!(rendered.contains("stroke-opacity=\"1\""));
        assert!(rendered.contains("stroke-width=\"2\""));
    }
}
