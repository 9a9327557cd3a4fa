//! Color handling for Liaison graphs
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Styles are written as CSS color strings, and the
//! alpha channel doubles as the opacity of whatever the color paints.
//!
//! SVG output keeps the two apart: the paint attribute gets
//! [`Color::to_opaque_string`] and the matching `*-opacity` attribute gets
//! [`Color::alpha`], so translucency is applied exactly once.

use std::str::FromStr;

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as "#ff5757", "rgba(255, 255, 255, 0.85)"
    /// or "white".
    ///
    /// # Examples
    ///
    /// ```
    /// use liaison_core::color::Color;
    ///
    /// let primary = Color::new("#ff5757").unwrap();
    /// let overlay = Color::new("rgba(255, 255, 255, 0.85)").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns a string usable inside SVG `id` attributes.
    ///
    /// Arrowhead markers are keyed by color, so the result must be stable
    /// and start with a letter.
    ///
    /// ```
    /// use liaison_core::color::Color;
    ///
    /// let color = Color::new("#64748b").unwrap();
    /// assert!(!color.to_id_safe_string().contains('#'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized = self
            .to_string()
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%', '/'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }
        sanitized
    }

    /// CSS string of this color with the alpha channel dropped.
    ///
    /// Opaque colors keep their original spelling.
    pub fn to_opaque_string(self) -> String {
        if self.is_opaque() {
            self.to_string()
        } else {
            self.with_alpha(1.0).to_string()
        }
    }

    /// Returns a copy with the alpha channel replaced (0.0 transparent,
    /// 1.0 opaque).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha() >= 1.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff5757").is_ok());
        assert!(Color::new("rgba(255, 255, 255, 0.85)").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let edge = Color::new("#606060").unwrap().with_alpha(0.85);
        assert_approx_eq!(f32, edge.alpha(), 0.85);
        assert!(!edge.is_opaque());
    }

    #[test]
    fn test_opaque_string_drops_alpha() {
        let overlay = Color::new("rgba(255, 255, 255, 0.85)").unwrap();
        let opaque = Color::new(&overlay.to_opaque_string()).unwrap();
        assert!(opaque.is_opaque());

        let white = Color::new("white").unwrap();
        assert_eq!(white.to_opaque_string(), white.to_string());
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let color = Color::new("rgba(0, 0, 0, 0.35)").unwrap();
        let safe_id = color.to_id_safe_string();
        for forbidden in ['#', '(', ')', ',', ' ', '/', '.'] {
            assert!(!safe_id.contains(forbidden), "{safe_id} contains {forbidden}");
        }
        assert!(safe_id.chars().next().is_some_and(|c| c.is_ascii_alphabetic()));
    }
}
