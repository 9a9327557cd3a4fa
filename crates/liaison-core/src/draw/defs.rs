//! Shared SVG definitions: drop-shadow and glow filters, radial highlights.
//!
//! The arrowhead markers live with [`EdgeDrawer`](crate::draw::EdgeDrawer),
//! which knows which marker colors are in use.

use svg::node::element as svg_element;

use crate::color::Color;

/// Id of the drop-shadow filter applied to node shadow circles.
pub const NODE_SHADOW_FILTER_ID: &str = "node-shadow";

/// Id of the glow filter applied to highlighted edges.
pub const GLOW_FILTER_ID: &str = "glow-effect";

/// Soft drop shadow under node glyphs.
pub fn node_shadow_filter() -> svg_element::Filter {
    svg_element::Filter::new()
        .set("id", NODE_SHADOW_FILTER_ID)
        .set("x", "-50%")
        .set("y", "-50%")
        .set("width", "200%")
        .set("height", "200%")
        .add(
            svg_element::FilterEffectDropShadow::new()
                .set("dx", 0)
                .set("dy", 2)
                .set("stdDeviation", 3)
                .set("flood-color", "rgba(0, 0, 0, 0.35)")
                .set("flood-opacity", 0.8),
        )
}

/// Blur merged under the source graphic, used for highlighted edges.
pub fn glow_filter() -> svg_element::Filter {
    svg_element::Filter::new()
        .set("id", GLOW_FILTER_ID)
        .set("x", "-50%")
        .set("y", "-50%")
        .set("width", "200%")
        .set("height", "200%")
        .add(
            svg_element::FilterEffectGaussianBlur::new()
                .set("stdDeviation", 2.5)
                .set("result", "coloredBlur"),
        )
        .add(
            svg_element::FilterEffectMerge::new()
                .add(svg_element::FilterEffectMergeNode::new().set("in", "coloredBlur"))
                .add(svg_element::FilterEffectMergeNode::new().set("in", "SourceGraphic")),
        )
}

/// Off-center radial gradient fading from `highlight` into `base`.
pub fn radial_highlight(id: &str, highlight: Color, base: Color) -> svg_element::RadialGradient {
    svg_element::RadialGradient::new()
        .set("id", id)
        .set("cx", 0.3)
        .set("cy", 0.3)
        .set("r", 0.8)
        .add(
            svg_element::Stop::new()
                .set("offset", "10%")
                .set("stop-color", highlight.to_string()),
        )
        .add(
            svg_element::Stop::new()
                .set("offset", "90%")
                .set("stop-color", base.to_string()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_shadow_filter_id() {
        let rendered = node_shadow_filter().to_string();
        assert!(rendered.contains("id=\"node-shadow\""));
        assert!(rendered.contains("feDropShadow"));
    }

    #[test]
    fn test_glow_filter_merges_source_graphic() {
        let rendered = glow_filter().to_string();
        assert!(rendered.contains("id=\"glow-effect\""));
        assert!(rendered.contains("feGaussianBlur"));
        assert!(rendered.contains("SourceGraphic"));
    }

    #[test]
    fn test_radial_highlight_stops() {
        let gradient = radial_highlight(
            "node-gradient-0",
            Color::new("white").unwrap(),
            Color::new("red").unwrap(),
        );
        let rendered = gradient.to_string();
        assert!(rendered.contains("id=\"node-gradient-0\""));
        assert_eq!(rendered.matches("<stop").count(), 2);
    }
}
