//! Curved relationship edges and arrowhead marker generation.
//!
//! An [`EdgeCurve`] pairs an [`EdgeRoute`] with its relation label and
//! highlight state. The [`EdgeDrawer`] renders curves and collects the
//! arrowhead colors in use so marker definitions can be emitted up front.

use std::collections::BTreeMap;

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{ChipDefinition, GLOW_FILTER_ID, LabelChip, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::EdgeRoute,
};

/// Visual style of relationship edges.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDefinition {
    stroke: StrokeDefinition,
    highlight_stroke: StrokeDefinition,
    arrowhead: Color,
    label_chip: ChipDefinition,
}

impl EdgeDefinition {
    pub fn new(
        stroke: StrokeDefinition,
        highlight_stroke: StrokeDefinition,
        arrowhead: Color,
        label_chip: ChipDefinition,
    ) -> Self {
        Self {
            stroke,
            highlight_stroke,
            arrowhead,
            label_chip,
        }
    }

    /// Stroke for the given highlight state.
    pub fn stroke_for(&self, highlighted: bool) -> &StrokeDefinition {
        if highlighted {
            &self.highlight_stroke
        } else {
            &self.stroke
        }
    }

    pub fn arrowhead(&self) -> Color {
        self.arrowhead
    }

    pub fn label_chip(&self) -> &ChipDefinition {
        &self.label_chip
    }
}

/// One drawable relationship.
#[derive(Debug, Clone)]
pub struct EdgeCurve<'a> {
    definition: &'a EdgeDefinition,
    route: EdgeRoute,
    index: usize,
    source: &'a str,
    target: &'a str,
    relation: &'a str,
    highlighted: bool,
}

impl<'a> EdgeCurve<'a> {
    /// Creates an edge for the relationship at `index` in the input document.
    pub fn new(
        definition: &'a EdgeDefinition,
        route: EdgeRoute,
        index: usize,
        endpoints: (&'a str, &'a str),
        relation: &'a str,
    ) -> Self {
        Self {
            definition,
            route,
            index,
            source: endpoints.0,
            target: endpoints.1,
            relation,
            highlighted: false,
        }
    }

    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    fn marker_id(color: Color) -> String {
        format!("arrowhead-{}", color.to_id_safe_string())
    }

    fn render_path(&self) -> svg_element::Path {
        let stroke = self.definition.stroke_for(self.highlighted);
        let path = svg_element::Path::new()
            .set("id", format!("link-{}", self.index))
            .set("d", self.route.to_path_data())
            .set("fill", "none")
            .set(
                "marker-end",
                format!("url(#{})", Self::marker_id(self.definition.arrowhead)),
            )
            .set("data-link-index", self.index.to_string())
            .set("data-source", self.source)
            .set("data-target", self.target);
        let path = crate::apply_stroke!(path, stroke);

        if self.highlighted {
            path.set("filter", format!("url(#{GLOW_FILTER_ID})"))
        } else {
            path
        }
    }

    fn render_label(&self) -> svg_element::Group {
        LabelChip::new(&self.definition.label_chip, self.relation)
            .with_visible(self.highlighted)
            .to_svg_group(self.route.midpoint())
            .set("data-link-index", self.index.to_string())
    }
}

/// Renders edges and collects arrowhead marker colors.
#[derive(Debug, Default)]
pub struct EdgeDrawer {
    markers: BTreeMap<String, Color>,
}

impl EdgeDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws an edge and registers its arrowhead color.
    ///
    /// The curve goes to [`RenderLayer::Edge`], the relation label chip to
    /// [`RenderLayer::EdgeLabel`].
    pub fn draw_edge(&mut self, edge: &EdgeCurve<'_>) -> LayeredOutput {
        let color = edge.definition.arrowhead;
        self.markers.insert(EdgeCurve::marker_id(color), color);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Edge, Box::new(edge.render_path()));
        output.add_to_layer(RenderLayer::EdgeLabel, Box::new(edge.render_label()));
        output
    }

    /// Marker definitions for every arrowhead color drawn so far.
    pub fn marker_definitions(&self) -> Vec<svg_element::Marker> {
        self.markers
            .iter()
            .map(|(id, color)| {
                svg_element::Marker::new()
                    .set("id", id.as_str())
                    .set("markerWidth", 8)
                    .set("markerHeight", 6)
                    .set("refX", 7)
                    .set("refY", 3)
                    .set("orient", "auto")
                    .add(
                        svg_element::Path::new()
                            .set("d", "M0,0 L8,3 L0,6 Z")
                            .set("fill", color.to_opaque_string())
                            .set("fill-opacity", color.alpha()),
                    )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::TextDefinition, geometry::Point};

    fn definition() -> EdgeDefinition {
        let chip = ChipDefinition::new(
            TextDefinition::new(),
            Color::new("#f0f9ff").unwrap(),
            StrokeDefinition::new(Color::new("#90cdf4").unwrap(), 1.0),
        );
        EdgeDefinition::new(
            StrokeDefinition::new(Color::new("#606060").unwrap().with_alpha(0.85), 1.8),
            StrokeDefinition::new(Color::new("#08875d").unwrap(), 3.0),
            Color::new("#64748b").unwrap(),
            chip,
        )
    }

    fn route() -> EdgeRoute {
        EdgeRoute::between(Point::new(0.0, 0.0), Point::new(200.0, 0.0), 22.0, 0.15)
    }

    #[test]
    fn test_draw_edge_layers() {
        let definition = definition();
        let edge = EdgeCurve::new(&definition, route(), 0, ("甲", "乙"), "投资");
        let mut drawer = EdgeDrawer::new();
        let output = drawer.draw_edge(&edge);

        assert_eq!(output.count_in_layer(RenderLayer::Edge), 1);
        assert_eq!(output.count_in_layer(RenderLayer::EdgeLabel), 1);
    }

    #[test]
    fn test_edge_path_attributes() {
        let definition = definition();
        let edge = EdgeCurve::new(&definition, route(), 3, ("甲", "乙"), "投资");
        let rendered = edge.render_path().to_string();

        assert!(rendered.contains("id=\"link-3\""));
        assert!(rendered.contains("data-link-index=\"3\""));
        assert!(rendered.contains("data-source=\"甲\""));
        assert!(rendered.contains("data-target=\"乙\""));
        assert!(rendered.contains("stroke-width=\"1.8\""));
        assert!(rendered.contains("marker-end=\"url(#arrowhead-"));
        assert!(!rendered.contains("filter="));
    }

    #[test]
    fn test_highlighted_edge_glows() {
        let definition = definition();
        let edge = EdgeCurve::new(&definition, route(), 0, ("甲", "乙"), "投资").with_highlighted(true);
        let rendered = edge.render_path().to_string();

        assert!(rendered.contains("stroke-width=\"3\""));
        assert!(rendered.contains("filter=\"url(#glow-effect)\""));
    }

    #[test]
    fn test_label_hidden_unless_highlighted() {
        let definition = definition();
        let edge = EdgeCurve::new(&definition, route(), 0, ("甲", "乙"), "投资");

        let hidden = edge.render_label().to_string();
        assert!(!hidden.contains(" opacity=\"1\""));

        let shown = edge.with_highlighted(true).render_label().to_string();
        assert!(shown.contains(" opacity=\"1\""));
        assert!(shown.contains("投资"));
    }

    #[test]
    fn test_marker_definitions_deduplicate_colors() {
        let definition = definition();
        let mut drawer = EdgeDrawer::new();
        drawer.draw_edge(&EdgeCurve::new(&definition, route(), 0, ("甲", "乙"), "投资"));
        drawer.draw_edge(&EdgeCurve::new(&definition, route(), 1, ("乙", "甲"), "合作"));

        let markers = drawer.marker_definitions();
        assert_eq!(markers.len(), 1);
        assert!(markers[0].to_string().contains("M0,0 L8,3 L0,6 Z"));
    }
}
