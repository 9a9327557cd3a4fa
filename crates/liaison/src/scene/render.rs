//! SVG element builders for the scene and its static overlays.
//!
//! Scene elements (edges, relation labels, nodes) are emitted as
//! [`LayeredOutput`] so the exporter can place them under the view
//! transform. Overlays (legend, instructions, status messages) are plain
//! groups drawn in screen space.

use svg::node::element as svg_element;

use liaison_core::{
    draw::{
        Drawable, EdgeCurve, EdgeDrawer, LabelChip, LayeredOutput, NodeGlyph, Text, glow_filter,
        node_shadow_filter, radial_highlight,
    },
    geometry::Point,
};

use super::{Scene, SceneEdge, SceneNode, Theme};
use crate::layout::{Band, BandAssignment, Viewport};

/// Horizontal distance of the legend's second entry from its first.
const LEGEND_ENTRY_SPACING: f32 = 60.0;

/// Opaque full-bleed backdrop.
pub fn build_background(viewport: Viewport, theme: &Theme) -> svg_element::Rectangle {
    let color = theme.background();
    svg_element::Rectangle::new()
        .set("data-role", "background")
        .set("x", 0)
        .set("y", 0)
        .set("width", viewport.width())
        .set("height", viewport.height())
        .set("fill", color.to_opaque_string())
        .set("fill-opacity", color.alpha())
}

/// Shared definitions: arrowhead markers, the node shadow and edge glow
/// filters, and one radial highlight gradient per node.
///
/// Markers come from `drawer`, so every edge must be drawn before this is
/// called.
pub fn build_definitions(
    scene: Option<&Scene>,
    theme: &Theme,
    drawer: &EdgeDrawer,
) -> svg_element::Definitions {
    let mut defs = svg_element::Definitions::new()
        .add(node_shadow_filter())
        .add(glow_filter());

    for marker in drawer.marker_definitions() {
        defs = defs.add(marker);
    }

    for node in scene.map(Scene::nodes).unwrap_or_default() {
        let definition = theme.node(node.band());
        defs = defs.add(radial_highlight(
            node.gradient_id(),
            definition.outline().color(),
            definition.fill(),
        ));
    }
    defs
}

/// Curve and relation label of one edge.
pub fn build_edge(
    edge: &SceneEdge,
    theme: &Theme,
    highlighted: bool,
    drawer: &mut EdgeDrawer,
) -> LayeredOutput {
    let curve = EdgeCurve::new(
        theme.edge(),
        *edge.route(),
        edge.id().link_index(),
        (edge.source(), edge.target()),
        edge.relation(),
    )
    .with_highlighted(highlighted);
    drawer.draw_edge(&curve)
}

/// Glyph of one node at its current position.
pub fn build_node(node: &SceneNode, theme: &Theme, highlighted: bool) -> LayeredOutput {
    NodeGlyph::new(theme.node(node.band()), node.id(), node.entity().label())
        .with_gradient(node.gradient_id())
        .with_highlighted(highlighted)
        .render_to_layers(node.position())
}

/// Legend pill naming the two bands.
///
/// Captions default to the band's group names unless the style overrides
/// them.
pub fn build_legend(theme: &Theme, bands: &BandAssignment) -> svg_element::Group {
    let chip = theme.legend_chip();
    let size = LabelChip::new(chip, "").calculate_size();

    let background = svg_element::Rectangle::new()
        .set("width", size.width())
        .set("height", size.height())
        .set("rx", chip.corner_radius())
        .set("ry", chip.corner_radius())
        .set("fill", chip.fill().to_opaque_string())
        .set("fill-opacity", chip.fill().alpha());
    let background = liaison_core::apply_stroke!(background, chip.stroke());

    let entries = [
        (
            Band::Primary,
            theme.primary_label().or(bands.primary_group()).unwrap_or_default(),
        ),
        (
            Band::Secondary,
            theme.secondary_label().or(bands.secondary_group()).unwrap_or_default(),
        ),
    ];

    let middle = size.height() / 2.0;
    let mut group = svg_element::Group::new()
        .set("data-role", "legend")
        .set("transform", "translate(30, 30)")
        .add(background);

    for (slot, (band, caption)) in entries.into_iter().enumerate() {
        let offset = 15.0 + LEGEND_ENTRY_SPACING * slot as f32;
        let swatch = svg_element::Circle::new()
            .set("cx", offset)
            .set("cy", middle)
            .set("r", 8)
            .set("fill", theme.node(band).fill().to_string());
        let text = Text::new(theme.legend_text(), caption)
            .to_svg_element(Point::new(offset + 15.0, middle));
        group = group.add(swatch).add(text);
    }
    group
}

/// Instruction pill anchored to the top-right corner.
pub fn build_instructions(theme: &Theme, viewport: Viewport) -> svg_element::Group {
    let chip = LabelChip::new(theme.instruction_chip(), theme.instruction_text());
    let size = chip.calculate_size();
    let center = Point::new(
        viewport.width() - 10.0 - size.width() / 2.0,
        10.0 + size.height() / 2.0,
    );
    chip.to_svg_group(center).set("data-role", "instructions")
}

/// Centered status line for the loading, failed and empty states.
pub fn build_message(theme: &Theme, viewport: Viewport, message: &str) -> svg_element::Text {
    Text::new(theme.message_text(), message)
        .to_svg_element(viewport.center())
        .set("data-role", "status")
}
