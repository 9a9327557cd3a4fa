//! Layer-based rendering system for SVG output.
//!
//! Drawables place their SVG elements on a [`RenderLayer`]; the
//! [`LayeredOutput`] collecting them emits one `<g data-layer=...>` group per
//! non-empty layer in z-order.
//!
//! # Example
//!
//! ```
//! # use liaison_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Circle, Path};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
//!
//! // Edges render below nodes regardless of insertion order
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// The `Ord` derive uses declaration order, so the first variant renders first
/// (bottom) and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Full-bleed backdrop
    Background,
    /// Relationship curves
    Edge,
    /// Relation label chips anchored on curve midpoints
    EdgeLabel,
    /// Node glyph groups
    Node,
    /// Legend, instructions and status messages; unaffected by pan/zoom
    Overlay,
}

impl RenderLayer {
    /// Returns the name emitted as the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Edge => "edge",
            Self::EdgeLabel => "edge-label",
            Self::Node => "node",
            Self::Overlay => "overlay",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes placed on `layer`.
    pub fn count_in_layer(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute. Nodes keep their insertion order within a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Circle, Path, Rectangle};

    use super::*;

    #[test]
    fn test_layered_output_new_is_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_merge() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));

        output1.merge(output2);
        assert_eq!(output1.count_in_layer(RenderLayer::Node), 1);
        assert_eq!(output1.count_in_layer(RenderLayer::Edge), 1);
        assert_eq!(output1.render().len(), 2);
    }

    #[test]
    fn test_layered_output_same_layer_shares_group() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));

        assert_eq!(output.render().len(), 1);
    }

    #[test]
    fn test_layered_output_render_order() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Overlay, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("data-layer=\"background\""));
        assert!(rendered[1].contains("data-layer=\"node\""));
        assert!(rendered[2].contains("data-layer=\"overlay\""));
    }

    #[test]
    fn test_layer_ordering() {
        assert!(RenderLayer::Background < RenderLayer::Edge);
        assert!(RenderLayer::Edge < RenderLayer::EdgeLabel);
        assert!(RenderLayer::EdgeLabel < RenderLayer::Node);
        assert!(RenderLayer::Node < RenderLayer::Overlay);
    }
}
