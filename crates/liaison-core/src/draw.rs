//! Drawable Components for Relationship-Graph Rendering
//!
//! This module provides drawable abstractions for the visual pieces of a
//! relationship graph: node glyphs, curved relationship edges, rounded label
//! chips, and the shared SVG definitions (markers, filters, gradients) they
//! reference.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically
//! ordered during final SVG generation.
mod chip;
mod defs;
mod edge;
mod layer;
mod node;
mod stroke;
mod text;

pub use chip::{ChipDefinition, ChipWidth, LabelChip};
pub use defs::{GLOW_FILTER_ID, NODE_SHADOW_FILTER_ID, glow_filter, node_shadow_filter, radial_highlight};
pub use edge::{EdgeCurve, EdgeDefinition, EdgeDrawer};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node::{NodeDefinition, NodeGlyph};
pub use stroke::StrokeDefinition;
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable graph elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// Simple drawables typically emit to a single layer, while composite
    /// drawables can emit different elements to different layers for proper
    /// z-ordering.
    ///
    /// # Arguments
    ///
    /// * `position` - The position where this drawable should be rendered
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
