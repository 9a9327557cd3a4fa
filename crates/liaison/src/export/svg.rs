//! SVG export backend.
//!
//! [`SvgBuilder`] configures an [`Svg`] exporter around any
//! [`io::Write`] sink. The document is laid out as:
//!
//! 1. the full-bleed background,
//! 2. shared definitions (markers, filters, gradients),
//! 3. the scene group carrying the view transform, holding one `<g>` per
//!    render layer,
//! 4. the overlays (legend, instructions or status message), which ignore
//!    the view transform.

use std::io;

use log::{debug, error, info};
use svg::{self, node::element as svg_element};

use liaison_core::draw::{EdgeDrawer, LayeredOutput};

use crate::{
    export::{self, Exporter, Frame, FrameContent},
    scene::{
        Theme, build_background, build_definitions, build_edge, build_instructions, build_legend,
        build_message, build_node,
    },
};

/// Builder for [`Svg`] exporters.
pub struct SvgBuilder<'a, W> {
    writer: W,
    theme: Option<&'a Theme>,
}

impl<'a, W: io::Write> SvgBuilder<'a, W> {
    /// Creates a builder writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            theme: None,
        }
    }

    /// Sets the theme used to style every element.
    pub fn with_theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when no theme was set.
    pub fn build(self) -> Result<Svg<'a, W>, export::Error> {
        let theme = self
            .theme
            .ok_or_else(|| export::Error::Render("SVG exporter requires a theme".to_string()))?;
        Ok(Svg {
            writer: self.writer,
            theme,
        })
    }
}

/// SVG exporter writing one document per exported frame.
pub struct Svg<'a, W> {
    writer: W,
    theme: &'a Theme,
}

impl<W: io::Write> Svg<'_, W> {
    /// Renders a frame to an SVG document.
    pub fn render_frame(&self, frame: &Frame<'_>) -> svg::Document {
        let viewport = frame.viewport();
        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", viewport.width(), viewport.height()),
            )
            .set("width", viewport.width())
            .set("height", viewport.height())
            .add(build_background(viewport, self.theme));

        match frame.content() {
            FrameContent::Scene {
                scene,
                view,
                highlight,
            } => {
                let mut drawer = EdgeDrawer::new();
                let mut output = LayeredOutput::new();
                for edge in scene.edges() {
                    let highlighted = highlight.is_edge_highlighted(edge.id());
                    output.merge(build_edge(edge, self.theme, highlighted, &mut drawer));
                }
                for node in scene.nodes() {
                    let highlighted = highlight.is_node_highlighted(node.id());
                    output.merge(build_node(node, self.theme, highlighted));
                }
                debug!(
                    nodes = scene.nodes().len(),
                    edges = scene.edges().len();
                    "Scene elements rendered"
                );

                let mut scene_group = svg_element::Group::new()
                    .set("data-role", "scene")
                    .set("transform", view.to_svg_transform());
                for layer in output.render() {
                    scene_group = scene_group.add(layer);
                }

                let mut overlays = self.overlay_group();
                if self.theme.show_legend() {
                    overlays = overlays.add(build_legend(self.theme, scene.bands()));
                }
                if self.theme.show_instructions() {
                    overlays = overlays.add(build_instructions(self.theme, viewport));
                }

                doc.add(build_definitions(Some(scene), self.theme, &drawer))
                    .add(scene_group)
                    .add(overlays)
            }
            FrameContent::Message(message) => doc.add(
                self.overlay_group()
                    .add(build_message(self.theme, viewport, message)),
            ),
        }
    }

    fn overlay_group(&self) -> svg_element::Group {
        svg_element::Group::new().set("data-layer", "overlay")
    }

    /// Writes an SVG document to the sink.
    pub fn write_document(&mut self, doc: &svg::Document) -> Result<(), export::Error> {
        if let Err(err) = svg::write(&mut self.writer, doc) {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }
        Ok(())
    }

    /// Consumes the exporter, returning the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Exporter for Svg<'_, W> {
    fn export_frame(&mut self, frame: &Frame<'_>) -> Result<(), export::Error> {
        let doc = self.render_frame(frame);
        debug!("SVG document rendered");

        self.write_document(&doc)?;
        info!("SVG frame exported");
        Ok(())
    }
}

/// Renders a frame into an in-memory SVG string.
pub fn render_to_string(theme: &Theme, frame: &Frame<'_>) -> Result<String, export::Error> {
    let mut exporter = SvgBuilder::new(Vec::new()).with_theme(theme).build()?;
    exporter.export_frame(frame)?;
    String::from_utf8(exporter.into_inner())
        .map_err(|err| export::Error::Render(format!("SVG output is not UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LayoutConfig,
        document::{Entity, GraphDocument, Relationship},
        interaction::{HighlightSet, ViewTransform},
        layout::{ArcLayout, BandAssignment, Viewport},
        scene::Scene,
    };

    fn scene() -> Scene {
        let document = GraphDocument::new(
            vec![Entity::new("甲", "市长", "官员"), Entity::new("乙", "地产公司", "企业")],
            vec![Relationship::new("甲", "乙", "行贿")],
        );
        let bands = BandAssignment::assign(document.nodes(), &LayoutConfig::default());
        let positions =
            ArcLayout::default().compute_layout(document.nodes(), &bands, Viewport::default());
        Scene::build(&document, &positions, bands, &Theme::default(), 0.15)
    }

    #[test]
    fn test_builder_requires_theme() {
        assert!(SvgBuilder::new(Vec::new()).build().is_err());
    }

    #[test]
    fn test_scene_frame_structure() {
        let scene = scene();
        let theme = Theme::default();
        let highlight = HighlightSet::default();
        let frame = Frame::new(
            Viewport::new(800.0, 600.0),
            FrameContent::Scene {
                scene: &scene,
                view: ViewTransform::default(),
                highlight: &highlight,
            },
        );

        let rendered = render_to_string(&theme, &frame).unwrap();
        assert!(rendered.contains("viewBox=\"0 0 800 600\""));
        assert!(rendered.contains("translate(0, 0) scale(1)"));
        assert!(rendered.contains("data-layer=\"edge\""));
        assert!(rendered.contains("data-layer=\"node\""));
        assert!(rendered.contains("data-role=\"legend\""));
        assert!(rendered.contains("data-role=\"instructions\""));
        assert!(rendered.contains("行贿"));

        // Background first, overlays after the scene
        let background = rendered.find("data-role=\"background\"").unwrap();
        let scene_group = rendered.find("data-role=\"scene\"").unwrap();
        let legend = rendered.find("data-role=\"legend\"").unwrap();
        assert!(background < scene_group && scene_group < legend);
    }

    #[test]
    fn test_message_frame_has_no_scene() {
        let theme = Theme::default();
        let frame = Frame::new(Viewport::default(), FrameContent::Message("加载关系图..."));

        let rendered = render_to_string(&theme, &frame).unwrap();
        assert!(rendered.contains("加载关系图..."));
        assert!(!rendered.contains("data-role=\"scene\""));
        assert!(!rendered.contains("data-node-id"));
    }
}
