//! Liaison - interactive relationship-graph rendering.
//!
//! Lays out entities of two groups on opposing arcs, connects them with
//! curved, labeled arrows and renders the result as SVG. A [`GraphView`]
//! keeps the laid-out scene alive so hosts can drag nodes, zoom and hover
//! with targeted updates instead of full rebuilds.

pub mod config;
pub mod document;
pub mod export;
pub mod interaction;
pub mod layout;
pub mod loader;
pub mod redraw;
pub mod scene;

mod error;
mod session;
mod structure;
mod view;

pub use liaison_core::{color, draw, geometry};

pub use error::LiaisonError;
pub use session::{Session, TimedEvent};
pub use view::{EMPTY_MESSAGE, GraphView, LOADING_MESSAGE, ViewStatus};

use log::{debug, info, trace};

use config::AppConfig;
use document::GraphDocument;
use layout::{ArcLayout, BandAssignment, PositionTable, Viewport};
use loader::GraphSource;

/// Builder for the one-shot load, layout and render pipeline.
///
/// # Examples
///
/// ```rust,no_run
/// use liaison::{GraphRenderer, config::AppConfig, loader::MemorySource};
///
/// let source = MemorySource::new(r#"{"nodes": [{"id": "a", "label": "A", "group": "x"}]}"#);
/// let renderer = GraphRenderer::new(AppConfig::default());
///
/// let document = renderer.load(&source).expect("Failed to load");
/// let svg = renderer.render_svg(document).expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug, Default)]
pub struct GraphRenderer {
    config: AppConfig,
    viewport: Viewport,
}

impl GraphRenderer {
    /// Creates a renderer with the given configuration and the default
    /// 800x600 viewport.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
        }
    }

    /// Sets the viewport the graph is laid out in.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Fetches and validates a graph document.
    ///
    /// An empty document is returned as is; it renders as the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`LiaisonError::Load`] if fetching, parsing or validation
    /// fails.
    pub fn load(&self, source: &dyn GraphSource) -> Result<GraphDocument, LiaisonError> {
        info!(origin = source.describe(); "Loading graph document");
        let text = source.fetch()?;
        let document = GraphDocument::from_json(&text)?;

        debug!(
            nodes = document.nodes().len(),
            links = document.links().len();
            "Graph document loaded"
        );
        trace!(document:?; "Parsed graph document");
        Ok(document)
    }

    /// Computes the initial position of every entity.
    pub fn layout(&self, document: &GraphDocument) -> PositionTable {
        let bands = BandAssignment::assign(document.nodes(), self.config.layout());
        ArcLayout::from_config(self.config.layout()).compute_layout(
            document.nodes(),
            &bands,
            self.viewport,
        )
    }

    /// Mounts a view around `document`, ready for interaction.
    ///
    /// # Errors
    ///
    /// Returns [`LiaisonError::Config`] for an invalid configuration.
    pub fn mount(&self, document: GraphDocument) -> Result<GraphView, LiaisonError> {
        let mut view = GraphView::preloaded(self.config.clone(), document, self.viewport)?;
        let status = view.mount();
        info!(status:?; "View mounted");
        Ok(view)
    }

    /// Renders `document` to an SVG string without interaction.
    ///
    /// # Errors
    ///
    /// Returns `LiaisonError` for configuration or export errors.
    pub fn render_svg(&self, document: GraphDocument) -> Result<String, LiaisonError> {
        let svg = self.mount(document)?.render_svg()?;
        info!("SVG rendered successfully");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemorySource;

    #[test]
    fn test_load_rejects_invalid_document() {
        let renderer = GraphRenderer::default();
        let result = renderer.load(&MemorySource::new(r#"{"nodes": [{"id": ""}]}"#));
        assert!(matches!(result, Err(LiaisonError::Load(_))));
    }

    #[test]
    fn test_layout_respects_viewport() {
        let renderer = GraphRenderer::default().with_viewport(Viewport::new(400.0, 300.0));
        let document = renderer
            .load(&MemorySource::new(
                r#"{"nodes": [{"id": "a", "group": "x"}, {"id": "b", "group": "y"}]}"#,
            ))
            .unwrap();

        let positions = renderer.layout(&document);
        assert_eq!(positions.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert!(positions.values().all(|p| p.x() >= 0.0 && p.x() <= 400.0));
    }

    #[test]
    fn test_render_empty_document() {
        let svg = GraphRenderer::default()
            .render_svg(GraphDocument::default())
            .unwrap();
        assert!(svg.contains(EMPTY_MESSAGE));
    }
}
