//! Session facade tying loading, layout, scene and interaction together.

use std::time::{Duration, Instant};

use log::{debug, info};

use liaison_core::geometry::Point;

use crate::{
    config::AppConfig,
    document::GraphDocument,
    error::LiaisonError,
    export::{Frame, FrameContent, svg::render_to_string},
    interaction::{Controller, Effect, InteractionEvent, Response},
    layout::{ArcLayout, BandAssignment, PositionTable, Viewport},
    loader::{GraphSource, LoadState, Loader},
    redraw::{RedrawReason, RedrawScheduler},
    scene::{Scene, Theme},
};

/// Status line shown while the document is being fetched.
pub const LOADING_MESSAGE: &str = "加载关系图...";

/// Status line shown when the document holds no entities.
pub const EMPTY_MESSAGE: &str = "没有可用的关系图数据";

/// Externally visible state of a view. Exactly one holds at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    /// Loading failed; carries the rendered error.
    Failed(String),
    Empty,
    Ready,
}

impl ViewStatus {
    /// Status line to draw instead of the graph, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE.to_string()),
            Self::Failed(error) => Some(format!("加载关系图出错: {error}")),
            Self::Empty => Some(EMPTY_MESSAGE.to_string()),
            Self::Ready => None,
        }
    }
}

impl From<&LoadState> for ViewStatus {
    fn from(state: &LoadState) -> Self {
        match state {
            LoadState::Loading => Self::Loading,
            LoadState::Ready(_) => Self::Ready,
            LoadState::Empty => Self::Empty,
            LoadState::Failed(error) => Self::Failed(error.clone()),
        }
    }
}

/// One mounted relationship-graph view.
///
/// Owns every piece of state the view needs, so independent views can
/// coexist. Hosts call [`GraphView::mount`] once, forward events through
/// [`GraphView::handle`], poll [`GraphView::tick`] for debounced redraws and
/// call [`GraphView::teardown`] when the view goes away.
#[derive(Debug)]
pub struct GraphView {
    config: AppConfig,
    theme: Theme,
    loader: Loader,
    viewport: Viewport,
    pending_viewport: Option<Viewport>,
    positions: PositionTable,
    scene: Option<Scene>,
    controller: Controller,
    redraw: RedrawScheduler,
}

impl GraphView {
    /// Creates an unmounted view reading its document from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LiaisonError::Config`] when the configuration is invalid.
    pub fn new(
        config: AppConfig,
        source: Box<dyn GraphSource>,
        viewport: Viewport,
    ) -> Result<Self, LiaisonError> {
        Self::with_loader(config, Loader::new(source), viewport)
    }

    /// Creates a view around an already parsed document.
    ///
    /// The view still has to be mounted before it shows the graph.
    pub fn preloaded(
        config: AppConfig,
        document: GraphDocument,
        viewport: Viewport,
    ) -> Result<Self, LiaisonError> {
        Self::with_loader(config, Loader::preloaded(document), viewport)
    }

    fn with_loader(
        config: AppConfig,
        loader: Loader,
        viewport: Viewport,
    ) -> Result<Self, LiaisonError> {
        config
            .interaction()
            .validate()
            .map_err(LiaisonError::Config)?;
        let theme = Theme::from_config(config.style())?;

        Ok(Self {
            controller: Controller::new(config.interaction().clone()),
            redraw: RedrawScheduler::new(config.interaction().redraw_delay()),
            config,
            theme,
            loader,
            viewport,
            pending_viewport: None,
            positions: PositionTable::new(),
            scene: None,
        })
    }

    /// Loads the document, then lays out and builds the scene.
    ///
    /// Loading happens at most once; later calls return the settled status.
    pub fn mount(&mut self) -> ViewStatus {
        if self.scene.is_none() {
            self.loader.load();
            self.rebuild();
        }
        self.status()
    }

    pub fn status(&self) -> ViewStatus {
        ViewStatus::from(self.loader.state())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Debounce delay of resize and visibility redraws.
    pub fn redraw_delay(&self) -> Duration {
        self.redraw.delay()
    }

    /// Routes one host event. Events after teardown are ignored.
    pub fn handle(&mut self, event: &InteractionEvent, now: Instant) -> Response {
        if self.loader.is_torn_down() {
            return Response::new();
        }

        match *event {
            InteractionEvent::PointerDown { x, y } => match &self.scene {
                Some(scene) => self.controller.pointer_down(Point::new(x, y), scene),
                None => Response::new(),
            },
            InteractionEvent::PointerMove { x, y } => match &mut self.scene {
                Some(scene) => {
                    self.controller
                        .pointer_move(Point::new(x, y), scene, &mut self.positions)
                }
                None => Response::new(),
            },
            InteractionEvent::PointerUp { x, y } => match &self.scene {
                Some(scene) => self.controller.pointer_up(Point::new(x, y), scene),
                None => Response::new(),
            },
            InteractionEvent::Wheel { x, y, delta_y } => {
                self.controller.wheel(Point::new(x, y), delta_y)
            }
            InteractionEvent::ZoomIn => self.controller.zoom_in(self.viewport),
            InteractionEvent::ZoomOut => self.controller.zoom_out(self.viewport),
            InteractionEvent::Resize { width, height } => {
                self.pending_viewport = Some(Viewport::new(width, height));
                self.redraw.schedule(RedrawReason::Resize, now);
                let mut response = Response::new();
                response.push(Effect::RedrawScheduled);
                response
            }
            InteractionEvent::Visibility { visible } => {
                let mut response = Response::new();
                if self.redraw.schedule_visibility(visible, now) {
                    response.push(Effect::RedrawScheduled);
                }
                response
            }
        }
    }

    /// Runs a due redraw. Returns `true` if the scene was rebuilt.
    ///
    /// The viewport measured by the last resize is applied at this point,
    /// not when the resize arrived.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(reason) = self.redraw.poll(now) else {
            return false;
        };
        if let Some(viewport) = self.pending_viewport.take() {
            self.viewport = viewport;
        }
        info!(
            reason:?,
            width = self.viewport.width(),
            height = self.viewport.height();
            "Redrawing view"
        );
        self.rebuild();
        true
    }

    /// Renders the current state as a standalone SVG document.
    ///
    /// A ready view shows the graph; every other status shows its status
    /// line over the background.
    pub fn render_svg(&self) -> Result<String, LiaisonError> {
        let message = self.status().message();
        let content = match (&self.scene, &message) {
            (Some(scene), None) => FrameContent::Scene {
                scene,
                view: self.controller.view(),
                highlight: self.controller.highlight(),
            },
            (_, Some(message)) => FrameContent::Message(message),
            (None, None) => FrameContent::Message(LOADING_MESSAGE),
        };

        let svg = render_to_string(&self.theme, &Frame::new(self.viewport, content))?;
        debug!(bytes = svg.len(); "View rendered");
        Ok(svg)
    }

    /// Stops the view: pending loads and redraws are dropped, drag and
    /// hover state reset.
    pub fn teardown(&mut self) {
        self.loader.teardown();
        self.controller.teardown();
        self.redraw.cancel();
        self.pending_viewport = None;
        info!("View torn down");
    }

    /// Re-runs layout and rebuilds the scene from scratch.
    ///
    /// Manual drag positions are discarded.
    fn rebuild(&mut self) {
        let LoadState::Ready(document) = self.loader.state() else {
            self.positions.clear();
            self.scene = None;
            return;
        };

        let layout_config = self.config.layout();
        let bands = BandAssignment::assign(document.nodes(), layout_config);
        self.positions = ArcLayout::from_config(layout_config).compute_layout(
            document.nodes(),
            &bands,
            self.viewport,
        );

        let scene = Scene::build(
            document,
            &self.positions,
            bands,
            &self.theme,
            layout_config.curvature(),
        );
        self.controller.forget_missing(&scene);
        self.scene = Some(scene);
    }
}
