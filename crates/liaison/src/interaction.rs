//! Direct manipulation: drag, zoom and hover.
//!
//! The [`Controller`] owns the drag state, the view transform and the
//! highlight set. It turns host events into mutations of the position table
//! and targeted scene updates, and reports what changed as [`Effect`]s.
//!
//! All pointer coordinates arriving here are in screen space; they are
//! mapped into scene space with [`ViewTransform::to_scene`] before hit
//! testing or dragging.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use liaison_core::geometry::Point;

use crate::{
    config::InteractionConfig,
    layout::{PositionTable, Viewport},
    scene::{EdgeId, HitTarget, Scene, SceneDelta},
};

/// Inverse of the precision zoom scales are snapped to.
const SCALE_GRID: f32 = 10_000.0;

/// Host events, deserializable so recorded sessions can be replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Wheel { x: f32, y: f32, delta_y: f32 },
    ZoomIn,
    ZoomOut,
    Resize { width: f32, height: f32 },
    Visibility { visible: bool },
}

/// Transient drag state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        target_id: String,
        /// Pointer position relative to the node center at grab time.
        grab_offset: Point,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { target_id, .. } => Some(target_id),
        }
    }
}

/// Maps scene coordinates to screen coordinates: `screen = offset + scene * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    offset: Point,
    scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn new(offset: Point, scale: f32) -> Self {
        Self { offset, scale }
    }

    pub fn offset(self) -> Point {
        self.offset
    }

    pub fn scale(self) -> f32 {
        self.scale
    }

    /// Inverse of the transform: removes the offset, then divides by the scale.
    pub fn to_scene(self, screen: Point) -> Point {
        screen.sub_point(self.offset).scale(1.0 / self.scale)
    }

    pub fn to_screen(self, scene: Point) -> Point {
        self.offset.add_point(scene.scale(self.scale))
    }

    /// Changes the scale while keeping the scene point under `anchor` fixed.
    fn zoom_about(&mut self, anchor: Point, scale: f32) {
        let scene_anchor = self.to_scene(anchor);
        self.scale = scale;
        self.offset = anchor.sub_point(scene_anchor.scale(scale));
    }

    /// SVG `transform` attribute value for the scene group.
    pub fn to_svg_transform(self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.offset.x(),
            self.offset.y(),
            self.scale
        )
    }
}

/// Elements currently drawn highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    hovered_node: Option<String>,
    hovered_edge: Option<EdgeId>,
}

impl HighlightSet {
    pub fn hovered_node(&self) -> Option<&str> {
        self.hovered_node.as_deref()
    }

    pub fn hovered_edge(&self) -> Option<EdgeId> {
        self.hovered_edge
    }

    pub fn is_node_highlighted(&self, id: &str) -> bool {
        self.hovered_node.as_deref() == Some(id)
    }

    pub fn is_edge_highlighted(&self, id: EdgeId) -> bool {
        self.hovered_edge == Some(id)
    }

    /// The single hovered element, if any.
    pub fn target(&self) -> Option<HitTarget> {
        match (&self.hovered_node, self.hovered_edge) {
            (Some(id), _) => Some(HitTarget::Node(id.clone())),
            (None, Some(id)) => Some(HitTarget::Edge(id)),
            (None, None) => None,
        }
    }

    fn set(&mut self, target: Option<&HitTarget>) {
        self.hovered_node = None;
        self.hovered_edge = None;
        match target {
            Some(HitTarget::Node(id)) => self.hovered_node = Some(id.clone()),
            Some(HitTarget::Edge(id)) => self.hovered_edge = Some(*id),
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    pub fn is_empty(&self) -> bool {
        self.hovered_node.is_none() && self.hovered_edge.is_none()
    }
}

/// Observable outcome of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    HoverEnter(HitTarget),
    HoverLeave(HitTarget),
    DragStart { node_id: String },
    DragMove { node_id: String, position: Point, delta: SceneDelta },
    DragEnd { node_id: String },
    ZoomChanged { scale: f32 },
    RedrawScheduled,
}

/// Effects of one event plus whether the host's default action must be
/// suppressed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    effects: Vec<Effect>,
    prevent_default: bool,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Returns `true` if the host must suppress its native handling, such as
    /// page scrolling on wheel events.
    pub fn prevent_default(&self) -> bool {
        self.prevent_default
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Merges another response into this one.
    pub fn extend(&mut self, other: Response) {
        self.effects.extend(other.effects);
        self.prevent_default |= other.prevent_default;
    }
}

/// Interaction state machine for one view.
#[derive(Debug, Clone)]
pub struct Controller {
    config: InteractionConfig,
    drag: DragState,
    view: ViewTransform,
    highlight: HighlightSet,
}

impl Controller {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            drag: DragState::Idle,
            view: ViewTransform::default(),
            highlight: HighlightSet::default(),
        }
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn scale(&self) -> f32 {
        self.view.scale
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    /// Grabs the node under the pointer. Ignored while already dragging.
    pub fn pointer_down(&mut self, screen: Point, scene: &Scene) -> Response {
        let mut response = Response::new();
        if self.drag.is_dragging() {
            trace!("Pointer down while dragging; ignored");
            return response;
        }

        let point = self.view.to_scene(screen);
        let hit = scene.hit_test(
            point,
            self.highlight.hovered_node(),
            self.config.edge_hit_tolerance(),
        );
        let Some(HitTarget::Node(node_id)) = hit else {
            return response;
        };
        let Some(node) = scene.node(&node_id) else {
            return response;
        };

        let grab_offset = point.sub_point(node.position());
        debug!(node_id, dx = grab_offset.x(), dy = grab_offset.y(); "Drag started");

        self.update_hover(Some(HitTarget::Node(node_id.clone())), &mut response);
        self.drag = DragState::Dragging {
            target_id: node_id.clone(),
            grab_offset,
        };
        response.push(Effect::DragStart { node_id });
        response.with_prevent_default()
    }

    /// Moves the dragged node, or updates hover state while idle.
    pub fn pointer_move(
        &mut self,
        screen: Point,
        scene: &mut Scene,
        positions: &mut PositionTable,
    ) -> Response {
        let point = self.view.to_scene(screen);
        let mut response = Response::new();

        match &self.drag {
            DragState::Dragging {
                target_id,
                grab_offset,
            } => {
                let node_id = target_id.clone();
                let position = point.sub_point(*grab_offset);
                let Some(slot) = positions.get_mut(&node_id) else {
                    debug!(node_id; "Dragged node vanished from the position table");
                    return response;
                };
                *slot = position;

                let delta = scene.apply_partial_update(positions, &node_id);
                trace!(node_id, x = position.x(), y = position.y(); "Dragged node");
                response.push(Effect::DragMove {
                    node_id,
                    position,
                    delta,
                });
            }
            DragState::Idle => {
                let hit = scene.hit_test(
                    point,
                    self.highlight.hovered_node(),
                    self.config.edge_hit_tolerance(),
                );
                self.update_hover(hit, &mut response);
            }
        }
        response
    }

    /// Releases the drag, wherever the pointer is.
    pub fn pointer_up(&mut self, screen: Point, scene: &Scene) -> Response {
        let mut response = Response::new();
        if let DragState::Dragging { target_id, .. } = std::mem::take(&mut self.drag) {
            debug!(node_id = target_id; "Drag ended");
            response.push(Effect::DragEnd { node_id: target_id });
        }

        let point = self.view.to_scene(screen);
        let hit = scene.hit_test(
            point,
            self.highlight.hovered_node(),
            self.config.edge_hit_tolerance(),
        );
        self.update_hover(hit, &mut response);
        response
    }

    /// Steps the zoom around the cursor. Always suppresses native scrolling.
    pub fn wheel(&mut self, screen: Point, delta_y: f32) -> Response {
        let step = if delta_y > 0.0 {
            -self.config.zoom_step()
        } else {
            self.config.zoom_step()
        };
        self.zoom_to(self.view.scale + step, screen)
            .with_prevent_default()
    }

    /// Zooms in one step around the viewport center.
    pub fn zoom_in(&mut self, viewport: Viewport) -> Response {
        self.zoom_to(self.view.scale + self.config.zoom_step(), viewport.center())
    }

    /// Zooms out one step around the viewport center.
    pub fn zoom_out(&mut self, viewport: Viewport) -> Response {
        self.zoom_to(self.view.scale - self.config.zoom_step(), viewport.center())
    }

    /// Resets drag and hover state.
    pub fn teardown(&mut self) {
        self.drag = DragState::Idle;
        self.highlight.clear();
    }

    /// Clears hover state pointing at elements the scene no longer holds.
    pub fn forget_missing(&mut self, scene: &Scene) {
        let stale = match self.highlight.target() {
            Some(HitTarget::Node(id)) => scene.node(&id).is_none(),
            Some(HitTarget::Edge(id)) => scene.edge(id).is_none(),
            None => false,
        };
        if stale {
            self.highlight.clear();
        }
        let dragged_missing = self
            .drag
            .target_id()
            .is_some_and(|id| scene.node(id).is_none());
        if dragged_missing {
            self.drag = DragState::Idle;
        }
    }

    fn zoom_to(&mut self, requested: f32, anchor: Point) -> Response {
        let mut response = Response::new();
        let scale = self.clamp_scale(requested);
        if scale == self.view.scale {
            return response;
        }

        self.view.zoom_about(anchor, scale);
        debug!(scale; "Zoom changed");
        response.push(Effect::ZoomChanged { scale });
        response
    }

    /// Snaps to a 0.0001 grid, then clamps to the configured bounds.
    ///
    /// The grid absorbs float drift from repeated steps without swallowing
    /// any step [`InteractionConfig::validate`] accepts.
    fn clamp_scale(&self, scale: f32) -> f32 {
        let snapped = (scale * SCALE_GRID).round() / SCALE_GRID;
        snapped.clamp(self.config.min_scale(), self.config.max_scale())
    }

    /// Replaces the hovered element, reporting leave before enter.
    ///
    /// The dragged node keeps its highlight for the whole drag.
    fn update_hover(&mut self, hit: Option<HitTarget>, response: &mut Response) {
        if self.drag.is_dragging() {
            return;
        }
        let current = self.highlight.target();
        if current == hit {
            return;
        }
        if let Some(previous) = current {
            response.push(Effect::HoverLeave(previous));
        }
        self.highlight.set(hit.as_ref());
        if let Some(entered) = hit {
            trace!(hit:? = entered; "Hover entered");
            response.push(Effect::HoverEnter(entered));
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}
