//! Retained scene of a laid-out relationship graph.
//!
//! A [`Scene`] pairs every drawable entity with its position and every
//! drawable relationship with its routed curve. It is built from the
//! [`PositionTable`] once and afterwards only changes through
//! [`Scene::apply_partial_update`], which re-routes the edges incident to a
//! single moved node.
//!
//! Rendering lives in [`render`]; resolved styling in [`theme`].

pub mod render;
pub mod theme;

use std::{collections::HashMap, fmt};

use log::{debug, info, trace};

use liaison_core::geometry::{EdgeRoute, Point};

use crate::{
    document::{Entity, GraphDocument},
    layout::{Band, BandAssignment, PositionTable},
    structure::RelationGraph,
};

pub use render::{
    build_background, build_definitions, build_edge, build_instructions, build_legend,
    build_message, build_node,
};
pub use theme::Theme;

/// Stable identifier of a drawn relationship.
///
/// Wraps the relationship's index in the document's `links` array, so ids
/// never shift when dangling links are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn new(link_index: usize) -> Self {
        Self(link_index)
    }

    pub fn link_index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link-{}", self.0)
    }
}

/// A positioned entity.
#[derive(Debug, Clone)]
pub struct SceneNode {
    entity: Entity,
    band: Band,
    position: Point,
    gradient_id: String,
}

impl SceneNode {
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Id of the node's radial highlight gradient.
    pub fn gradient_id(&self) -> &str {
        &self.gradient_id
    }
}

/// A routed relationship.
#[derive(Debug, Clone)]
pub struct SceneEdge {
    id: EdgeId,
    source: String,
    target: String,
    relation: String,
    route: EdgeRoute,
}

impl SceneEdge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn route(&self) -> &EdgeRoute {
        &self.route
    }
}

/// Element under a scene point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Node(String),
    Edge(EdgeId),
}

/// Elements rewritten by a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDelta {
    moved_node: Option<String>,
    updated_edges: Vec<EdgeId>,
}

impl SceneDelta {
    pub fn moved_node(&self) -> Option<&str> {
        self.moved_node.as_deref()
    }

    pub fn updated_edges(&self) -> &[EdgeId] {
        &self.updated_edges
    }

    pub fn is_empty(&self) -> bool {
        self.moved_node.is_none() && self.updated_edges.is_empty()
    }
}

/// The laid-out graph, ready to render and hit test.
#[derive(Debug)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    node_lookup: HashMap<String, usize>,
    edges: Vec<SceneEdge>,
    graph: RelationGraph,
    bands: BandAssignment,
    node_radius: f32,
    highlight_radius: f32,
    curvature: f32,
}

impl Scene {
    /// Builds the scene from the current position table.
    ///
    /// Relationships naming an unknown entity are dropped. An entity without
    /// a position is skipped, along with its relationships.
    pub fn build(
        document: &GraphDocument,
        positions: &PositionTable,
        bands: BandAssignment,
        theme: &Theme,
        curvature: f32,
    ) -> Self {
        let graph = RelationGraph::from_document(document);

        let mut nodes = Vec::with_capacity(document.nodes().len());
        let mut node_lookup = HashMap::with_capacity(document.nodes().len());
        for (index, entity) in document.nodes().iter().enumerate() {
            let Some(&position) = positions.get(entity.id()) else {
                debug!(id = entity.id(); "Entity has no position; skipping");
                continue;
            };
            node_lookup.insert(entity.id().to_string(), nodes.len());
            nodes.push(SceneNode {
                entity: entity.clone(),
                band: bands.band_of(entity),
                position,
                gradient_id: format!("node-gradient-{index}"),
            });
        }

        let node_radius = theme.node_radius();
        let mut edges = Vec::with_capacity(graph.edges_count());
        for (_, edge) in graph.edges() {
            let (Some(&source), Some(&target)) =
                (positions.get(edge.source()), positions.get(edge.target()))
            else {
                continue;
            };
            let relation = document
                .links()
                .get(edge.link_index())
                .map(|link| link.relation().to_string())
                .unwrap_or_default();

            edges.push(SceneEdge {
                id: EdgeId(edge.link_index()),
                source: edge.source().to_string(),
                target: edge.target().to_string(),
                relation,
                route: EdgeRoute::between(source, target, node_radius, curvature),
            });
        }

        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            dropped = document.links().len() - edges.len();
            "Scene built"
        );

        Self {
            nodes,
            node_lookup,
            edges,
            graph,
            bands,
            node_radius,
            highlight_radius: theme.node_highlight_radius(),
            curvature,
        }
    }

    /// Nodes in document order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Edges in document order.
    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.node_lookup.get(id).map(|&index| &self.nodes[index])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&SceneEdge> {
        self.edges
            .binary_search_by_key(&id, |edge| edge.id)
            .ok()
            .map(|index| &self.edges[index])
    }

    pub fn bands(&self) -> &BandAssignment {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolves a scene point to the element under it.
    ///
    /// Nodes win over edges and later nodes over earlier ones, matching the
    /// paint order. A hovered node is tested with its enlarged radius. Edges
    /// are hit within `edge_tolerance` of their curve; the nearest one wins.
    pub fn hit_test(
        &self,
        point: Point,
        hovered_node: Option<&str>,
        edge_tolerance: f32,
    ) -> Option<HitTarget> {
        let node_hit = self.nodes.iter().rev().find(|node| {
            let radius = if hovered_node == Some(node.id()) {
                self.highlight_radius
            } else {
                self.node_radius
            };
            node.position.distance(point) <= radius
        });
        if let Some(node) = node_hit {
            return Some(HitTarget::Node(node.id().to_string()));
        }

        self.edges
            .iter()
            .map(|edge| (edge.id, edge.route.distance_to(point)))
            .filter(|(_, distance)| *distance <= edge_tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| HitTarget::Edge(id))
    }

    /// Moves one node to its entry in `positions` and re-routes its incident
    /// edges.
    ///
    /// Nothing else changes. A node missing from the scene or from the table
    /// yields an empty delta.
    pub fn apply_partial_update(&mut self, positions: &PositionTable, moved_id: &str) -> SceneDelta {
        let Some(&index) = self.node_lookup.get(moved_id) else {
            debug!(id = moved_id; "Partial update for unknown node; skipping");
            return SceneDelta::default();
        };
        let Some(&position) = positions.get(moved_id) else {
            debug!(id = moved_id; "Moved node has no position; skipping");
            return SceneDelta::default();
        };
        self.nodes[index].position = position;

        let mut updated_edges = Vec::new();
        for edge_idx in self.graph.incident_edges(moved_id) {
            let Some(relation_edge) = self.graph.edge(edge_idx) else {
                continue;
            };
            let id = EdgeId(relation_edge.link_index());
            let (Some(&source), Some(&target)) = (
                positions.get(relation_edge.source()),
                positions.get(relation_edge.target()),
            ) else {
                continue;
            };
            let Ok(slot) = self.edges.binary_search_by_key(&id, |edge| edge.id) else {
                continue;
            };

            self.edges[slot].route =
                EdgeRoute::between(source, target, self.node_radius, self.curvature);
            updated_edges.push(id);
        }
        updated_edges.sort_unstable();

        trace!(id = moved_id, edges = updated_edges.len(); "Applied partial update");

        SceneDelta {
            moved_node: Some(moved_id.to_string()),
            updated_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::LayoutConfig,
        document::Relationship,
        layout::{ArcLayout, Viewport},
    };

    fn document() -> GraphDocument {
        GraphDocument::new(
            vec![
                Entity::new("甲", "市长", "官员"),
                Entity::new("乙", "地产公司", "企业"),
                Entity::new("丁", "副市长", "官员"),
            ],
            vec![
                Relationship::new("甲", "乙", "行贿"),
                Relationship::new("甲", "丙", "未知"),
                Relationship::new("丁", "乙", "合作"),
            ],
        )
    }

    fn scene_with_positions() -> (Scene, PositionTable) {
        let document = document();
        let bands = BandAssignment::assign(document.nodes(), &LayoutConfig::default());
        let positions =
            ArcLayout::default().compute_layout(document.nodes(), &bands, Viewport::default());
        let scene = Scene::build(&document, &positions, bands, &Theme::default(), 0.15);
        (scene, positions)
    }

    #[test]
    fn test_edge_id_display() {
        assert_eq!(EdgeId::new(3).to_string(), "link-3");
    }

    #[test]
    fn test_build_drops_dangling_edges() {
        let (scene, _) = scene_with_positions();

        assert_eq!(scene.nodes().len(), 3);
        assert_eq!(scene.edges().len(), 2);
        assert!(scene.edge(EdgeId::new(1)).is_none());
        assert_eq!(scene.edge(EdgeId::new(2)).unwrap().relation(), "合作");
    }

    #[test]
    fn test_gradient_ids_follow_document_index() {
        let (scene, _) = scene_with_positions();
        assert_eq!(scene.node("丁").unwrap().gradient_id(), "node-gradient-2");
    }

    #[test]
    fn test_hit_test_node() {
        let (scene, positions) = scene_with_positions();
        let center = positions["甲"];

        let hit = scene.hit_test(center.add_point(Point::new(10.0, 0.0)), None, 6.0);
        assert_eq!(hit, Some(HitTarget::Node("甲".to_string())));

        // Just outside the resting radius, inside the hovered one
        let rim = center.add_point(Point::new(23.0, 0.0));
        assert_eq!(scene.hit_test(rim, None, 0.0), None);
        assert_eq!(
            scene.hit_test(rim, Some("甲"), 0.0),
            Some(HitTarget::Node("甲".to_string()))
        );
    }

    #[test]
    fn test_hit_test_edge() {
        let (scene, _) = scene_with_positions();
        let midpoint = scene.edge(EdgeId::new(0)).unwrap().route().midpoint();

        assert_eq!(
            scene.hit_test(midpoint, None, 6.0),
            Some(HitTarget::Edge(EdgeId::new(0)))
        );
    }

    #[test]
    fn test_hit_test_miss() {
        let (scene, _) = scene_with_positions();
        assert_eq!(scene.hit_test(Point::new(-500.0, -500.0), None, 6.0), None);
    }

    #[test]
    fn test_partial_update_touches_only_incident_edges() {
        let (mut scene, mut positions) = scene_with_positions();
        let untouched = *scene.edge(EdgeId::new(2)).unwrap().route();

        positions.insert("甲".to_string(), Point::new(100.0, 100.0));
        let delta = scene.apply_partial_update(&positions, "甲");

        assert_eq!(delta.moved_node(), Some("甲"));
        assert_eq!(delta.updated_edges(), [EdgeId::new(0)]);

        let moved = scene.node("甲").unwrap().position();
        assert_approx_eq!(f32, moved.x(), 100.0);
        assert_approx_eq!(f32, moved.y(), 100.0);

        let expected = EdgeRoute::between(Point::new(100.0, 100.0), positions["乙"], 22.0, 0.15);
        assert_eq!(scene.edge(EdgeId::new(0)).unwrap().route(), &expected);
        assert_eq!(scene.edge(EdgeId::new(2)).unwrap().route(), &untouched);
    }

    #[test]
    fn test_partial_update_unknown_node_is_noop() {
        let (mut scene, positions) = scene_with_positions();
        assert!(scene.apply_partial_update(&positions, "丙").is_empty());
    }

    #[test]
    fn test_empty_document_builds_empty_scene() {
        let scene = Scene::build(
            &GraphDocument::default(),
            &PositionTable::new(),
            BandAssignment::default(),
            &Theme::default(),
            0.15,
        );
        assert!(scene.is_empty());
        assert!(scene.edges().is_empty());
    }
}
