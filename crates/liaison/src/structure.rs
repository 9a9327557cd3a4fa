//! Relation graph index over the loaded document.
//!
//! [`RelationGraph`] keeps the drawable relationships together with
//! incoming and outgoing edge lists per entity, so a moved node can find its
//! incident edges without scanning every relationship.
//!
//! The graph is directed and allows self-loops and multiple edges between
//! the same pair of entities. Relationships naming an unknown entity are
//! never inserted.

use std::collections::HashMap;

use log::debug;

use crate::document::GraphDocument;

/// Index of an edge inside a [`RelationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A drawable relationship whose endpoints both resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    link_index: usize,
    source: String,
    target: String,
}

impl RelationEdge {
    /// Position of the relationship in the document's `links` array.
    pub fn link_index(&self) -> usize {
        self.link_index
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns `true` if the edge touches `id` at either end.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// Directed graph of entities and their drawable relationships.
#[derive(Debug, Default)]
pub struct RelationGraph {
    nodes: HashMap<String, usize>,
    edges: Vec<RelationEdge>,
    income_edges: HashMap<String, Vec<EdgeIndex>>,
    outgoing_edges: HashMap<String, Vec<EdgeIndex>>,
}

impl RelationGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from a document, skipping dangling relationships.
    pub fn from_document(document: &GraphDocument) -> Self {
        let mut graph = Self::new();
        for (index, entity) in document.nodes().iter().enumerate() {
            graph.add_node(entity.id(), index);
        }

        for (link_index, link) in document.links().iter().enumerate() {
            if !graph.contains_node(link.source()) || !graph.contains_node(link.target()) {
                debug!(
                    link_index,
                    source = link.source(),
                    target = link.target();
                    "Skipping relationship with unknown endpoint"
                );
                continue;
            }
            graph.add_edge(link_index, link.source(), link.target());
        }
        graph
    }

    /// Adds a node, keyed by entity id, remembering its document position.
    pub fn add_node(&mut self, id: &str, order: usize) {
        self.nodes.insert(id.to_string(), order);
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Document position of the entity, if present.
    pub fn node_order(&self, id: &str) -> Option<usize> {
        self.nodes.get(id).copied()
    }

    /// Adds an edge between two existing nodes and returns its index.
    pub fn add_edge(&mut self, link_index: usize, source: &str, target: &str) -> EdgeIndex {
        let edge_idx = EdgeIndex(self.edges.len());
        self.edges.push(RelationEdge {
            link_index,
            source: source.to_string(),
            target: target.to_string(),
        });

        self.outgoing_edges
            .entry(source.to_string())
            .or_default()
            .push(edge_idx);
        self.income_edges
            .entry(target.to_string())
            .or_default()
            .push(edge_idx);

        edge_idx
    }

    pub fn edge(&self, idx: EdgeIndex) -> Option<&RelationEdge> {
        self.edges.get(idx.0)
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &RelationEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (EdgeIndex(index), edge))
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges pointing at `id`.
    pub fn incoming_edges(&self, id: &str) -> &[EdgeIndex] {
        self.income_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges leaving `id`.
    pub fn outgoing_edges(&self, id: &str) -> &[EdgeIndex] {
        self.outgoing_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every edge touching `id`, in insertion order, each listed once even
    /// when it is a self-loop.
    pub fn incident_edges(&self, id: &str) -> Vec<EdgeIndex> {
        let mut incident: Vec<EdgeIndex> = self
            .incoming_edges(id)
            .iter()
            .chain(self.outgoing_edges(id))
            .copied()
            .collect();
        incident.sort_unstable();
        incident.dedup();
        incident
    }
}
