//! The relationship-graph document: entities and directed, labeled links.
//!
//! Documents are deserialized from JSON of the shape
//! `{ "nodes": [{ "id", "label", "group" }], "links": [{ "source", "target", "relation" }] }`.
//! Missing `label`, `group` and `relation` fields default to empty strings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::loader::LoadError;

/// A labeled entity drawn as a node glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    group: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group: group.into(),
        }
    }

    /// Unique, stable identifier. Shown inside the node glyph.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Caption shown in the label chip under a highlighted node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Categorical tag deciding the band the entity is placed in.
    pub fn group(&self) -> &str {
        &self.group
    }
}

/// A directed relationship between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    source: String,
    target: String,
    #[serde(default)]
    relation: String,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
        }
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
}

/// The loaded graph document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    nodes: Vec<Entity>,
    #[serde(default)]
    links: Vec<Relationship>,
}

impl GraphDocument {
    pub fn new(nodes: Vec<Entity>, links: Vec<Relationship>) -> Self {
        Self { nodes, links }
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for malformed JSON and the validation
    /// errors of [`GraphDocument::validate`].
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let document: Self = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Checks that every entity id is non-blank and unique.
    ///
    /// Links are not checked here: a link naming an unknown entity is dropped
    /// when the scene is built.
    pub fn validate(&self) -> Result<(), LoadError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for (index, entity) in self.nodes.iter().enumerate() {
            if entity.id.trim().is_empty() {
                return Err(LoadError::BlankId { index });
            }
            if !seen.insert(entity.id.as_str()) {
                return Err(LoadError::DuplicateId {
                    id: entity.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[Entity] {
        &self.nodes
    }

    pub fn links(&self) -> &[Relationship] {
        &self.links
    }

    /// A document with no entities renders the empty state.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
