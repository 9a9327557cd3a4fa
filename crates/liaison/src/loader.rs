//! Fetching the graph document once per mount.
//!
//! A [`Loader`] wraps a [`GraphSource`] and walks a single
//! `Loading -> Ready | Empty | Failed` transition. It never retries: once
//! resolved, further [`Loader::load`] calls return the settled state.

use std::{fmt, fs, io, path::PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::document::GraphDocument;

/// Reasons a graph document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch graph from {origin}: {source}")]
    Fetch {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid graph document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entity at index {index} has a blank id")]
    BlankId { index: usize },

    #[error("duplicate entity id `{id}`")]
    DuplicateId { id: String },
}

/// Where raw document text comes from.
pub trait GraphSource: fmt::Debug {
    /// Human-readable origin used in logs and error messages.
    fn describe(&self) -> String;

    /// Fetches the raw document text.
    fn fetch(&self) -> Result<String, LoadError>;
}

/// Reads the document from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Fetch {
            origin: self.describe(),
            source,
        })
    }
}

/// Serves a document held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    text: String,
}

impl MemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl GraphSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }
}

/// Resolution state of a [`Loader`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(GraphDocument),
    /// The document parsed but holds no entities.
    Empty,
    /// Fetching or validation failed; carries the rendered error.
    Failed(String),
}

impl LoadState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Single-shot document loader.
#[derive(Debug)]
pub struct Loader {
    source: Option<Box<dyn GraphSource>>,
    state: LoadState,
    torn_down: bool,
}

impl Loader {
    pub fn new(source: Box<dyn GraphSource>) -> Self {
        Self {
            source: Some(source),
            state: LoadState::Loading,
            torn_down: false,
        }
    }

    /// Creates a loader already resolved with a parsed document.
    pub fn preloaded(document: GraphDocument) -> Self {
        let state = if document.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Ready(document)
        };
        Self {
            source: None,
            state,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Fetches and resolves the document, at most once.
    pub fn load(&mut self) -> &LoadState {
        if self.state.is_resolved() || self.torn_down {
            return &self.state;
        }
        let Some(source) = &self.source else {
            return &self.state;
        };

        info!(origin = source.describe(); "Loading relationship graph");
        let fetched = source.fetch();
        self.resolve(fetched)
    }

    /// Settles the state from a fetch result obtained elsewhere.
    ///
    /// The result is discarded when the loader was torn down or has already
    /// resolved.
    pub fn resolve(&mut self, fetched: Result<String, LoadError>) -> &LoadState {
        if self.torn_down {
            debug!("Discarding graph load result after teardown");
            return &self.state;
        }
        if self.state.is_resolved() {
            debug!("Graph already resolved; ignoring late result");
            return &self.state;
        }

        self.state = match fetched.and_then(|text| GraphDocument::from_json(&text)) {
            Ok(document) if document.is_empty() => {
                info!("Relationship graph is empty");
                LoadState::Empty
            }
            Ok(document) => {
                info!(
                    nodes = document.nodes().len(),
                    links = document.links().len();
                    "Relationship graph loaded"
                );
                LoadState::Ready(document)
            }
            Err(err) => {
                warn!(err:err; "Failed to load relationship graph");
                LoadState::Failed(err.to_string())
            }
        };
        &self.state
    }

    /// Stops accepting results. A pending load never resolves afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[derive(Debug)]
    struct CountingSource {
        text: &'static str,
        fetches: Rc<Cell<usize>>,
    }

    impl GraphSource for CountingSource {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        fn fetch(&self) -> Result<String, LoadError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.text.to_string())
        }
    }

    const ONE_NODE: &str = r#"{"nodes": [{"id": "甲", "label": "市长", "group": "官员"}], "links": []}"#;

    #[test]
    fn test_load_resolves_ready() {
        let mut loader = Loader::new(Box::new(MemorySource::new(ONE_NODE)));
        assert_eq!(loader.state(), &LoadState::Loading);

        assert!(matches!(loader.load(), LoadState::Ready(doc) if doc.nodes().len() == 1));
    }

    #[test]
    fn test_load_fetches_once() {
        let fetches = Rc::new(Cell::new(0));
        let mut loader = Loader::new(Box::new(CountingSource {
            text: "not json",
            fetches: Rc::clone(&fetches),
        }));

        assert!(matches!(loader.load(), LoadState::Failed(_)));
        assert!(matches!(loader.load(), LoadState::Failed(_)));
        assert_eq!(fetches.get(), 1);
    }

    #[test]
    fn test_empty_document_is_empty_state() {
        let mut loader = Loader::new(Box::new(MemorySource::new(r#"{"nodes": [], "links": []}"#)));
        assert_eq!(loader.load(), &LoadState::Empty);
    }

    #[test]
    fn test_missing_file_fails() {
        let mut loader = Loader::new(Box::new(FileSource::new("/nonexistent/graph.json")));
        match loader.load() {
            LoadState::Failed(message) => assert!(message.contains("/nonexistent/graph.json")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_preloaded_is_resolved() {
        let document = GraphDocument::from_json(ONE_NODE).unwrap();
        let mut loader = Loader::preloaded(document);
        assert!(matches!(loader.load(), LoadState::Ready(_)));

        let mut empty = Loader::preloaded(GraphDocument::default());
        assert_eq!(empty.load(), &LoadState::Empty);
    }

    #[test]
    fn test_teardown_discards_result() {
        let mut loader = Loader::new(Box::new(MemorySource::new(ONE_NODE)));
        loader.teardown();

        assert_eq!(loader.resolve(Ok(ONE_NODE.to_string())), &LoadState::Loading);
        assert_eq!(loader.load(), &LoadState::Loading);
        assert!(loader.is_torn_down());
    }

    #[test]
    fn test_late_result_ignored() {
        let mut loader = Loader::new(Box::new(MemorySource::new(ONE_NODE)));
        loader.load();

        let state = loader.resolve(Ok(r#"{"nodes": []}"#.to_string()));
        assert!(matches!(state, LoadState::Ready(_)));
    }
}
