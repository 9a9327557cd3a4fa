//! Error types for Liaison operations.
//!
//! This module provides the main error type [`LiaisonError`] which wraps
//! the error conditions that can occur while loading, laying out and
//! rendering a relationship graph.

use std::io;

use thiserror::Error;

use crate::loader::LoadError;

/// The main error type for Liaison operations.
///
/// # Load Failures
///
/// The `Load` variant carries the [`LoadError`] that put a view into its
/// failed state. Dangling relationships and empty graphs are not errors;
/// they are handled while building the scene.
#[derive(Debug, Error)]
pub enum LiaisonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(serde_json::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for LiaisonError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
