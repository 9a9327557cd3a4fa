//! Export functionality for relationship-graph views.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a view [`Frame`] into an output format. It is the final stage
//! of the rendering pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Graph Document
//!     ↓ layout
//! Position Table
//!     ↓ scene
//! Scene (+ view transform, highlight set)
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`LiaisonError::Export`] at the crate
//! boundary.
//!
//! [`LiaisonError::Export`]: crate::LiaisonError::Export

/// SVG export backend.
pub mod svg;

use crate::{
    interaction::{HighlightSet, ViewTransform},
    layout::Viewport,
    scene::Scene,
};

/// What a frame shows besides the background.
#[derive(Debug, Clone, Copy)]
pub enum FrameContent<'a> {
    /// The laid-out graph under the view transform.
    Scene {
        scene: &'a Scene,
        view: ViewTransform,
        highlight: &'a HighlightSet,
    },
    /// A centered status line for the loading, failed and empty states.
    Message(&'a str),
}

/// One renderable state of a view.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    viewport: Viewport,
    content: FrameContent<'a>,
}

impl<'a> Frame<'a> {
    pub fn new(viewport: Viewport, content: FrameContent<'a>) -> Self {
        Self { viewport, content }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn content(&self) -> FrameContent<'a> {
        self.content
    }
}

/// Abstraction for view export backends.
///
/// See the [`svg`] module for the built-in SVG implementation.
pub trait Exporter {
    /// Exports a frame to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the frame cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_frame(&mut self, frame: &Frame<'_>) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into [`LiaisonError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`LiaisonError::Export`]: crate::LiaisonError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
