//! Liaison Core Types and Definitions
//!
//! This crate provides the foundational building blocks for rendering
//! relationship graphs. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes, and the pure edge-geometry functions used to
//!   route curved relationships between circular nodes ([`geometry`] module)
//! - **Draw**: Drawable node glyphs, edge curves, label chips, and the layered
//!   SVG output they render into ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
