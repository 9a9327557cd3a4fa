//! Command-line argument definitions for the Liaison CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the viewport size,
//! an optional recorded event session, configuration file selection, and
//! logging verbosity.

use clap::Parser;

/// Command-line arguments for the Liaison graph renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Recorded interaction session (JSON) replayed before rendering
    #[arg(short, long)]
    pub events: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
