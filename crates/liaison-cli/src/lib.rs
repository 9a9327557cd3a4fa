//! Liaison CLI library
//!
//! This module contains the core CLI logic for the Liaison graph renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, time::Instant};

use log::info;

use liaison::{GraphRenderer, LiaisonError, Session, layout::Viewport, loader::FileSource};

/// Run the Liaison CLI application
///
/// This function loads the input graph, mounts a view at the requested
/// viewport size, replays the recorded event session if one was given, and
/// writes the resulting SVG to the output file. A graph without entities
/// prints the empty-state message and still produces an SVG.
///
/// # Errors
///
/// Returns `LiaisonError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid graph documents or event sessions
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LiaisonError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Rendering relationship graph"
    );

    if args.width <= 0.0 || args.height <= 0.0 {
        return Err(LiaisonError::Config(format!(
            "viewport must be positive, got {}x{}",
            args.width, args.height
        )));
    }

    let app_config = config::load_config(args.config.as_ref())?;

    let renderer =
        GraphRenderer::new(app_config).with_viewport(Viewport::new(args.width, args.height));
    let document = renderer.load(&FileSource::new(&args.input))?;
    let mut view = renderer.mount(document)?;

    if let Some(message) = view.status().message() {
        println!("{message}");
    }

    if let Some(events_path) = &args.events {
        let session = Session::from_json(&fs::read_to_string(events_path)?)?;
        let responses = session.replay(&mut view, Instant::now());
        info!(events = responses.len(); "Event session replayed");
    }

    let svg = view.render_svg()?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
