//! CLI logic for the nnsketch diagram tool.
//!
//! This module contains the core CLI logic for the nnsketch diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use nnsketch::{DiagramBuilder, NnsketchError};

/// Run the nnsketch CLI application
///
/// This function renders the input description with the configured style
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `NnsketchError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed descriptions
/// - Drawing errors
pub fn run(args: &Args) -> Result<(), NnsketchError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process diagram using DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let description = builder.parse(&source)?;
    let svg = builder.render_svg(&description)?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
