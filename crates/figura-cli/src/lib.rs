//! CLI logic for the Figura diagram tool.
//!
//! This module contains the core CLI logic: it loads the configuration,
//! builds the requested diagram, renders it fully into memory and only
//! then writes it out.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::info;
use time::OffsetDateTime;

use figura::{Diagram, DiagramBuilder, FiguraError, catalog, document::OutputMode};

/// Run the Figura CLI application
///
/// Documents are written to the `--output` file if one is given, and to
/// `out` otherwise. Listings always go to `out`.
///
/// # Errors
///
/// Returns `FiguraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown diagrams and malformed scenarios
/// - Geometry errors while building a diagram
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), FiguraError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    match &args.command {
        Command::Render {
            target,
            embedded,
            standalone,
            output,
        } => {
            info!(diagram = target.as_str(), output:? = output; "Rendering diagram");

            let mut builder = builder.with_date(OffsetDateTime::now_utc().date());
            if *embedded {
                builder = builder.with_mode(OutputMode::Embedded);
            } else if *standalone {
                builder = builder.with_mode(OutputMode::Standalone);
            }

            let diagram = load_diagram(&builder, target)?;
            let svg = builder.render_svg(diagram)?;
            write_output(output.as_ref(), &svg, out)
        }
        Command::List => {
            for entry in catalog::entries() {
                writeln!(out, "{:<20} {}", entry.name(), entry.title())?;
            }
            Ok(())
        }
        Command::Defs { output } => {
            let defs = builder.shared_definitions()?;
            write_output(output.as_ref(), &defs, out)
        }
    }
}

/// A scenario file if `target` looks like one, a built-in diagram otherwise.
fn load_diagram(builder: &DiagramBuilder, target: &str) -> Result<Diagram, FiguraError> {
    let path = Path::new(target);
    let is_scenario = path.extension().is_some_and(|ext| ext == "toml") || path.is_file();
    if is_scenario {
        info!(path = target; "Reading scenario");
        let source = fs::read_to_string(path)?;
        builder.scenario(&source)
    } else {
        builder.catalog(target)
    }
}

fn write_output(
    path: Option<&PathBuf>,
    content: &str,
    out: &mut impl Write,
) -> Result<(), FiguraError> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            info!(output_file = path.display().to_string(); "SVG exported successfully");
        }
        None => {
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
