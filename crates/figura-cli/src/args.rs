//! Command-line argument definitions for the Figura CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select what to render and where to write it,
//! the configuration file and the logging verbosity.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the Figura diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a built-in diagram or a scenario file to SVG
    Render {
        /// Name of a built-in diagram, or path to a `.toml` scenario
        target: String,

        /// Write a lean document for pages that include the shared definitions
        #[arg(long, conflicts_with = "standalone")]
        embedded: bool,

        /// Write a self-contained document with metadata and styles
        #[arg(long)]
        standalone: bool,

        /// Output file; standard output if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the built-in diagrams
    List,

    /// Print the definitions shared by embedded documents
    Defs {
        /// Output file; standard output if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
