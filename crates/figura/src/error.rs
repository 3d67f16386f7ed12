//! Error types for Figura operations.
//!
//! This module provides the main error type [`FiguraError`] which wraps
//! the conditions that abort the generation of a diagram.

use std::io;

use thiserror::Error;

/// The main error type for Figura operations.
///
/// Every variant is fatal to the diagram being generated: there is no
/// partial output.
#[derive(Debug, Error)]
pub enum FiguraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] figura_core::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error(
        "Unknown participant {index}: the diagram has {participants} participant(s)"
    )]
    UnknownParticipant { index: usize, participants: usize },

    #[error("Unknown diagram `{0}`")]
    UnknownDiagram(String),
}

impl From<toml::de::Error> for FiguraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Scenario(err.to_string())
    }
}
