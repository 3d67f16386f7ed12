//! Error types for diagram construction.
//!
//! Every variant represents an authoring mistake in a diagram definition.
//! They are raised synchronously while the element tree is built and abort
//! generation of the whole document.

use thiserror::Error;

use crate::geometry::Point;

/// Errors raised while constructing geometry or diagram elements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A bounding box whose top-left corner lies below or right of its
    /// bottom-right corner.
    #[error("invalid box: top-left {top_left:?} is not above and left of bottom-right {bottom_right:?}")]
    InvalidBox {
        top_left: Point,
        bottom_right: Point,
    },

    /// A shape whose parameters describe degenerate geometry.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Normalization of a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// A grouping element (or document) created without any children.
    #[error("{0} requires at least one child element")]
    MissingChildren(&'static str),
}

impl Error {
    /// Shorthand for building a [`Error::Geometry`] from anything displayable.
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry(message.into())
    }
}

/// Result alias used throughout `figura-core`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
