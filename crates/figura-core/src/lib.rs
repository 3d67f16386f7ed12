//! Figura Core Types and Rendering
//!
//! This crate provides the building blocks of Figura diagrams:
//!
//! - **Geometry**: Points, sizes, sides and bounding boxes ([`geometry`] module)
//! - **Colors**: Color tokens and the palette mapping them to CSS ([`color`] module)
//! - **Text**: Font-free text size estimation and alignment ([`text`] module)
//! - **Draw**: Shapes, connectors, text and groups serialized to SVG ([`draw`] module)
//! - **Connectors**: Lines and arcs anchored to other elements ([`connector`] module)
//! - **Documents**: ViewBox computation and standalone/embedded output ([`document`] module)
//!
//! Every element validates its geometry when constructed and reports
//! problems as an [`Error`]; rendering never fails.

pub mod color;
pub mod connector;
pub mod document;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod text;

pub use error::{Error, Result};
