//! Figura - declarative technical diagrams rendered to SVG.
//!
//! Diagrams are built from the primitives of [`figura_core`]: shapes,
//! connectors anchored to shapes, and text. This crate adds the
//! configuration model, the protocol-diagram generator, scenario files and
//! a catalog of built-in diagrams, and ties them together in
//! [`DiagramBuilder`].

pub mod catalog;
pub mod config;
pub mod protocol;

mod diagram;
mod error;

pub use figura_core::{color, connector, document, draw, geometry, text};

pub use diagram::Diagram;
pub use error::FiguraError;

use log::{debug, info};
use time::Date;

use figura_core::document::{Document, OutputMode, shared_definitions};

use config::AppConfig;
use protocol::ProtocolDiagram;

/// Builder for producing and rendering Figura diagrams.
///
/// # Examples
///
/// ```rust
/// use figura::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Build a diagram from the catalog
/// let diagram = builder.catalog("hello").expect("Failed to build");
///
/// // Render it to SVG
/// let svg = builder.render_svg(diagram).expect("Failed to render");
/// assert!(svg.contains("Hi Bob!"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    mode: Option<OutputMode>,
    date: Option<Date>,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style, document and
    ///   protocol settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            mode: None,
            date: None,
        }
    }

    /// Overrides the output mode from the configuration.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Stamps standalone documents with a modification date.
    pub fn with_date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The output mode documents are rendered in.
    pub fn mode(&self) -> OutputMode {
        self.mode.unwrap_or(self.config.document().mode())
    }

    /// Build a diagram from the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::UnknownDiagram`] for an unknown name, or the
    /// error of the diagram's construction.
    pub fn catalog(&self, name: &str) -> Result<Diagram, FiguraError> {
        info!(name; "Building catalog diagram");
        catalog::find(name)?.build(&self.config)
    }

    /// Build a protocol diagram from a TOML scenario.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Scenario`] for a malformed scenario and the
    /// layout errors of [`ProtocolDiagram::layout`].
    pub fn scenario(&self, source: &str) -> Result<Diagram, FiguraError> {
        info!("Parsing scenario");
        let diagram = ProtocolDiagram::from_toml(source)?;
        self.protocol(&diagram)
    }

    /// Lay out a protocol diagram.
    ///
    /// # Errors
    ///
    /// Returns the layout errors of [`ProtocolDiagram::layout`].
    pub fn protocol(&self, diagram: &ProtocolDiagram) -> Result<Diagram, FiguraError> {
        let layout = diagram.layout(&self.config)?;
        let mut result = Diagram::new(layout.into_elements());
        if let Some(title) = diagram.title() {
            result = result.with_title(title);
        }
        if let Some(description) = diagram.description() {
            result = result.with_description(description);
        }
        Ok(result)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] for an invalid configuration and
    /// [`FiguraError::Geometry`] for a diagram without elements.
    pub fn render_svg(&self, diagram: Diagram) -> Result<String, FiguraError> {
        self.config.validate()?;
        let (title, description, elements) = diagram.into_parts();

        let mut options = self.config.document_options(title, description)?;
        options.mode = self.mode();
        options.metadata.date = self.date;
        debug!(mode:% = options.mode, stroke_width = options.stroke_width; "Document options");

        let document = Document::new(elements, options)?;
        let svg = document.render();
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Marker definitions and stylesheet that a page embedding documents
    /// in [`OutputMode::Embedded`] must include once.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] for an invalid configuration.
    pub fn shared_definitions(&self) -> Result<String, FiguraError> {
        self.config.validate()?;
        let options = self.config.document_options(None, None)?;
        Ok(shared_definitions(&options))
    }
}
