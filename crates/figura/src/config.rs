//! Configuration types for Figura diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are styled, laid out and serialized. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file; every
//! section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`StyleConfig`] - Stroke width, fonts, text spacing and the palette.
//! - [`DocumentConfig`] - Authorship metadata and the default output mode.
//! - [`ProtocolConfig`] - Row height and spacing of protocol diagrams.
//!
//! # Example
//!
//! ```
//! # use figura::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [style]
//!     stroke_width = 1.5
//!
//!     [style.palette]
//!     blue = "navy"
//! "#).unwrap();
//!
//! assert_eq!(config.style().stroke_width(), 1.5);
//! assert!(config.style().palette().is_ok());
//! assert_eq!(config.protocol().unit_height(), 40.0);
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use figura_core::{
    color::{ColorToken, CssColor, Palette},
    document::{DocumentOptions, Metadata, OutputMode},
    draw::{DEFAULT_STROKE_WIDTH, Stroke},
    text::TextMetrics,
};

use crate::FiguraError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Document configuration section.
    #[serde(default)]
    document: DocumentConfig,

    /// Protocol diagram configuration section.
    #[serde(default)]
    protocol: ProtocolConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, document: DocumentConfig, protocol: ProtocolConfig) -> Self {
        Self {
            style,
            document,
            protocol,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }

    pub fn protocol(&self) -> &ProtocolConfig {
        &self.protocol
    }

    /// Checks every numeric setting and the palette.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), FiguraError> {
        let positive = [
            ("style.stroke_width", self.style.stroke_width),
            ("style.font_size", self.style.font_size),
            ("style.line_height", self.style.line_height),
            ("protocol.unit_height", self.protocol.unit_height),
        ];
        let non_negative = [
            ("style.text_distance", self.style.text_distance),
            ("protocol.column_gap", self.protocol.column_gap),
            ("protocol.header_padding", self.protocol.header_padding),
            ("protocol.lifeline_tail", self.protocol.lifeline_tail),
        ];

        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(FiguraError::Config(format!(
                    "`{name}` must be positive, got {value}"
                )));
            }
        }
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(FiguraError::Config(format!(
                    "`{name}` must not be negative, got {value}"
                )));
            }
        }

        self.style.palette().map_err(FiguraError::Config)?;
        Ok(())
    }

    /// Document options for a diagram with the given title and description.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] if the palette is invalid.
    pub fn document_options(
        &self,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<DocumentOptions, FiguraError> {
        Ok(DocumentOptions {
            mode: self.document.mode,
            title,
            description,
            stroke_width: self.style.stroke_width,
            font_family: self.style.font_family.clone(),
            palette: self.style.palette().map_err(FiguraError::Config)?,
            metadata: Metadata {
                author: self.document.author.clone(),
                license: self.document.license.clone(),
                date: None,
            },
        })
    }
}

/// Visual styling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    stroke_width: f32,
    font_family: String,
    font_size: f32,
    /// Line height as a multiple of the font size.
    line_height: f32,
    /// Distance between a connector and its label.
    text_distance: f32,
    /// CSS colors keyed by color token, or `default` for uncolored
    /// elements.
    palette: BTreeMap<String, String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            line_height: 1.25,
            text_distance: 6.0,
            palette: BTreeMap::new(),
        }
    }
}

impl StyleConfig {
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn text_distance(&self) -> f32 {
        self.text_distance
    }

    /// Metrics used to size every label.
    pub fn text_metrics(&self) -> TextMetrics {
        TextMetrics::new(self.font_size).with_line_spacing(self.line_height)
    }

    /// A connector stroke of the configured width with an arrow at the end.
    pub fn stroke(&self) -> Stroke {
        Stroke::default().with_width(self.stroke_width)
    }

    /// The default palette with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a key is not a color token or `default`, or if
    /// a value is not a valid CSS color.
    pub fn palette(&self) -> Result<Palette, String> {
        let mut palette = Palette::default();
        for (key, value) in &self.palette {
            let color = CssColor::new(value)
                .map_err(|err| format!("Invalid color for `{key}` in palette: {err}"))?;
            if key == "default" {
                palette.set_default(color);
            } else {
                let token: ColorToken = key.parse()?;
                palette.set(token, color);
            }
        }
        Ok(palette)
    }
}

/// Document serialization configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentConfig {
    #[serde(default)]
    author: Option<String>,

    /// License URL.
    #[serde(default)]
    license: Option<String>,

    #[serde(default)]
    mode: OutputMode,
}

impl DocumentConfig {
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }
}

/// Layout configuration for protocol diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Height of one time unit.
    unit_height: f32,
    /// Horizontal space between participant headers.
    column_gap: f32,
    /// Space between a participant name and its header outline.
    header_padding: f32,
    /// How far lifelines continue past the last message, in time units.
    lifeline_tail: f32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            unit_height: 40.0,
            column_gap: 60.0,
            header_padding: 8.0,
            lifeline_tail: 0.5,
        }
    }
}

impl ProtocolConfig {
    /// Creates a new [`ProtocolConfig`].
    ///
    /// # Arguments
    ///
    /// * `unit_height` - Height of one time unit.
    /// * `column_gap` - Horizontal space between participant headers.
    /// * `header_padding` - Space around participant names.
    /// * `lifeline_tail` - Lifeline length past the last message, in time units.
    pub fn new(unit_height: f32, column_gap: f32, header_padding: f32, lifeline_tail: f32) -> Self {
        Self {
            unit_height,
            column_gap,
            header_padding,
            lifeline_tail,
        }
    }

    pub fn unit_height(&self) -> f32 {
        self.unit_height
    }

    pub fn column_gap(&self) -> f32 {
        self.column_gap
    }

    pub fn header_padding(&self) -> f32 {
        self.header_padding
    }

    pub fn lifeline_tail(&self) -> f32 {
        self.lifeline_tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.style().stroke_width(), 2.0);
        assert_eq!(config.style().font_family(), "sans-serif");
        assert_eq!(config.style().text_metrics().font_size(), 16.0);
        assert_eq!(config.document().mode(), OutputMode::Standalone);
        assert_eq!(config.protocol().column_gap(), 60.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            font_size = 12.0

            [document]
            author = "Jane Doe"
            mode = "embedded"
            "#,
        )
        .unwrap();

        assert_eq!(config.style().text_metrics().font_size(), 12.0);
        assert_eq!(config.style().stroke_width(), 2.0);
        assert_eq!(config.document().author(), Some("Jane Doe"));
        assert_eq!(config.document().mode(), OutputMode::Embedded);
        assert_eq!(config.protocol().unit_height(), 40.0);
    }

    #[test]
    fn test_palette_overrides() {
        let config: AppConfig = toml::from_str(
            r##"
            [style.palette]
            default = "black"
            red = "#ff0000"
            "##,
        )
        .unwrap();

        let palette = config.style().palette().unwrap();
        let defaults = Palette::default();
        assert_ne!(palette.get(None), defaults.get(None));
        assert_ne!(
            palette.get(Some(ColorToken::Red)),
            defaults.get(Some(ColorToken::Red))
        );
        assert_eq!(
            palette.get(Some(ColorToken::Blue)),
            defaults.get(Some(ColorToken::Blue))
        );
    }

    #[test]
    fn test_palette_rejects_unknown_token() {
        let config: AppConfig = toml::from_str(
            r#"
            [style.palette]
            purple = "purple"
            "#,
        )
        .unwrap();
        assert!(config.style().palette().is_err());
        assert!(matches!(config.validate(), Err(FiguraError::Config(_))));
    }

    #[test]
    fn test_palette_rejects_invalid_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style.palette]
            blue = "not-a-color"
            "#,
        )
        .unwrap();
        let err = config.style().palette().unwrap_err();
        assert!(err.contains("blue"), "{err}");
    }

    #[test]
    fn test_validate_rejects_non_positive_values() {
        let config: AppConfig = toml::from_str(
            r#"
            [protocol]
            unit_height = 0.0
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("protocol.unit_height"), "{err}");
    }

    #[test]
    fn test_document_options() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            stroke_width = 3.0
            font_family = "serif"

            [document]
            license = "https://creativecommons.org/licenses/by/4.0/"
            "#,
        )
        .unwrap();

        let options = config
            .document_options(Some("Title".to_string()), None)
            .unwrap();
        assert_eq!(options.title.as_deref(), Some("Title"));
        assert_eq!(options.stroke_width, 3.0);
        assert_eq!(options.font_family, "serif");
        assert_eq!(
            options.metadata.license.as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(options.metadata.date, None);
    }

    #[test]
    fn test_stroke_uses_configured_width() {
        let config: AppConfig = toml::from_str("[style]\nstroke_width = 1.0").unwrap();
        assert_eq!(config.style().stroke().width, 1.0);
    }
}
