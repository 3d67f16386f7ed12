//! Assembly of a complete SVG document from a list of elements.
//!
//! A document computes its viewBox from the union of its children's
//! bounds, grown by half the stroke width so that outlines on the edge are
//! not clipped. It renders in one of two modes:
//!
//! - [`OutputMode::Standalone`]: a self-contained file with an XML
//!   declaration, marker definitions, a stylesheet and RDF metadata.
//! - [`OutputMode::Embedded`]: only the `<svg>` element with its title and
//!   content, for inlining into a page that includes
//!   [`shared_definitions`] once.
//!
//! All coordinates in the output are rounded to three decimals, so equal
//! inputs always produce byte-identical documents.

use std::{fmt, str::FromStr};

use log::{debug, info};
use serde::Deserialize;
use svg::{
    Node,
    node::{Text as SvgText, element as svg_element},
};
use time::Date;

use crate::{
    color::{ColorToken, Palette},
    draw::{DEFAULT_STROKE_WIDTH, Element, marker_definitions},
    error::{Error, Result},
    geometry::{Bounds, round3},
};

/// Class of the root `<svg>` element; all stylesheet rules are scoped to it.
pub const ROOT_CLASS: &str = "figura";

/// How a document is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Standalone,
    Embedded,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standalone" => Ok(Self::Standalone),
            "embedded" => Ok(Self::Embedded),
            _ => Err(format!(
                "invalid output mode `{s}`, valid values: standalone, embedded"
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone => f.write_str("standalone"),
            Self::Embedded => f.write_str("embedded"),
        }
    }
}

/// Authorship information written into standalone documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub author: Option<String>,
    /// License URL.
    pub license: Option<String>,
    pub date: Option<Date>,
}

/// Presentation settings of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    pub mode: OutputMode,
    pub title: Option<String>,
    pub description: Option<String>,
    pub stroke_width: f32,
    pub font_family: String,
    pub palette: Palette,
    pub metadata: Metadata,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            title: None,
            description: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_family: "sans-serif".to_string(),
            palette: Palette::default(),
            metadata: Metadata::default(),
        }
    }
}

/// A complete diagram: top-level elements plus document settings.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Box<dyn Element>>,
    options: DocumentOptions,
}

impl Document {
    /// # Errors
    ///
    /// Returns [`Error::MissingChildren`] for an empty element list: an
    /// empty document has no bounds to derive a viewBox from.
    pub fn new(elements: Vec<Box<dyn Element>>, options: DocumentOptions) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::MissingChildren("document"));
        }
        Ok(Self { elements, options })
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    /// Union of all element bounds grown by half the stroke width.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = self.elements.iter().map(|e| e.bounds());
        // Non-empty by construction.
        let first = bounds.next().unwrap_or_default();
        bounds
            .fold(first, Bounds::encompass)
            .margin(self.options.stroke_width / 2.0)
    }

    /// The viewBox as `(x, y, width, height)`, rounded outward to three
    /// decimals so it still contains every element.
    pub fn view_box(&self) -> (f32, f32, f32, f32) {
        let bounds = self.bounds();
        let (x, y) = (floor3(bounds.min_x()), floor3(bounds.min_y()));
        let (max_x, max_y) = (ceil3(bounds.max_x()), ceil3(bounds.max_y()));
        (x, y, round3(max_x - x), round3(max_y - y))
    }

    /// Builds the SVG document tree.
    pub fn to_svg(&self) -> svg::Document {
        let (x, y, width, height) = self.view_box();
        debug!(x, y, width, height; "Computed viewBox");

        let mut document = svg::Document::new()
            .set("viewBox", format!("{x} {y} {width} {height}"))
            .set("width", width)
            .set("height", height)
            .set("class", ROOT_CLASS);

        if let Some(title) = &self.options.title {
            document = document.add(text_element("title", title));
        }
        if let Some(description) = &self.options.description {
            document = document.add(text_element("desc", description));
        }

        if self.options.mode == OutputMode::Standalone {
            document = document
                .add(self.metadata_element())
                .add(definitions(&self.options))
                .add(stylesheet_element(&self.options));
        }

        for element in &self.elements {
            document = document.add(element.render());
        }
        document
    }

    /// Serializes the document.
    pub fn render(&self) -> String {
        info!(
            elements = self.elements.len(),
            mode:% = self.options.mode;
            "Rendering document"
        );
        let svg = self.to_svg().to_string();
        match self.options.mode {
            OutputMode::Standalone => {
                format!("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n{svg}\n")
            }
            OutputMode::Embedded => svg,
        }
    }

    /// Dublin Core metadata in RDF.
    fn metadata_element(&self) -> svg_element::Element {
        let mut work = svg_element::Element::new("cc:Work");
        work.assign("rdf:about", "");
        work.append(text_element("dc:format", "image/svg+xml"));

        let mut kind = svg_element::Element::new("dc:type");
        kind.assign("rdf:resource", "http://purl.org/dc/dcmitype/StillImage");
        work.append(kind);

        if let Some(title) = &self.options.title {
            work.append(text_element("dc:title", title));
        }
        let metadata = &self.options.metadata;
        if let Some(author) = &metadata.author {
            let mut agent = svg_element::Element::new("cc:Agent");
            agent.append(text_element("dc:title", author));
            let mut creator = svg_element::Element::new("dc:creator");
            creator.append(agent);
            work.append(creator);
        }
        if let Some(license) = &metadata.license {
            let mut element = svg_element::Element::new("cc:license");
            element.assign("rdf:resource", license.as_str());
            work.append(element);
        }
        if let Some(date) = metadata.date {
            work.append(text_element("dc:date", &date.to_string()));
        }

        let mut rdf = svg_element::Element::new("rdf:RDF");
        rdf.assign("xmlns:rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        rdf.assign("xmlns:dc", "http://purl.org/dc/elements/1.1/");
        rdf.assign("xmlns:cc", "http://creativecommons.org/ns#");
        rdf.append(work);

        let mut element = svg_element::Element::new("metadata");
        element.append(rdf);
        element
    }
}

fn floor3(value: f32) -> f32 {
    (value * 1000.0).floor() / 1000.0 + 0.0
}

fn ceil3(value: f32) -> f32 {
    (value * 1000.0).ceil() / 1000.0 + 0.0
}

fn text_element(name: &str, content: &str) -> svg_element::Element {
    let mut element = svg_element::Element::new(name);
    element.append(SvgText::new(content));
    element
}

/// `<defs>` with every marker definition.
fn definitions(options: &DocumentOptions) -> svg_element::Definitions {
    marker_definitions(&options.palette)
        .into_iter()
        .fold(svg_element::Definitions::new(), |defs, marker| {
            defs.add(marker)
        })
}

fn stylesheet_element(options: &DocumentOptions) -> svg_element::Element {
    text_element("style", &stylesheet(options))
}

/// CSS rules mapping color tokens to palette colors.
///
/// Elements draw in `currentColor`, and each color token class sets
/// `color`, so a token on a group colors everything inside it.
pub fn stylesheet(options: &DocumentOptions) -> String {
    let root = ROOT_CLASS;
    let palette = &options.palette;
    let mut css = format!(
        ".{root} {{ color: {}; font-family: {}; }}\n",
        palette.get(None),
        options.font_family
    );
    css.push_str(&format!(
        ".{root} line, .{root} path, .{root} polyline, .{root} polygon, \
         .{root} rect, .{root} circle, .{root} ellipse \
         {{ fill: none; stroke: currentColor; stroke-width: {}; \
         stroke-linecap: round; stroke-linejoin: round; }}\n",
        round3(options.stroke_width)
    ));
    css.push_str(&format!(
        ".{root} text {{ fill: currentColor; stroke: none; }}\n"
    ));
    css.push_str(&format!(
        ".{root} .filled {{ fill: currentColor; fill-opacity: 0.15; }}\n"
    ));
    for token in ColorToken::ALL {
        css.push_str(&format!(
            ".{root} .{} {{ color: {}; }}\n",
            token.class_name(),
            palette.get(Some(token))
        ));
    }
    css
}

/// Marker definitions and stylesheet shared by every embedded document on
/// a page.
///
/// Hosts that inline several [`OutputMode::Embedded`] documents include
/// this once, so marker ids resolve and token classes are styled.
pub fn shared_definitions(options: &DocumentOptions) -> String {
    let svg = svg::Document::new()
        .set("width", 0)
        .set("height", 0)
        .set("style", "position: absolute")
        .set("class", ROOT_CLASS)
        .add(definitions(options))
        .add(stylesheet_element(options));
    svg.to_string()
}
