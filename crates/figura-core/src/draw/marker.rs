//! Connector end markers and their SVG definitions.
//!
//! Markers are shared definitions referenced by id: every connector with
//! the same kind and color points at the same `<marker>` element. The
//! document emits one definition per kind for the uncolored default and
//! for each [`ColorToken`].

use std::{fmt, str::FromStr};

use serde::Deserialize;
use svg::node::element as svg_element;

use crate::{
    color::{ColorToken, Palette},
    geometry::{Point, Side},
};

/// Arrowhead length in multiples of the stroke width.
const ARROW_LENGTH: f32 = 4.0;

/// Dot diameter in multiples of the stroke width.
const DOT_DIAMETER: f32 = 3.0;

/// Position of a marker along a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    Middle,
    End,
}

impl Marker {
    fn bit(self) -> u8 {
        match self {
            Self::Start => 0b001,
            Self::Middle => 0b010,
            Self::End => 0b100,
        }
    }
}

impl FromStr for Marker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            _ => Err(format!(
                "invalid marker `{s}`, valid values: start, middle, end"
            )),
        }
    }
}

/// Set of marker positions on a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkerSet(u8);

impl MarkerSet {
    pub const NONE: MarkerSet = MarkerSet(0);
    pub const START: MarkerSet = MarkerSet(0b001);
    pub const MIDDLE: MarkerSet = MarkerSet(0b010);
    pub const END: MarkerSet = MarkerSet(0b100);
    pub const BOTH: MarkerSet = MarkerSet(0b101);

    pub fn contains(self, marker: Marker) -> bool {
        self.0 & marker.bit() != 0
    }

    pub fn with(self, marker: Marker) -> Self {
        Self(self.0 | marker.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Marker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Shape drawn at a marker position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    #[default]
    Arrow,
    Dot,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Arrow, MarkerKind::Dot];

    fn name(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Dot => "dot",
        }
    }

    /// How far the marker reaches past the end of the path it sits on.
    ///
    /// Connectors pull their endpoints back by this much so that the tip of
    /// an arrowhead, not the end of the line, touches the target.
    pub fn clearance(self, stroke_width: f32) -> f32 {
        match self {
            Self::Arrow => ARROW_LENGTH * stroke_width,
            Self::Dot => 0.0,
        }
    }

    /// Points enclosing the marker drawn at `at` on a path travelling along
    /// `direction`.
    ///
    /// An arrowhead is a triangle as wide as it is long, with its base
    /// centered on the path. A dot is centered on the path. Without a usable
    /// direction the arrowhead may point anywhere, so the square around its
    /// every orientation is returned.
    pub fn outline(self, stroke_width: f32, at: Point, direction: Point) -> Vec<Point> {
        match self {
            Self::Arrow => {
                let length = ARROW_LENGTH * stroke_width;
                match direction.normalize(length) {
                    Ok(reach) => {
                        let half_base = reach.rotate(Side::Right).scale(0.5);
                        vec![
                            at.add_point(reach),
                            at.add_point(half_base),
                            at.sub_point(half_base),
                        ]
                    }
                    Err(_) => square(at, length),
                }
            }
            Self::Dot => square(at, DOT_DIAMETER * stroke_width / 2.0),
        }
    }

    /// Id of the shared marker definition for this kind and color.
    pub fn id(self, color: Option<ColorToken>) -> String {
        match color {
            Some(color) => format!("{}-{}", self.name(), color.class_name()),
            None => self.name().to_string(),
        }
    }

    /// `url(#...)` reference to the marker definition.
    pub(crate) fn reference(self, color: Option<ColorToken>) -> String {
        format!("url(#{})", self.id(color))
    }

    fn definition(self, color: Option<ColorToken>, palette: &Palette) -> svg_element::Marker {
        // Inline style: the document stylesheet would override presentation
        // attributes on the marker contents.
        let style = format!("fill: {}; stroke: none", palette.get(color));
        let marker = svg_element::Marker::new()
            .set("id", self.id(color))
            .set("viewBox", "0 0 10 10")
            .set("refY", 5);

        match self {
            // The base of the arrow sits on the path end; orient
            // auto-start-reverse makes a start marker point backwards.
            Self::Arrow => marker
                .set("refX", 0)
                .set("markerWidth", ARROW_LENGTH)
                .set("markerHeight", ARROW_LENGTH)
                .set("orient", "auto-start-reverse")
                .add(
                    svg_element::Path::new()
                        .set("d", "M 0 0 L 10 5 L 0 10 z")
                        .set("style", style),
                ),
            Self::Dot => marker
                .set("refX", 5)
                .set("markerWidth", DOT_DIAMETER)
                .set("markerHeight", DOT_DIAMETER)
                .add(
                    svg_element::Circle::new()
                        .set("cx", 5)
                        .set("cy", 5)
                        .set("r", 5)
                        .set("style", style),
                ),
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn square(center: Point, half: f32) -> Vec<Point> {
    let corner = Point::new(half, half);
    vec![center.sub_point(corner), center.add_point(corner)]
}

/// Marker definitions for every kind, uncolored and in every color token.
pub fn marker_definitions(palette: &Palette) -> Vec<svg_element::Marker> {
    let colors = std::iter::once(None).chain(ColorToken::ALL.map(Some));
    colors
        .flat_map(|color| MarkerKind::ALL.map(|kind| kind.definition(color, palette)))
        .collect()
}

/// Adds `marker-*` attributes to a connector node.
pub(crate) fn apply_markers<N: svg::Node>(
    mut node: N,
    markers: MarkerSet,
    kind: MarkerKind,
    color: Option<ColorToken>,
) -> N {
    let reference = kind.reference(color);
    if markers.contains(Marker::Start) {
        node.assign("marker-start", reference.as_str());
    }
    if markers.contains(Marker::Middle) {
        node.assign("marker-mid", reference.as_str());
    }
    if markers.contains(Marker::End) {
        node.assign("marker-end", reference.as_str());
    }
    node
}
