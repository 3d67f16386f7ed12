use svg::node::element as svg_element;

use crate::{
    draw::{
        DEFAULT_STROKE_WIDTH, Decorated, Decoration, Element, Label, Marker, MarkerKind,
        MarkerSet, SvgNode, marker::apply_markers,
    },
    error::Result,
    geometry::{Bounds, Point, round3},
};

/// Dash length in multiples of the stroke width.
const DASH: f32 = 4.0;

/// Gap between dashes in multiples of the stroke width.
const DASH_GAP: f32 = 3.0;

/// Markers, dashing and width of a connector's stroke.
///
/// Connectors need the stroke width to keep their arrowheads clear of the
/// shapes they connect: see [`Stroke::end_offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub markers: MarkerSet,
    pub marker_kind: MarkerKind,
    pub dashed: bool,
    pub width: f32,
}

impl Stroke {
    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_marker_kind(mut self, marker_kind: MarkerKind) -> Self {
        self.marker_kind = marker_kind;
        self
    }

    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// How far the marker at `marker` reaches past the path end, or zero
    /// without a marker there.
    pub fn clearance(&self, marker: Marker) -> f32 {
        if self.markers.contains(marker) {
            self.marker_kind.clearance(self.width)
        } else {
            0.0
        }
    }

    /// Distance to keep between a connector end and the shape it attaches
    /// to: half the stroke width plus the marker clearance at that end.
    pub fn end_offset(&self, marker: Marker) -> f32 {
        self.width.mul_add(0.5, self.clearance(marker))
    }

    /// Points enclosing the marker at `marker`, drawn at `at` on a path
    /// travelling along `direction`; empty without a marker there.
    pub(crate) fn marker_outline(
        &self,
        marker: Marker,
        at: Point,
        direction: Point,
    ) -> Vec<Point> {
        if self.markers.contains(marker) {
            self.marker_kind.outline(self.width, at, direction)
        } else {
            Vec::new()
        }
    }

    /// Writes the stroke width, markers and dash pattern for a path of
    /// `length` onto a connector node.
    ///
    /// The width goes into an inline style so it wins over the document
    /// stylesheet; markers scale with it.
    pub(crate) fn apply<N: svg::Node>(
        &self,
        node: N,
        decoration: &Decoration,
        length: f32,
    ) -> N {
        let mut node = apply_markers(
            node,
            self.markers,
            self.marker_kind,
            decoration.style().color(),
        );
        node.assign("style", format!("stroke-width: {}", round3(self.width)));
        if self.dashed {
            node.assign("stroke-dasharray", dash_pattern(length, self.width));
        }
        node
    }
}

impl Default for Stroke {
    /// An undashed stroke of the default width with an arrow at the end.
    fn default() -> Self {
        Self {
            markers: MarkerSet::END,
            marker_kind: MarkerKind::default(),
            dashed: false,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// `stroke-dasharray` value for a dashed path of `length`.
///
/// The dash and gap lengths are stretched so that a whole number of dashes
/// fits the path exactly and both ends of the path are solid.
///
/// ```
/// # use figura_core::draw::dash_pattern;
/// assert_eq!(dash_pattern(36.0, 2.0), "8 6");
/// ```
pub fn dash_pattern(length: f32, stroke_width: f32) -> String {
    let (dash, gap) = (DASH * stroke_width, DASH_GAP * stroke_width);
    let count = ((length + gap) / (dash + gap)).round().max(1.0);
    let scale = length / count.mul_add(dash, (count - 1.0) * gap);
    format!("{} {}", round3(dash * scale), round3(gap * scale))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProps {
    pub start: Point,
    pub end: Point,
    pub stroke: Stroke,
}

impl LineProps {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stroke: Stroke::default(),
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

/// A straight connector.
///
/// A middle marker turns the line into a two-segment path meeting at the
/// midpoint, which is where SVG places `marker-mid`.
#[derive(Debug)]
pub struct Line {
    props: LineProps,
    pub(super) decoration: Decoration,
}

impl Line {
    pub fn new(props: LineProps) -> Self {
        Self {
            props,
            decoration: Decoration::default(),
        }
    }

    pub fn start(&self) -> Point {
        self.props.start
    }

    pub fn end(&self) -> Point {
        self.props.end
    }

    pub fn stroke(&self) -> &Stroke {
        &self.props.stroke
    }

    pub fn length(&self) -> f32 {
        self.props.start.distance_to(self.props.end)
    }

    pub fn midpoint(&self) -> Point {
        self.props.start.midpoint(self.props.end)
    }

    /// Attaches a label beside the middle of the line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`](crate::Error::DegenerateVector)
    /// for a zero-length line, which has no side to put the label on.
    pub fn text(self, label: Label) -> Result<Self> {
        let direction = self.props.end.sub_point(self.props.start);
        let text = label.place_beside(self.midpoint(), direction)?;
        Ok(self.add(text))
    }

    fn own_bounds(&self) -> Bounds {
        let LineProps { start, end, stroke } = self.props;
        let direction = end.sub_point(start);
        let markers = [
            stroke.marker_outline(Marker::Start, start, direction.scale(-1.0)),
            stroke.marker_outline(Marker::Middle, self.midpoint(), direction),
            stroke.marker_outline(Marker::End, end, direction),
        ];
        Bounds::from_points([start, end].into_iter().chain(markers.into_iter().flatten()))
            .unwrap_or_default()
    }
}

impl Element for Line {
    fn bounds(&self) -> Bounds {
        self.decoration.bounds(self.own_bounds())
    }

    fn render(&self) -> SvgNode {
        let LineProps { start, end, stroke } = self.props;
        let (start, end) = (start.rounded(), end.rounded());
        let length = self.length();

        if stroke.markers.contains(Marker::Middle) {
            let mid = self.midpoint().rounded();
            let data = format!(
                "M {} {} L {} {} L {} {}",
                start.x(),
                start.y(),
                mid.x(),
                mid.y(),
                end.x(),
                end.y()
            );
            let path = svg_element::Path::new().set("d", data);
            return self
                .decoration
                .render(stroke.apply(path, &self.decoration, length));
        }

        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y());
        self.decoration
            .render(stroke.apply(line, &self.decoration, length))
    }
}
