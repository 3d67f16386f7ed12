use std::f32::consts::{FRAC_PI_2, PI};

use svg::node::element as svg_element;

use crate::{
    draw::{Decorated, Decoration, Element, Label, Marker, Stroke, SvgNode},
    error::{Error, Result},
    geometry::{Bounds, Point, Side},
};

/// Parameter distance below which a peak is taken to be an endpoint.
const ENDPOINT_EPSILON: f32 = 1e-4;

/// Approximate perimeter of an ellipse with radii `a` and `b`.
///
/// Uses the first terms of the Gauss-Kummer series, which stays within a
/// fraction of a percent of the true perimeter for the radius ratios found
/// in diagrams.
///
/// ```
/// # use figura_core::draw::ellipse_perimeter;
/// let circle = ellipse_perimeter(10.0, 10.0);
/// assert!((circle - 20.0 * std::f32::consts::PI).abs() < 1e-3);
/// ```
pub fn ellipse_perimeter(a: f32, b: f32) -> f32 {
    let sum = a + b;
    if sum <= 0.0 {
        return 0.0;
    }
    let h = ((a - b) / sum).powi(2);
    PI * sum * (1.0 + h / 4.0 + h.powi(2) / 64.0 + h.powi(3) / 256.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcProps {
    pub start: Point,
    /// Side the arc leaves from; its direction is the tangent at `start`.
    pub start_side: Side,
    pub end: Point,
    /// Side the arc arrives at; the arc enters it travelling inward.
    pub end_side: Side,
    /// Bulge of a half-ellipse arc. Only valid when both sides are equal;
    /// defaults to half the distance between the endpoints.
    pub radius: Option<f32>,
    pub stroke: Stroke,
}

impl ArcProps {
    pub fn new(start: Point, start_side: Side, end: Point, end_side: Side) -> Self {
        Self {
            start,
            start_side,
            end,
            end_side,
            radius: None,
            stroke: Stroke::default(),
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

/// An elliptical arc between two points.
///
/// The arc leaves `start` along the outward direction of its start side
/// and arrives at `end` against the outward direction of its end side:
///
/// - Perpendicular sides give a quarter ellipse centered on the corner of
///   the box spanned by the two points.
/// - Equal sides give a half ellipse over the chord, bulging towards the
///   shared side. When the endpoints are not level along that side the
///   ellipse is skewed, so the arc still leaves and arrives square to it.
/// - Opposite sides have no such curve and are rejected.
///
/// The arc is stored as `center + a·cos θ + b·sin θ` with `θ` running from
/// zero at `start` to a quarter or half turn at `end`, and drawn as two
/// cubic Béziers meeting at the middle of that range.
#[derive(Debug)]
pub struct Arc {
    props: ArcProps,
    center: Point,
    a: Point,
    b: Point,
    radii: Point,
    sweep: bool,
    /// Turn covered by the arc, in radians.
    span: f32,
    pub(super) decoration: Decoration,
}

impl Arc {
    /// # Errors
    ///
    /// Returns [`Error::Geometry`] if the sides are opposite, if a radius is
    /// given for differing sides or is not positive, or if the endpoints
    /// coincide.
    pub fn new(props: ArcProps) -> Result<Self> {
        let ArcProps {
            start,
            start_side,
            end,
            end_side,
            radius,
            ..
        } = props;

        if start_side.opposite() == end_side {
            return Err(Error::geometry(format!(
                "arc cannot connect opposite sides `{start_side}` and `{end_side}`"
            )));
        }
        if let Some(radius) = radius {
            if start_side != end_side {
                return Err(Error::geometry(
                    "an explicit arc radius requires equal start and end sides",
                ));
            }
            if !(radius > 0.0) {
                return Err(Error::geometry(format!(
                    "arc radius must be positive, got {radius}"
                )));
            }
        }
        if start == end {
            return Err(Error::geometry("arc endpoints coincide"));
        }

        let sweep = start_side.direction().cross(end.sub_point(start)) > 0.0;

        let (center, b, radii, span) = if start_side == end_side {
            let center = start.midpoint(end);
            let half_chord = start.distance_to(center);
            let bulge = radius.unwrap_or(half_chord);
            let radii = if start_side.is_horizontal() {
                Point::new(bulge, half_chord)
            } else {
                Point::new(half_chord, bulge)
            };
            (center, start_side.direction().scale(bulge), radii, PI)
        } else {
            let center = if start_side.is_horizontal() {
                Point::new(start.x(), end.y())
            } else {
                Point::new(end.x(), start.y())
            };
            let radii = end.sub_point(start).abs();
            (center, end.sub_point(center), radii, FRAC_PI_2)
        };

        Ok(Self {
            props,
            center,
            a: start.sub_point(center),
            b,
            radii,
            sweep,
            span,
            decoration: Decoration::default(),
        })
    }

    pub fn start(&self) -> Point {
        self.props.start
    }

    pub fn end(&self) -> Point {
        self.props.end
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Horizontal and vertical radius of the underlying ellipse.
    ///
    /// For a skewed half ellipse these are the bulge and half the chord,
    /// not its principal axes.
    pub fn radii(&self) -> Point {
        self.radii
    }

    /// Whether the arc turns clockwise on screen.
    pub fn is_clockwise(&self) -> bool {
        self.sweep
    }

    /// Approximate length of the arc.
    pub fn length(&self) -> f32 {
        let (major, minor) = self.principal_radii();
        ellipse_perimeter(major, minor) * self.span / (2.0 * PI)
    }

    /// Semi-axes of the ellipse spanned by the conjugate semi-diameters
    /// `a` and `b` (Apollonius).
    fn principal_radii(&self) -> (f32, f32) {
        let squares = self.a.dot(self.a) + self.b.dot(self.b);
        let area = 2.0 * self.a.cross(self.b).abs();
        let sum = (squares + area).sqrt();
        let difference = (squares - area).max(0.0).sqrt();
        ((sum + difference) / 2.0, (sum - difference) / 2.0)
    }

    fn point_at(&self, theta: f32) -> Point {
        let (sin, cos) = theta.sin_cos();
        self.center
            .add_point(self.a.scale(cos))
            .add_point(self.b.scale(sin))
    }

    fn tangent_at(&self, theta: f32) -> Point {
        let (sin, cos) = theta.sin_cos();
        self.b.scale(cos).sub_point(self.a.scale(sin))
    }

    /// Point halfway along the arc's parameter range: the apex of a half
    /// ellipse, or the 45 degree point of a quarter ellipse.
    pub fn midpoint(&self) -> Point {
        self.point_at(self.span / 2.0)
    }

    /// Attaches a label beside the middle of the arc.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`] if the arc has no tangent at its
    /// middle.
    pub fn text(self, label: Label) -> Result<Self> {
        let mid = self.span / 2.0;
        let text = label.place_beside(self.point_at(mid), self.tangent_at(mid))?;
        Ok(self.add(text))
    }

    fn own_bounds(&self) -> Bounds {
        let ArcProps { start, end, stroke, .. } = self.props;

        // Each coordinate peaks where its derivative vanishes:
        // tan θ = b / a, once per half turn.
        let peaks = |a: f32, b: f32| {
            let theta = b.atan2(a).rem_euclid(PI);
            [theta, theta + PI]
        };
        let outline = peaks(self.a.x(), self.b.x())
            .into_iter()
            .chain(peaks(self.a.y(), self.b.y()))
            .filter(|theta| {
                *theta > ENDPOINT_EPSILON && *theta < self.span - ENDPOINT_EPSILON
            })
            .map(|theta| self.point_at(theta))
            .chain([start, end]);

        let mid = self.span / 2.0;
        let markers = [
            stroke.marker_outline(Marker::Start, start, self.tangent_at(0.0).scale(-1.0)),
            stroke.marker_outline(Marker::Middle, self.point_at(mid), self.tangent_at(mid)),
            stroke.marker_outline(Marker::End, end, self.tangent_at(self.span)),
        ];
        Bounds::from_points(outline.chain(markers.into_iter().flatten())).unwrap_or_default()
    }

    /// Cubic Bézier approximating the arc between two parameter values.
    ///
    /// Exact at both ends in position and direction; for the quarter turns
    /// used here the deviation stays below 0.03% of the radius.
    fn bezier(&self, from: f32, to: f32) -> [Point; 3] {
        let k = 4.0 / 3.0 * ((to - from) / 4.0).tan();
        let start = self.point_at(from);
        let end = if to == self.span {
            self.props.end
        } else {
            self.point_at(to)
        };
        [
            start.add_point(self.tangent_at(from).scale(k)),
            end.sub_point(self.tangent_at(to).scale(k)),
            end,
        ]
    }

    /// SVG path data. The arc is split at its midpoint, which is also where
    /// `marker-mid` sits.
    fn path_data(&self) -> String {
        let start = self.props.start.rounded();
        let mut data = format!("M {} {}", start.x(), start.y());

        let mid = self.span / 2.0;
        for (from, to) in [(0.0, mid), (mid, self.span)] {
            let [c1, c2, to] = self.bezier(from, to).map(Point::rounded);
            data.push_str(&format!(
                " C {} {} {} {} {} {}",
                c1.x(),
                c1.y(),
                c2.x(),
                c2.y(),
                to.x(),
                to.y()
            ));
        }
        data
    }
}

impl Element for Arc {
    fn bounds(&self) -> Bounds {
        self.decoration.bounds(self.own_bounds())
    }

    fn render(&self) -> SvgNode {
        let path = svg_element::Path::new().set("d", self.path_data());
        let path = self
            .props
            .stroke
            .apply(path, &self.decoration, self.length());
        self.decoration.render(path)
    }
}
