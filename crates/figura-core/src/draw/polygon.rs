use svg::node::element as svg_element;

use crate::{
    draw::{Decorated, Decoration, Element, Label, Marker, Stroke, SvgNode},
    error::{Error, Result},
    geometry::{Bounds, Point, round3},
    text::{HorizontalAlign, VerticalAlign},
};

/// Minimum number of points of a polygon or polyline.
const MIN_POINTS: usize = 3;

fn check_points(kind: &str, points: &[Point]) -> Result<Bounds> {
    if points.len() < MIN_POINTS {
        return Err(Error::geometry(format!(
            "{kind} requires at least {MIN_POINTS} points, got {}",
            points.len()
        )));
    }
    Bounds::from_points(points.iter().copied())
        .ok_or_else(|| Error::geometry(format!("{kind} has no points")))
}

/// `points` attribute value: `x,y` pairs separated by spaces.
fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", round3(p.x()), round3(p.y())))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonProps {
    pub points: Vec<Point>,
}

impl PolygonProps {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }
}

/// A closed shape through three or more points.
#[derive(Debug)]
pub struct Polygon {
    props: PolygonProps,
    frame: Bounds,
    pub(super) decoration: Decoration,
}

impl Polygon {
    /// # Errors
    ///
    /// Returns [`Error::Geometry`] for fewer than three points.
    pub fn new(props: PolygonProps) -> Result<Self> {
        let frame = check_points("polygon", &props.points)?;
        Ok(Self {
            props,
            frame,
            decoration: Decoration::default(),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.props.points
    }

    /// Area centroid of the polygon, or the mean of its vertices when the
    /// polygon has no area.
    pub fn centroid(&self) -> Point {
        let points = &self.props.points;
        let (mut area, mut cx, mut cy) = (0.0f32, 0.0f32, 0.0f32);
        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            let cross = p.cross(q);
            area += cross;
            cx += (p.x() + q.x()) * cross;
            cy += (p.y() + q.y()) * cross;
        }

        if area.abs() < f32::EPSILON {
            let sum = points
                .iter()
                .fold(Point::default(), |acc, p| acc.add_point(*p));
            return sum.divide(points.len() as f32);
        }
        Point::new(cx, cy).divide(3.0 * area)
    }

    /// Attaches a label centered on the centroid.
    pub fn text(self, label: Label) -> Self {
        let text = label.place(
            self.centroid(),
            (HorizontalAlign::Center, VerticalAlign::Center),
        );
        self.add(text)
    }
}

impl Element for Polygon {
    fn bounds(&self) -> Bounds {
        self.decoration.bounds(self.frame)
    }

    fn render(&self) -> SvgNode {
        let polygon =
            svg_element::Polygon::new().set("points", points_attribute(&self.props.points));
        self.decoration.render(polygon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineProps {
    pub points: Vec<Point>,
    pub stroke: Stroke,
}

impl PolylineProps {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            stroke: Stroke::default(),
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

/// An open connector through three or more points.
///
/// A middle marker is drawn at every interior vertex.
#[derive(Debug)]
pub struct Polyline {
    props: PolylineProps,
    frame: Bounds,
    pub(super) decoration: Decoration,
}

impl Polyline {
    /// # Errors
    ///
    /// Returns [`Error::Geometry`] for fewer than three points.
    pub fn new(props: PolylineProps) -> Result<Self> {
        let frame = check_points("polyline", &props.points)?;

        let (points, stroke) = (&props.points, props.stroke);
        let (first, last) = (points[0], points[points.len() - 1]);
        let start = stroke.marker_outline(Marker::Start, first, first.sub_point(points[1]));
        let end = stroke.marker_outline(
            Marker::End,
            last,
            last.sub_point(points[points.len() - 2]),
        );
        // marker-mid is oriented along the bisector of the two segments.
        let middle = points.windows(3).flat_map(|triple| {
            let unit = |v: Point| v.normalize(1.0).unwrap_or_default();
            let direction = unit(triple[1].sub_point(triple[0]))
                .add_point(unit(triple[2].sub_point(triple[1])));
            stroke.marker_outline(Marker::Middle, triple[1], direction)
        });
        let frame = Bounds::from_points(start.into_iter().chain(middle).chain(end))
            .map_or(frame, |markers| frame.encompass(markers));

        Ok(Self {
            props,
            frame,
            decoration: Decoration::default(),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.props.points
    }

    /// Total length of all segments.
    pub fn length(&self) -> f32 {
        self.props
            .points
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }

    /// Point halfway along the polyline and the direction of the segment
    /// it lies on.
    fn halfway(&self) -> (Point, Point) {
        let mut remaining = self.length() / 2.0;
        let mut last = (self.props.points[0], Point::default());
        for pair in self.props.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let segment = a.distance_to(b);
            if segment == 0.0 {
                continue;
            }
            if remaining <= segment {
                return (a.lerp(b, remaining / segment), b.sub_point(a));
            }
            remaining -= segment;
            last = (b, b.sub_point(a));
        }
        last
    }

    /// Attaches a label beside the point halfway along the polyline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`] if every segment has zero length.
    pub fn text(self, label: Label) -> Result<Self> {
        let (anchor, direction) = self.halfway();
        let text = label.place_beside(anchor, direction)?;
        Ok(self.add(text))
    }
}

impl Element for Polyline {
    fn bounds(&self) -> Bounds {
        self.decoration.bounds(self.frame)
    }

    fn render(&self) -> SvgNode {
        let polyline =
            svg_element::Polyline::new().set("points", points_attribute(&self.props.points));
        let polyline = self
            .props
            .stroke
            .apply(polyline, &self.decoration, self.length());
        self.decoration.render(polyline)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::{MarkerSet, Transform},
        text::TextMetrics,
    };

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(0.0, 30.0),
        ]
    }

    #[test]
    fn test_too_few_points() {
        let two = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(matches!(
            Polygon::new(PolygonProps::new(two)),
            Err(Error::Geometry(_))
        ));
        assert!(matches!(
            Polyline::new(PolylineProps::new(two)),
            Err(Error::Geometry(_))
        ));
    }

    #[test]
    fn test_polygon_bounds_and_render() {
        let polygon = Polygon::new(PolygonProps::new(triangle())).unwrap();
        assert_eq!(polygon.bounds().bottom_right(), Point::new(30.0, 30.0));
        let svg = polygon.render().to_string();
        assert!(svg.contains(r#"points="0,0 30,0 0,30""#));
    }

    #[test]
    fn test_polygon_centroid() {
        let polygon = Polygon::new(PolygonProps::new(triangle())).unwrap();
        let c = polygon.centroid();
        assert_approx_eq!(f32, c.x(), 10.0, epsilon = 1e-4);
        assert_approx_eq!(f32, c.y(), 10.0, epsilon = 1e-4);

        let flat = Polygon::new(PolygonProps::new([
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(6.0, 0.0),
        ]))
        .unwrap();
        assert_eq!(flat.centroid(), Point::new(3.0, 0.0));
    }

    #[test]
    fn test_polygon_transform_moves_bounds() {
        let polygon = Polygon::new(PolygonProps::new(triangle()))
            .unwrap()
            .with_transform(Transform::Translate(Point::new(10.0, 5.0)));
        assert_eq!(polygon.bounds().top_left(), Point::new(10.0, 5.0));
        assert!(
            polygon
                .render()
                .to_string()
                .contains(r#"transform="translate(10 5)""#)
        );
    }

    #[test]
    fn test_polyline_markers_and_length() {
        let polyline = Polyline::new(
            PolylineProps::new(triangle())
                .with_stroke(Stroke::default().with_markers(MarkerSet::MIDDLE)),
        )
        .unwrap();
        assert_approx_eq!(f32, polyline.length(), 30.0 + 30.0 * 2.0f32.sqrt());
        let svg = polyline.render().to_string();
        assert!(svg.starts_with("<polyline"));
        assert!(svg.contains("marker-mid"));
    }

    #[test]
    fn test_polyline_end_tip_in_bounds() {
        let polyline = Polyline::new(PolylineProps::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]))
        .unwrap();
        assert_approx_eq!(f32, polyline.bounds().max_y(), 18.0, epsilon = 1e-4);
    }

    #[test]
    fn test_polyline_bounds_cover_middle_markers() {
        let polyline = Polyline::new(
            PolylineProps::new([
                Point::new(0.0, 0.0),
                Point::new(50.0, 0.0),
                Point::new(100.0, 0.0),
            ])
            .with_stroke(Stroke::default().with_markers(MarkerSet::MIDDLE)),
        )
        .unwrap();
        let bounds = polyline.bounds();
        assert_approx_eq!(f32, bounds.min_y(), -4.0, epsilon = 1e-4);
        assert_approx_eq!(f32, bounds.max_y(), 4.0, epsilon = 1e-4);
        assert_eq!(bounds.max_x(), 100.0);
    }

    #[test]
    fn test_polyline_label_on_middle_segment() {
        let metrics = TextMetrics::new(10.0);
        let polyline = Polyline::new(PolylineProps::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(90.0, 0.0),
            Point::new(100.0, 0.0),
        ]))
        .unwrap()
        .text(Label::new("x", &metrics))
        .unwrap();
        let text_bounds = polyline.decoration().children()[0].bounds();
        assert_approx_eq!(f32, text_bounds.center().x(), 50.0, epsilon = 1e-4);
        assert!(text_bounds.max_y() < 0.0);
    }
}
