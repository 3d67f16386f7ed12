//! Connectors anchored to the outlines of other elements.
//!
//! The builders compute endpoints from the shapes' geometry and return
//! plain [`Line`]s and [`Arc`]s that hold only the resulting points; the
//! shapes are not referenced after construction.
//!
//! Every endpoint is pushed off its shape by half the stroke width, so the
//! connector stops at the visible edge of a stroked outline. An end with an
//! arrowhead is pushed further by the arrow's length, so the tip of the
//! arrow touches the shape instead of its shaft.
//!
//! # Example
//!
//! ```
//! # use figura_core::connector::connection_line;
//! # use figura_core::draw::{Rectangle, RectangleProps, Stroke};
//! # use figura_core::geometry::{Point, Side, Size};
//! # fn main() -> Result<(), figura_core::Error> {
//! let left = Rectangle::new(RectangleProps::new(Point::new(0.0, 0.0), Size::new(50.0, 20.0)))?;
//! let right = Rectangle::new(RectangleProps::new(Point::new(100.0, 0.0), Size::new(50.0, 20.0)))?;
//!
//! let line = connection_line(&left, Side::Right, &right, Side::Left, Stroke::default());
//! assert_eq!(line.start(), Point::new(51.0, 10.0));
//! assert_eq!(line.end(), Point::new(91.0, 10.0));
//! # Ok(())
//! # }
//! ```

use log::trace;

use crate::{
    draw::{Arc, ArcProps, Element, Line, LineProps, Marker, Stroke},
    error::Result,
    geometry::Side,
};

/// Straight connector between two sides of two elements' bounding boxes.
pub fn connection_line(
    start: &dyn Element,
    start_side: Side,
    end: &dyn Element,
    end_side: Side,
    stroke: Stroke,
) -> Line {
    let from = start
        .bounds()
        .point_at(start_side, stroke.end_offset(Marker::Start));
    let to = end
        .bounds()
        .point_at(end_side, stroke.end_offset(Marker::End));
    trace!(from:?, to:?, start_side:%, end_side:%; "Connection line");
    Line::new(LineProps::new(from, to).with_stroke(stroke))
}

/// Straight connector along the line between two elements' centers.
///
/// Each end meets the true outline of its element, so lines between
/// circles and ellipses touch their circumference.
///
/// # Errors
///
/// Returns [`Error::DegenerateVector`](crate::Error::DegenerateVector) if
/// the two elements share a center.
pub fn diagonal_line(start: &dyn Element, end: &dyn Element, stroke: Stroke) -> Result<Line> {
    let (start_center, end_center) = (start.bounds().center(), end.bounds().center());
    let from = start.point_towards(end_center, stroke.end_offset(Marker::Start))?;
    let to = end.point_towards(start_center, stroke.end_offset(Marker::End))?;
    trace!(from:?, to:?; "Diagonal line");
    Ok(Line::new(LineProps::new(from, to).with_stroke(stroke)))
}

/// Arc leaving one element's side and entering another element's side.
///
/// Equal sides produce a half ellipse that bulges towards the shared side,
/// by `radius` if given. Perpendicular sides produce a quarter ellipse.
///
/// # Errors
///
/// Returns [`Error::Geometry`](crate::Error::Geometry) for opposite sides,
/// for a radius with differing sides, or for coinciding anchors.
pub fn connection_arc(
    start: &dyn Element,
    start_side: Side,
    end: &dyn Element,
    end_side: Side,
    radius: Option<f32>,
    stroke: Stroke,
) -> Result<Arc> {
    let from = start
        .bounds()
        .point_at(start_side, stroke.end_offset(Marker::Start));
    let to = end
        .bounds()
        .point_at(end_side, stroke.end_offset(Marker::End));
    trace!(from:?, to:?, start_side:%, end_side:%; "Connection arc");

    let mut props = ArcProps::new(from, start_side, to, end_side).with_stroke(stroke);
    props.radius = radius;
    Arc::new(props)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::{Circle, CircleProps, MarkerKind, MarkerSet, Rectangle, RectangleProps},
        error::Error,
        geometry::{Point, Size},
    };

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(RectangleProps::new(Point::new(x, y), Size::new(w, h))).unwrap()
    }

    #[test]
    fn test_connection_line_between_adjacent_rectangles() {
        let stroke = Stroke::default();
        let left = rect(0.0, 0.0, 80.0, 40.0);
        let right = rect(200.0, 0.0, 80.0, 40.0);

        let line = connection_line(&left, Side::Right, &right, Side::Left, stroke);
        let half = stroke.width / 2.0;
        let clearance = MarkerKind::Arrow.clearance(stroke.width);

        assert_eq!(line.start(), Point::new(80.0 + half, 20.0));
        assert_eq!(line.end(), Point::new(200.0 - (half + clearance), 20.0));
    }

    #[test]
    fn test_connection_line_start_marker_offsets_start() {
        let stroke = Stroke::default().with_markers(MarkerSet::BOTH);
        let top = rect(0.0, 0.0, 40.0, 40.0);
        let bottom = rect(0.0, 100.0, 40.0, 40.0);

        let line = connection_line(&top, Side::Bottom, &bottom, Side::Top, stroke);
        assert_eq!(line.start(), Point::new(20.0, 49.0));
        assert_eq!(line.end(), Point::new(20.0, 91.0));
    }

    #[test]
    fn test_connection_line_dots_need_no_clearance() {
        let stroke = Stroke::default()
            .with_markers(MarkerSet::BOTH)
            .with_marker_kind(MarkerKind::Dot);
        let line = connection_line(
            &rect(0.0, 0.0, 10.0, 10.0),
            Side::Right,
            &rect(50.0, 0.0, 10.0, 10.0),
            Side::Left,
            stroke,
        );
        assert_eq!(line.start().x(), 11.0);
        assert_eq!(line.end().x(), 49.0);
    }

    #[test]
    fn test_diagonal_line_meets_circumference() {
        let a = Circle::new(CircleProps::new(Point::new(0.0, 0.0), 10.0)).unwrap();
        let b = Circle::new(CircleProps::new(Point::new(100.0, 100.0), 20.0)).unwrap();
        let stroke = Stroke::default().with_markers(MarkerSet::NONE);

        let line = diagonal_line(&a, &b, stroke).unwrap();
        assert_approx_eq!(f32, line.start().length(), 11.0, epsilon = 1e-4);
        assert_approx_eq!(
            f32,
            line.end().distance_to(Point::new(100.0, 100.0)),
            21.0,
            epsilon = 1e-4
        );
        assert_approx_eq!(f32, line.start().x(), line.start().y(), epsilon = 1e-4);
    }

    #[test]
    fn test_diagonal_line_same_center_fails() {
        let a = Circle::new(CircleProps::new(Point::new(0.0, 0.0), 10.0)).unwrap();
        let b = Circle::new(CircleProps::new(Point::new(0.0, 0.0), 20.0)).unwrap();
        assert_eq!(
            diagonal_line(&a, &b, Stroke::default()).unwrap_err(),
            Error::DegenerateVector
        );
    }

    #[test]
    fn test_connection_arc_same_side() {
        let left = rect(0.0, 50.0, 40.0, 40.0);
        let right = rect(100.0, 50.0, 40.0, 40.0);
        let arc = connection_arc(
            &left,
            Side::Top,
            &right,
            Side::Top,
            None,
            Stroke::default(),
        )
        .unwrap();
        assert_eq!(arc.start(), Point::new(20.0, 49.0));
        assert_eq!(arc.end(), Point::new(120.0, 41.0));
        assert!(arc.bounds().min_y() < 41.0);
    }

    #[test]
    fn test_connection_arc_opposite_sides_fail() {
        let a = rect(0.0, 0.0, 40.0, 40.0);
        let b = rect(100.0, 0.0, 40.0, 40.0);
        let result = connection_arc(&a, Side::Right, &b, Side::Left, None, Stroke::default());
        assert!(matches!(result, Err(Error::Geometry(_))));
    }

    #[test]
    fn test_connection_arc_with_boxed_elements() {
        let a: Box<dyn Element> = Box::new(rect(0.0, 0.0, 40.0, 40.0));
        let b: Box<dyn Element> = Box::new(rect(100.0, 100.0, 40.0, 40.0));
        let arc = connection_arc(
            a.as_ref(),
            Side::Right,
            b.as_ref(),
            Side::Top,
            None,
            Stroke::default(),
        )
        .unwrap();
        assert!(arc.is_clockwise());
    }
}
