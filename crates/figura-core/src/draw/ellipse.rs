use svg::node::element as svg_element;

use crate::{
    draw::{Decorated, Decoration, Element, Label, SvgNode},
    error::{Error, Result},
    geometry::{Bounds, Point, round3},
    text::{HorizontalAlign, VerticalAlign},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseProps {
    pub center: Point,
    /// Horizontal and vertical radius.
    pub radii: Point,
}

impl EllipseProps {
    pub fn new(center: Point, rx: f32, ry: f32) -> Self {
        Self {
            center,
            radii: Point::new(rx, ry),
        }
    }
}

/// An axis-aligned ellipse.
#[derive(Debug)]
pub struct Ellipse {
    props: EllipseProps,
    pub(super) decoration: Decoration,
}

impl Ellipse {
    /// # Errors
    ///
    /// Returns [`Error::Geometry`] unless both radii are positive.
    pub fn new(props: EllipseProps) -> Result<Self> {
        let (rx, ry) = (props.radii.x(), props.radii.y());
        if !(rx > 0.0 && ry > 0.0) {
            return Err(Error::geometry(format!(
                "ellipse radii must be positive, got ({rx}, {ry})"
            )));
        }
        Ok(Self {
            props,
            decoration: Decoration::default(),
        })
    }

    pub fn center(&self) -> Point {
        self.props.center
    }

    pub fn radii(&self) -> Point {
        self.props.radii
    }

    /// Attaches a label centered on the ellipse.
    pub fn text(self, label: Label) -> Self {
        let text = label.place(
            self.props.center,
            (HorizontalAlign::Center, VerticalAlign::Center),
        );
        self.add(text)
    }
}

impl Element for Ellipse {
    fn bounds(&self) -> Bounds {
        self.decoration
            .bounds(Bounds::from_center(self.props.center, self.props.radii))
    }

    fn render(&self) -> SvgNode {
        let ellipse = svg_element::Ellipse::new()
            .set("cx", round3(self.props.center.x()))
            .set("cy", round3(self.props.center.y()))
            .set("rx", round3(self.props.radii.x()))
            .set("ry", round3(self.props.radii.y()));
        self.decoration.render(ellipse)
    }

    /// Intersects the ray from the center with the ellipse outline.
    fn point_towards(&self, target: Point, offset: f32) -> Result<Point> {
        let direction = target.sub_point(self.props.center).normalize(1.0)?;
        let (rx, ry) = (self.props.radii.x(), self.props.radii.y());
        let scaled = Point::new(direction.x() / rx, direction.y() / ry);
        let distance = 1.0 / scaled.length();
        Ok(self
            .props
            .center
            .add_point(direction.scale(distance + offset)))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_ellipse_rejects_zero_radius() {
        let result = Ellipse::new(EllipseProps::new(Point::default(), 5.0, 0.0));
        assert!(matches!(result, Err(Error::Geometry(_))));
    }

    #[test]
    fn test_ellipse_bounds() {
        let ellipse = Ellipse::new(EllipseProps::new(Point::new(0.0, 0.0), 20.0, 10.0)).unwrap();
        let bounds = ellipse.bounds();
        assert_eq!(bounds.width(), 40.0);
        assert_eq!(bounds.height(), 20.0);
    }

    #[test]
    fn test_ellipse_point_towards_axes() {
        let ellipse = Ellipse::new(EllipseProps::new(Point::new(0.0, 0.0), 20.0, 10.0)).unwrap();

        let right = ellipse.point_towards(Point::new(50.0, 0.0), 2.0).unwrap();
        assert_approx_eq!(f32, right.x(), 22.0, epsilon = 1e-4);
        assert_approx_eq!(f32, right.y(), 0.0);

        let below = ellipse.point_towards(Point::new(0.0, 50.0), 0.0).unwrap();
        assert_approx_eq!(f32, below.y(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ellipse_point_towards_diagonal_lies_on_outline() {
        let ellipse = Ellipse::new(EllipseProps::new(Point::new(5.0, 5.0), 20.0, 10.0)).unwrap();
        let p = ellipse
            .point_towards(Point::new(30.0, 30.0), 0.0)
            .unwrap()
            .sub_point(Point::new(5.0, 5.0));
        let on_outline = (p.x() / 20.0).powi(2) + (p.y() / 10.0).powi(2);
        assert_approx_eq!(f32, on_outline, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ellipse_render() {
        let ellipse = Ellipse::new(EllipseProps::new(Point::new(1.0, 1.0), 2.5, 1.0)).unwrap();
        let svg = ellipse.render().to_string();
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains(r#"rx="2.5""#));
    }
}
