use svg::node::element as svg_element;

use crate::{
    draw::{Decorated, Decoration, Element, Label, SvgNode},
    error::{Error, Result},
    geometry::{Bounds, Point, round3},
    text::{HorizontalAlign, VerticalAlign},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleProps {
    pub center: Point,
    pub radius: f32,
}

impl CircleProps {
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A circle.
#[derive(Debug)]
pub struct Circle {
    props: CircleProps,
    pub(super) decoration: Decoration,
}

impl Circle {
    /// # Errors
    ///
    /// Returns [`Error::Geometry`] unless the radius is positive.
    pub fn new(props: CircleProps) -> Result<Self> {
        if !(props.radius > 0.0) {
            return Err(Error::geometry(format!(
                "circle radius must be positive, got {}",
                props.radius
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

    pub fn radius(&self) -> f32 {
        self.props.radius
    }

    /// Attaches a label centered on the circle.
    pub fn text(self, label: Label) -> Self {
        let text = label.place(
            self.props.center,
            (HorizontalAlign::Center, VerticalAlign::Center),
        );
        self.add(text)
    }
}

impl Element for Circle {
    fn bounds(&self) -> Bounds {
        let r = self.props.radius;
        self.decoration
            .bounds(Bounds::from_center(self.props.center, Point::new(r, r)))
    }

    fn render(&self) -> SvgNode {
        let circle = svg_element::Circle::new()
            .set("cx", round3(self.props.center.x()))
            .set("cy", round3(self.props.center.y()))
            .set("r", round3(self.props.radius));
        self.decoration.render(circle)
    }

    fn point_towards(&self, target: Point, offset: f32) -> Result<Point> {
        let direction = target.sub_point(self.props.center);
        Ok(self
            .props
            .center
            .add_point(direction.normalize(self.props.radius + offset)?))
    }
}
