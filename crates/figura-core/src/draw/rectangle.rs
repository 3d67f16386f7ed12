use svg::node::element as svg_element;

use crate::{
    draw::{Decorated, Decoration, Element, Label, SvgNode},
    error::{Error, Result},
    geometry::{Bounds, Point, Size, round3},
    text::{HorizontalAlign, VerticalAlign},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleProps {
    /// Top-left corner.
    pub position: Point,
    pub size: Size,
    /// Corner radius.
    pub radius: f32,
}

impl RectangleProps {
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            radius: 0.0,
        }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(center.sub_point(size.to_point().scale(0.5)), size)
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

/// An axis-aligned rectangle with optionally rounded corners.
#[derive(Debug)]
pub struct Rectangle {
    props: RectangleProps,
    frame: Bounds,
    pub(super) decoration: Decoration,
}

impl Rectangle {
    /// # Errors
    ///
    /// Returns [`Error::InvalidBox`] for a negative width or height and
    /// [`Error::Geometry`] if the corner radius is negative or exceeds half
    /// the shorter side.
    pub fn new(props: RectangleProps) -> Result<Self> {
        let frame = Bounds::from_top_left(props.position, props.size)?;
        let max_radius = props.size.width().min(props.size.height()) / 2.0;
        if !(0.0..=max_radius).contains(&props.radius) {
            return Err(Error::geometry(format!(
                "corner radius {} must lie between 0 and {max_radius}",
                props.radius
            )));
        }
        Ok(Self {
            props,
            frame,
            decoration: Decoration::default(),
        })
    }

    /// The rectangle itself, without children.
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    /// Attaches a label inside the rectangle.
    ///
    /// The alignment picks one of nine anchor points: the corners, the edge
    /// midpoints or the center, inset by the label's gap. The text extends
    /// inward from that anchor.
    pub fn text(self, label: Label) -> Self {
        let (h_align, v_align) = label
            .align()
            .unwrap_or((HorizontalAlign::Center, VerticalAlign::Center));
        let inner = self.frame.margin(-label.gap());
        let anchor = Point::new(
            inner.width().mul_add(h_align.factor(), inner.min_x()),
            inner.height().mul_add(v_align.factor(), inner.min_y()),
        );
        let text = label.place(anchor, (h_align, v_align));
        self.add(text)
    }
}

impl Element for Rectangle {
    fn bounds(&self) -> Bounds {
        self.decoration.bounds(self.frame)
    }

    fn render(&self) -> SvgNode {
        let mut rect = svg_element::Rectangle::new()
            .set("x", round3(self.frame.min_x()))
            .set("y", round3(self.frame.min_y()))
            .set("width", round3(self.frame.width()))
            .set("height", round3(self.frame.height()));
        if self.props.radius > 0.0 {
            rect = rect.set("rx", round3(self.props.radius));
        }
        self.decoration.render(rect)
    }
}
