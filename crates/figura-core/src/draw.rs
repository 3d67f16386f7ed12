//! Visual elements and their SVG serialization.
//!
//! Every visual element implements [`Element`]: it knows its own bounding
//! box and how to serialize itself (and its children) to an SVG node.
//! Elements validate their geometry when they are constructed, so an
//! element that exists can always be rendered.
//!
//! # Overview
//!
//! - Shapes: [`Circle`], [`Ellipse`], [`Rectangle`], [`Polygon`]
//! - Connectors: [`Line`], [`Polyline`], [`Arc`]
//! - [`Text`] blocks and [`Group`]s of other elements
//! - [`Style`] and [`Transform`]: optional presentation shared by all elements
//! - [`Decorated`]: builder methods for styling and attaching children
//!
//! # Example
//!
//! ```
//! # use figura_core::draw::{Circle, CircleProps, Decorated, Element, Label};
//! # use figura_core::geometry::Point;
//! # use figura_core::color::ColorToken;
//! # use figura_core::text::TextMetrics;
//! # fn main() -> Result<(), figura_core::Error> {
//! let metrics = TextMetrics::default();
//! let node = Circle::new(CircleProps::new(Point::new(50.0, 50.0), 20.0))?
//!     .with_color(ColorToken::Blue)
//!     .text(Label::new("A", &metrics));
//!
//! assert_eq!(node.bounds().width(), 40.0);
//! assert!(node.render().to_string().contains("circle"));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use svg::node::element as svg_element;

use crate::{
    color::ColorToken,
    error::Result,
    geometry::{Bounds, Point},
};

mod arc;
mod circle;
mod ellipse;
mod group;
mod line;
mod marker;
mod polygon;
mod rectangle;
mod style;
mod text;

pub use arc::{Arc, ArcProps, ellipse_perimeter};
pub use circle::{Circle, CircleProps};
pub use ellipse::{Ellipse, EllipseProps};
pub use group::Group;
pub use line::{Line, LineProps, Stroke, dash_pattern};
pub use marker::{Marker, MarkerKind, MarkerSet, marker_definitions};
pub use polygon::{Polygon, PolygonProps, Polyline, PolylineProps};
pub use rectangle::{Rectangle, RectangleProps};
pub use style::{Style, Transform};
pub use text::{Label, Text, TextProps, align_for_offset};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Default stroke width, in user units, shared by elements and documents.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// A node of the diagram tree.
pub trait Element: fmt::Debug {
    /// Bounding box of the element and all of its children, with the
    /// element's transform applied.
    fn bounds(&self) -> Bounds;

    /// Serializes the element and its children to an SVG node.
    fn render(&self) -> SvgNode;

    /// Point on the element's outline in the direction of `target`, pushed
    /// `offset` further outward.
    ///
    /// The default treats the element as its bounding rectangle. Round
    /// shapes override this to meet their true outline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`](crate::Error::DegenerateVector)
    /// if `target` coincides with the element's center.
    fn point_towards(&self, target: Point, offset: f32) -> Result<Point> {
        self.bounds().point_towards(target, offset)
    }
}

impl Element for Box<dyn Element> {
    fn bounds(&self) -> Bounds {
        self.as_ref().bounds()
    }

    fn render(&self) -> SvgNode {
        self.as_ref().render()
    }

    fn point_towards(&self, target: Point, offset: f32) -> Result<Point> {
        self.as_ref().point_towards(target, offset)
    }
}

/// Presentation and children shared by every element.
#[derive(Debug, Default)]
pub struct Decoration {
    style: Style,
    children: Vec<Box<dyn Element>>,
}

impl Decoration {
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    /// Wraps the element's own SVG node with its children and style.
    ///
    /// An element without children renders as the bare node. Otherwise the
    /// node and the children are grouped, and the style moves to the group
    /// so the children share the element's color and transform.
    fn render<N: svg::Node>(&self, node: N) -> SvgNode {
        if self.children.is_empty() {
            return Box::new(self.style.apply(node));
        }

        let mut group = svg_element::Group::new().add(node);
        for child in &self.children {
            group = group.add(child.render());
        }
        Box::new(self.style.apply(group))
    }

    /// Combines the element's own bounds with its children's and applies
    /// the transform.
    fn bounds(&self, own: Bounds) -> Bounds {
        let bounds = self
            .children
            .iter()
            .fold(own, |acc, child| acc.encompass(child.bounds()));
        self.style.transform_bounds(bounds)
    }
}

/// Builder methods for styling an element and attaching children.
pub trait Decorated: Sized {
    fn decoration(&self) -> &Decoration;

    fn decoration_mut(&mut self) -> &mut Decoration;

    /// The element's color token, if any.
    fn color(&self) -> Option<ColorToken> {
        self.decoration().style.color()
    }

    fn with_color(mut self, color: ColorToken) -> Self {
        self.decoration_mut().style.set_color(Some(color));
        self
    }

    fn with_class(mut self, class: impl Into<String>) -> Self {
        self.decoration_mut().style.add_class(class);
        self
    }

    fn with_id(mut self, id: impl Into<String>) -> Self {
        self.decoration_mut().style.set_id(Some(id.into()));
        self
    }

    fn with_transform(mut self, transform: Transform) -> Self {
        self.decoration_mut().style.set_transform(Some(transform));
        self
    }

    fn with_style(mut self, style: Style) -> Self {
        self.decoration_mut().style = style;
        self
    }

    /// Attaches a child element.
    fn add(mut self, child: impl Element + 'static) -> Self {
        self.decoration_mut().children.push(Box::new(child));
        self
    }
}

/// Implements [`Decorated`] for an element type with a `decoration` field.
macro_rules! impl_decorated {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::draw::Decorated for $ty {
                fn decoration(&self) -> &$crate::draw::Decoration {
                    &self.decoration
                }

                fn decoration_mut(&mut self) -> &mut $crate::draw::Decoration {
                    &mut self.decoration
                }
            }
        )+
    };
}

impl_decorated!(
    Arc, Circle, Ellipse, Group, Line, Polygon, Polyline, Rectangle, Text,
);
