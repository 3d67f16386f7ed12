//! Optional presentation attributes shared by all elements.

use std::fmt;

use crate::{
    color::ColorToken,
    geometry::{Bounds, Point, round3},
};

/// A geometric transform applied to an element and its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(Point),
    /// Clockwise rotation in degrees around `origin`.
    Rotate { degrees: f32, origin: Point },
    /// Uniform scaling around the origin of the coordinate system.
    Scale(f32),
}

impl Transform {
    /// Maps a point through the transform.
    pub fn apply(self, point: Point) -> Point {
        match self {
            Self::Translate(offset) => point.add_point(offset),
            Self::Rotate { degrees, origin } => point.rotate_around(origin, degrees),
            Self::Scale(factor) => point.scale(factor),
        }
    }

    /// Axis-aligned envelope of `bounds` after the transform.
    pub fn apply_bounds(self, bounds: Bounds) -> Bounds {
        Bounds::from_points(bounds.corners().map(|corner| self.apply(corner)))
            .unwrap_or(bounds)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate(offset) => {
                write!(f, "translate({} {})", round3(offset.x()), round3(offset.y()))
            }
            Self::Rotate { degrees, origin } => write!(
                f,
                "rotate({} {} {})",
                round3(*degrees),
                round3(origin.x()),
                round3(origin.y())
            ),
            Self::Scale(factor) => write!(f, "scale({})", round3(*factor)),
        }
    }
}

/// Color token, CSS classes, id and transform of an element.
///
/// All fields are optional. Colors are emitted as CSS classes, never as
/// inline colors, so the document stylesheet (or the host page) decides
/// what a token looks like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    color: Option<ColorToken>,
    classes: Vec<String>,
    id: Option<String>,
    transform: Option<Transform>,
}

impl Style {
    pub fn color(&self) -> Option<ColorToken> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<ColorToken>) {
        self.color = color;
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Option<Transform>) {
        self.transform = transform;
    }

    /// Value of the `class` attribute: the color token first, then the
    /// extra classes in insertion order.
    pub fn class_attribute(&self) -> Option<String> {
        let names: Vec<&str> = self
            .color
            .map(ColorToken::class_name)
            .into_iter()
            .chain(self.classes.iter().map(String::as_str))
            .collect();
        (!names.is_empty()).then(|| names.join(" "))
    }

    /// Bounds after this style's transform, if any.
    pub fn transform_bounds(&self, bounds: Bounds) -> Bounds {
        match self.transform {
            Some(transform) => transform.apply_bounds(bounds),
            None => bounds,
        }
    }

    /// Writes the style's attributes onto an SVG node.
    pub(crate) fn apply<N: svg::Node>(&self, mut node: N) -> N {
        if let Some(class) = self.class_attribute() {
            node.assign("class", class);
        }
        if let Some(id) = &self.id {
            node.assign("id", id.as_str());
        }
        if let Some(transform) = self.transform {
            node.assign("transform", transform.to_string());
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_class_attribute_orders_color_first() {
        let mut style = Style::default();
        assert_eq!(style.class_attribute(), None);

        style.add_class("filled");
        style.set_color(Some(ColorToken::Green));
        assert_eq!(style.class_attribute().as_deref(), Some("green filled"));
    }

    #[test]
    fn test_transform_display() {
        assert_eq!(
            Transform::Translate(Point::new(1.5, -2.0)).to_string(),
            "translate(1.5 -2)"
        );
        let rotate = Transform::Rotate {
            degrees: 45.0,
            origin: Point::new(10.0, 20.0),
        };
        assert_eq!(rotate.to_string(), "rotate(45 10 20)");
        assert_eq!(Transform::Scale(2.0).to_string(), "scale(2)");
    }

    #[test]
    fn test_rotated_bounds_envelope() {
        let bounds = Bounds::new(Point::new(-10.0, -5.0), Point::new(10.0, 5.0)).unwrap();
        let rotated = Transform::Rotate {
            degrees: 90.0,
            origin: Point::default(),
        }
        .apply_bounds(bounds);
        assert_approx_eq!(f32, rotated.width(), 10.0, epsilon = 1e-4);
        assert_approx_eq!(f32, rotated.height(), 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_apply_writes_attributes() {
        let mut style = Style::default();
        style.set_color(Some(ColorToken::Red));
        style.set_id(Some("box-1".to_string()));
        style.set_transform(Some(Transform::Scale(0.5)));

        let node = style.apply(svg_element::Rectangle::new()).to_string();
        assert!(node.contains(r#"class="red""#));
        assert!(node.contains(r#"id="box-1""#));
        assert!(node.contains(r#"transform="scale(0.5)""#));
    }
}
