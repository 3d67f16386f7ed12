//! Geometric primitives for diagram construction.
//!
//! This module provides the value types every diagram element is built
//! from:
//!
//! - [`Point`] - A 2D coordinate, also used as a free vector
//! - [`Size`] - Width and height of an element
//! - [`Side`] - One of the four named sides of a box
//! - [`Bounds`] - An axis-aligned bounding box with validated corners
//!
//! # Coordinate System
//!
//! Figura uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are in degrees and grow clockwise on screen, so an angle of `90`
//! points down.
//!
//! All types are `Copy` and every operation returns a new value.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Rounds a coordinate to three decimal places.
///
/// Serialized SVG goes through this so that floating-point noise does not
/// produce spurious differences between otherwise identical documents.
/// Negative zero is normalized to zero.
pub fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0 + 0.0
}

/// A 2D point in diagram space.
///
/// Points double as vectors: the difference of two points is the vector
/// between them, and the vector operations ([`Point::normalize`],
/// [`Point::rotate`], [`Point::length`]) treat the point as an offset from
/// the origin.
///
/// # Examples
///
/// ```
/// # use figura_core::geometry::{Point, Side};
/// let origin = Point::new(10.0, 20.0);
/// let moved = origin.translate(Side::Right, 5.0);
/// assert_eq!(moved, Point::new(15.0, 20.0));
/// assert_eq!(moved.distance_to(origin), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point at `distance` from `origin` in the direction of
    /// `angle` (degrees, clockwise from the positive x-axis).
    ///
    /// ```
    /// # use figura_core::geometry::Point;
    /// let p = Point::polar(Point::new(0.0, 0.0), 10.0, 90.0);
    /// assert!((p.x()).abs() < 1e-4);
    /// assert!((p.y() - 10.0).abs() < 1e-4);
    /// ```
    pub fn polar(origin: Point, distance: f32, angle: f32) -> Self {
        let radians = angle.to_radians();
        Self {
            x: distance.mul_add(radians.cos(), origin.x),
            y: distance.mul_add(radians.sin(), origin.y),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Component-wise minimum
    pub fn min(self, other: Point) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum
    pub fn max(self, other: Point) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Divides both coordinates by the given divisor.
    pub fn divide(self, divisor: f32) -> Self {
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Point, t: f32) -> Self {
        self.add_point(other.sub_point(self).scale(t))
    }

    /// Euclidean length of the vector from the origin to this point
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        self.sub_point(other).length()
    }

    /// Dot product of two vectors
    pub fn dot(self, other: Point) -> f32 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Z-component of the cross product of two vectors.
    ///
    /// Positive when `other` is clockwise from `self` on screen.
    pub fn cross(self, other: Point) -> f32 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }

    /// Scales this vector to the given length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`] for a zero-length vector.
    pub fn normalize(self, length: f32) -> Result<Self> {
        let current = self.length();
        if current == 0.0 || !current.is_finite() {
            return Err(Error::DegenerateVector);
        }
        Ok(self.scale(length / current))
    }

    /// Rotates this vector as if it pointed towards [`Side::Top`] and had
    /// to be turned to face `side`.
    ///
    /// Rotating a direction of travel by [`Side::Left`] yields the vector
    /// pointing to the left of that travel, which is how labels are pushed
    /// off a connector consistently.
    ///
    /// ```
    /// # use figura_core::geometry::{Point, Side};
    /// let east = Point::new(1.0, 0.0);
    /// assert_eq!(east.rotate(Side::Left), Point::new(0.0, -1.0));
    /// assert_eq!(east.rotate(Side::Right), Point::new(0.0, 1.0));
    /// assert_eq!(east.rotate(Side::Bottom), Point::new(-1.0, 0.0));
    /// ```
    pub fn rotate(self, side: Side) -> Self {
        match side {
            Side::Top => self,
            Side::Right => Self::new(-self.y, self.x),
            Side::Bottom => Self::new(-self.x, -self.y),
            Side::Left => Self::new(self.y, -self.x),
        }
    }

    /// Rotates this point around `origin` by `degrees` (clockwise on screen).
    pub fn rotate_around(self, origin: Point, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let v = self.sub_point(origin);
        Self::new(
            v.x.mul_add(cos, -(v.y * sin)) + origin.x,
            v.x.mul_add(sin, v.y * cos) + origin.y,
        )
    }

    /// Moves this point `length` units outward in the direction of `side`.
    pub fn translate(self, side: Side, length: f32) -> Self {
        self.add_point(side.direction().scale(length))
    }

    /// Rounds both coordinates to three decimal places.
    pub fn rounded(self) -> Self {
        Self {
            x: round3(self.x),
            y: round3(self.y),
        }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.add_point(rhs)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.sub_point(rhs)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grows both dimensions by `amount` on every side.
    pub fn pad(self, amount: f32) -> Self {
        Self {
            width: amount.mul_add(2.0, self.width),
            height: amount.mul_add(2.0, self.height),
        }
    }

    /// The size as a vector from the origin
    pub fn to_point(self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// One of the four sides of an axis-aligned box.
///
/// Sides also serve as the four named directions: [`Side::direction`]
/// returns the outward unit vector of the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The side facing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Unit vector pointing outward from this side.
    pub fn direction(self) -> Point {
        match self {
            Self::Top => Point::new(0.0, -1.0),
            Self::Right => Point::new(1.0, 0.0),
            Self::Bottom => Point::new(0.0, 1.0),
            Self::Left => Point::new(-1.0, 0.0),
        }
    }

    /// Whether the outward direction of this side is horizontal.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            _ => Err(format!(
                "invalid side `{s}`, valid values: top, right, bottom, left"
            )),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An axis-aligned bounding box.
///
/// The top-left corner never lies right of or below the bottom-right
/// corner; the fallible constructors enforce this and every operation
/// preserves it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    top_left: Point,
    bottom_right: Point,
}

impl Bounds {
    /// Creates bounds from two corners.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBox`] if `top_left` lies right of or below
    /// `bottom_right`.
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return Err(Error::InvalidBox {
                top_left,
                bottom_right,
            });
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Creates bounds from a top-left corner and a size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBox`] for a negative width or height.
    pub fn from_top_left(top_left: Point, size: Size) -> Result<Self> {
        Self::new(top_left, top_left.add_point(size.to_point()))
    }

    /// Creates bounds centered on `center` extending `half` in each axis.
    /// Negative half extents are treated as their absolute value.
    pub fn from_center(center: Point, half: Point) -> Self {
        let half = half.abs();
        Self {
            top_left: center.sub_point(half),
            bottom_right: center.add_point(half),
        }
    }

    /// Smallest bounds containing all `points`, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (top_left, bottom_right) = points.fold((first, first), |(min, max), p| {
            (min.min(p), max.max(p))
        });
        Some(Self {
            top_left,
            bottom_right,
        })
    }

    /// Returns the top-left corner
    pub fn top_left(self) -> Point {
        self.top_left
    }

    /// Returns the bottom-right corner
    pub fn bottom_right(self) -> Point {
        self.bottom_right
    }

    pub fn min_x(self) -> f32 {
        self.top_left.x
    }

    pub fn min_y(self) -> f32 {
        self.top_left.y
    }

    pub fn max_x(self) -> f32 {
        self.bottom_right.x
    }

    pub fn max_y(self) -> f32 {
        self.bottom_right.y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    /// Returns the size of the bounds
    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        self.top_left.midpoint(self.bottom_right)
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(self) -> [Point; 4] {
        [
            self.top_left,
            Point::new(self.bottom_right.x, self.top_left.y),
            self.bottom_right,
            Point::new(self.top_left.x, self.bottom_right.y),
        ]
    }

    /// Smallest bounds containing both `self` and `other`.
    ///
    /// The operation is associative, commutative and idempotent, so a
    /// document's bounds can be folded from its children in any order.
    ///
    /// ```
    /// # use figura_core::geometry::{Bounds, Point};
    /// let a = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
    /// let b = Bounds::new(Point::new(5.0, -5.0), Point::new(20.0, 5.0)).unwrap();
    /// let both = a.encompass(b);
    /// assert_eq!(both.top_left(), Point::new(0.0, -5.0));
    /// assert_eq!(both.bottom_right(), Point::new(20.0, 10.0));
    /// ```
    pub fn encompass(self, other: Bounds) -> Self {
        Self {
            top_left: self.top_left.min(other.top_left),
            bottom_right: self.bottom_right.max(other.bottom_right),
        }
    }

    /// Grows the bounds by `amount` on every side.
    ///
    /// A negative amount shrinks the bounds, collapsing onto the center line
    /// rather than inverting the corners.
    pub fn margin(self, amount: f32) -> Self {
        let center = self.center();
        let top_left = self.top_left.sub_point(Point::new(amount, amount));
        let bottom_right = self.bottom_right.add_point(Point::new(amount, amount));
        Self {
            top_left: top_left.min(center),
            bottom_right: bottom_right.max(center),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            top_left: self.top_left.add_point(offset),
            bottom_right: self.bottom_right.add_point(offset),
        }
    }

    /// Whether `point` lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    /// Whether `other` lies completely inside these bounds.
    pub fn contains_bounds(self, other: Bounds) -> bool {
        self.contains(other.top_left) && self.contains(other.bottom_right)
    }

    /// Midpoint of `side`, pushed outward by `offset`.
    ///
    /// This is the default attachment point for connectors. Callers usually
    /// pass half the stroke width so that a line stops at the visible edge
    /// of a stroked shape rather than at its mathematical boundary.
    ///
    /// ```
    /// # use figura_core::geometry::{Bounds, Point, Side};
    /// let b = Bounds::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0)).unwrap();
    /// assert_eq!(b.point_at(Side::Right, 1.0), Point::new(101.0, 25.0));
    /// assert_eq!(b.point_at(Side::Top, 0.0), Point::new(50.0, 0.0));
    /// ```
    pub fn point_at(self, side: Side, offset: f32) -> Point {
        let center = self.center();
        let anchor = match side {
            Side::Top => center.with_y(self.top_left.y),
            Side::Right => center.with_x(self.bottom_right.x),
            Side::Bottom => center.with_y(self.bottom_right.y),
            Side::Left => center.with_x(self.top_left.x),
        };
        anchor.translate(side, offset)
    }

    /// Point where the ray from the center towards `target` leaves the
    /// bounds, pushed `offset` further along the ray.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`] if `target` is the center.
    pub fn point_towards(self, target: Point, offset: f32) -> Result<Point> {
        let center = self.center();
        let direction = target.sub_point(center).normalize(1.0)?;
        let half = self.size().to_point().scale(0.5);

        // Distance along the ray to the nearest vertical and horizontal edge
        let tx = if direction.x == 0.0 {
            f32::INFINITY
        } else {
            half.x / direction.x.abs()
        };
        let ty = if direction.y == 0.0 {
            f32::INFINITY
        } else {
            half.y / direction.y.abs()
        };

        let t = tx.min(ty);
        Ok(center.add_point(direction.scale(t + offset)))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn bounds(x1: f32, y1: f32, x2: f32, y2: f32) -> Bounds {
        Bounds::new(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0001), 0.0);
        assert!(round3(-0.0001).is_sign_positive());
        assert_eq!(round3(10.0), 10.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, -4.0);
        assert_eq!(p1 + p2, Point::new(4.0, -2.0));
        assert_eq!(p1 - p2, Point::new(-2.0, 6.0));
        assert_eq!(p1.min(p2), Point::new(1.0, -4.0));
        assert_eq!(p1.max(p2), Point::new(3.0, 2.0));
        assert_eq!(p1.scale(2.0), Point::new(2.0, 4.0));
        assert_eq!(p1.divide(2.0), Point::new(0.5, 1.0));
    }

    #[test]
    fn test_point_length_and_distance() {
        assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance_to(Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_point_normalize() {
        let v = Point::new(3.0, 4.0).normalize(10.0).unwrap();
        assert_approx_eq!(f32, v.x(), 6.0);
        assert_approx_eq!(f32, v.y(), 8.0);
    }

    #[test]
    fn test_point_normalize_zero_vector_fails() {
        assert_eq!(
            Point::default().normalize(1.0),
            Err(Error::DegenerateVector)
        );
    }

    #[test]
    fn test_point_rotate_all_sides() {
        let up = Point::new(0.0, -1.0);
        assert_eq!(up.rotate(Side::Top), Side::Top.direction());
        assert_eq!(up.rotate(Side::Right), Side::Right.direction());
        assert_eq!(up.rotate(Side::Bottom), Side::Bottom.direction());
        assert_eq!(up.rotate(Side::Left), Side::Left.direction());
    }

    #[test]
    fn test_point_polar() {
        let p = Point::polar(Point::new(1.0, 1.0), 2.0, 0.0);
        assert_approx_eq!(f32, p.x(), 3.0);
        assert_approx_eq!(f32, p.y(), 1.0);

        let p = Point::polar(Point::new(0.0, 0.0), 2.0, 180.0);
        assert_approx_eq!(f32, p.x(), -2.0, epsilon = 1e-5);
        assert_approx_eq!(f32, p.y(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_rotate_around() {
        let p = Point::new(2.0, 0.0).rotate_around(Point::new(1.0, 0.0), 90.0);
        assert_approx_eq!(f32, p.x(), 1.0, epsilon = 1e-5);
        assert_approx_eq!(f32, p.y(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_cross_sign_is_clockwise() {
        let east = Point::new(1.0, 0.0);
        let south = Point::new(0.0, 1.0);
        assert!(east.cross(south) > 0.0);
        assert!(south.cross(east) < 0.0);
    }

    #[test]
    fn test_side_opposite_and_parse() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.to_string().parse::<Side>(), Ok(side));
        }
        assert!("middle".parse::<Side>().is_err());
        assert!(Side::Left.is_horizontal());
        assert!(!Side::Top.is_horizontal());
    }

    #[test]
    fn test_bounds_rejects_inverted_corners() {
        let result = Bounds::new(Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        assert!(matches!(result, Err(Error::InvalidBox { .. })));

        let result = Bounds::from_top_left(Point::new(0.0, 0.0), Size::new(5.0, -1.0));
        assert!(matches!(result, Err(Error::InvalidBox { .. })));
    }

    #[test]
    fn test_bounds_zero_size_is_valid() {
        let b = bounds(3.0, 3.0, 3.0, 3.0);
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.center(), Point::new(3.0, 3.0));
    }

    #[test]
    fn test_bounds_size_and_center() {
        let b = bounds(10.0, 20.0, 40.0, 60.0);
        assert_eq!(b.size(), Size::new(30.0, 40.0));
        assert_eq!(b.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_bounds_from_points() {
        let b = Bounds::from_points([
            Point::new(5.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(b, bounds(-2.0, -1.0, 5.0, 4.0));
        assert!(Bounds::from_points([]).is_none());
    }

    #[test]
    fn test_bounds_margin() {
        let b = bounds(0.0, 0.0, 10.0, 10.0).margin(2.0);
        assert_eq!(b, bounds(-2.0, -2.0, 12.0, 12.0));

        let collapsed = bounds(0.0, 0.0, 10.0, 4.0).margin(-3.0);
        assert_eq!(collapsed, bounds(3.0, 2.0, 7.0, 2.0));
    }

    #[test]
    fn test_bounds_point_at_every_side() {
        let b = bounds(0.0, 0.0, 100.0, 40.0);
        assert_eq!(b.point_at(Side::Top, 1.0), Point::new(50.0, -1.0));
        assert_eq!(b.point_at(Side::Right, 1.0), Point::new(101.0, 20.0));
        assert_eq!(b.point_at(Side::Bottom, 1.0), Point::new(50.0, 41.0));
        assert_eq!(b.point_at(Side::Left, 1.0), Point::new(-1.0, 20.0));
    }

    #[test]
    fn test_bounds_point_towards() {
        let b = bounds(80.0, 80.0, 120.0, 120.0);
        let p = b.point_towards(Point::new(200.0, 100.0), 0.0).unwrap();
        assert_approx_eq!(f32, p.x(), 120.0);
        assert_approx_eq!(f32, p.y(), 100.0);

        let p = b.point_towards(Point::new(200.0, 200.0), 0.0).unwrap();
        assert_approx_eq!(f32, p.x(), 120.0, epsilon = 1e-4);
        assert_approx_eq!(f32, p.y(), 120.0, epsilon = 1e-4);

        assert_eq!(
            b.point_towards(b.center(), 0.0),
            Err(Error::DegenerateVector)
        );
    }

    #[test]
    fn test_bounds_contains() {
        let outer = bounds(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(Point::new(10.0, 0.0)));
        assert!(!outer.contains(Point::new(10.1, 0.0)));
        assert!(outer.contains_bounds(bounds(1.0, 1.0, 9.0, 9.0)));
        assert!(!outer.contains_bounds(bounds(1.0, 1.0, 11.0, 9.0)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| {
                Bounds::from_top_left(Point::new(x, y), Size::new(w, h))
                    .expect("non-negative size")
            })
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop::sample::select(Side::ALL.to_vec())
    }

    fn length_strategy() -> impl Strategy<Value = f32> {
        0.01f32..1000.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// encompass(b).encompass(a) equals encompass(b): the union is idempotent.
    fn check_encompass_is_idempotent(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let once = a.encompass(b);
        prop_assert_eq!(once.encompass(a), once);
        Ok(())
    }

    /// Union should not depend on argument order.
    fn check_encompass_is_commutative(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.encompass(b), b.encompass(a));
        Ok(())
    }

    /// Union should not depend on grouping.
    fn check_encompass_is_associative(
        a: Bounds,
        b: Bounds,
        c: Bounds,
    ) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.encompass(b).encompass(c), a.encompass(b.encompass(c)));
        Ok(())
    }

    /// The union contains both inputs.
    fn check_encompass_contains_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let union = a.encompass(b);
        prop_assert!(union.contains_bounds(a));
        prop_assert!(union.contains_bounds(b));
        Ok(())
    }

    /// Translating a point by a side and length moves it exactly that far.
    fn check_translate_distance(p: Point, side: Side, length: f32) -> Result<(), TestCaseError> {
        let moved = p.translate(side, length);
        prop_assert!(approx_eq!(
            f32,
            moved.distance_to(p),
            length,
            epsilon = length * 1e-4 + 1e-3
        ));
        Ok(())
    }

    /// A normalized non-zero vector has the requested length.
    fn check_normalize_length(p: Point, length: f32) -> Result<(), TestCaseError> {
        prop_assume!(p.length() > 1e-3);
        let normalized = p.normalize(length)?;
        prop_assert!(approx_eq!(
            f32,
            normalized.length(),
            length,
            epsilon = length * 1e-4
        ));
        Ok(())
    }

    /// Rotation by any side preserves vector length.
    fn check_rotate_preserves_length(p: Point, side: Side) -> Result<(), TestCaseError> {
        prop_assert!(approx_eq!(f32, p.rotate(side).length(), p.length()));
        Ok(())
    }

    /// Margins never produce inverted bounds.
    fn check_margin_keeps_invariant(b: Bounds, amount: f32) -> Result<(), TestCaseError> {
        let m = b.margin(amount);
        prop_assert!(Bounds::new(m.top_left(), m.bottom_right()).is_ok());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn encompass_is_idempotent(a in bounds_strategy(), b in bounds_strategy()) {
            check_encompass_is_idempotent(a, b)?;
        }

        #[test]
        fn encompass_is_commutative(a in bounds_strategy(), b in bounds_strategy()) {
            check_encompass_is_commutative(a, b)?;
        }

        #[test]
        fn encompass_is_associative(a in bounds_strategy(), b in bounds_strategy(), c in bounds_strategy()) {
            check_encompass_is_associative(a, b, c)?;
        }

        #[test]
        fn encompass_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            check_encompass_contains_both(a, b)?;
        }

        #[test]
        fn translate_distance(p in point_strategy(), side in side_strategy(), length in length_strategy()) {
            check_translate_distance(p, side, length)?;
        }

        #[test]
        fn normalize_length(p in point_strategy(), length in length_strategy()) {
            check_normalize_length(p, length)?;
        }

        #[test]
        fn rotate_preserves_length(p in point_strategy(), side in side_strategy()) {
            check_rotate_preserves_length(p, side)?;
        }

        #[test]
        fn margin_keeps_invariant(b in bounds_strategy(), amount in -300.0f32..300.0) {
            check_margin_keeps_invariant(b, amount)?;
        }
    }
}
