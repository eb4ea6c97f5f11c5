//! Geometry value types shared across pixel and normalized space.
//!
//! A single set of `f64` types serves both coordinate spaces; the
//! [`crate::mapping::CanvasMapping`] method names carry the space semantics.
//! The y axis grows downward (screen convention) in both spaces.

use std::f64::consts::{PI, TAU};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Clamps both coordinates into `[min, max]`.
    pub fn clamped(&self, min: f64, max: f64) -> Point {
        Point::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }

    /// Rotates this point about `center` by `angle` radians.
    ///
    /// Positive angles rotate counterclockwise in the mathematical sense;
    /// with y growing downward this appears clockwise on screen.
    pub fn rotated_about(&self, center: Point, angle: f64) -> Point {
        if angle.abs() < 1e-12 {
            return *self;
        }
        let (sin_a, cos_a) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(
            center.x + dx * cos_a + dy * sin_a,
            center.y + dy * cos_a - dx * sin_a,
        )
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the size with non-negative components.
    pub fn abs(&self) -> Size {
        Size::new(self.width.abs(), self.height.abs())
    }
}

impl Add for Size {
    type Output = Size;
    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Mul<f64> for Size {
    type Output = Size;
    fn mul(self, rhs: f64) -> Size {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

/// An axis-aligned rectangle described by origin (top-left) and size.
///
/// Committed rectangles always carry a non-negative size; transient drag
/// math may produce negative spans which are resolved through
/// [`Rect::from_corners`] before commit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Creates a rectangle from origin coordinates and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates a rectangle spanning two arbitrary corners, normalizing so
    /// the resulting size is non-negative.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Creates a rectangle from its center point and size.
    pub fn from_center_and_size(center: Point, size: Size) -> Self {
        Self {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn top_left(&self) -> Point {
        self.origin
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Returns the rectangle translated by `delta`.
    pub fn translated(&self, delta: Point) -> Rect {
        Rect {
            origin: self.origin + delta,
            size: self.size,
        }
    }

    /// Whether the point lies inside the rectangle (inclusive edges).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Whether this rectangle intersects another.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }
}

/// Normalizes an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

/// Angle of a vector under the screen convention.
///
/// Screen y grows downward, so the vertical component is negated: the
/// result is `atan2(-dy, dx)` normalized into `[0, 2π)`. Angle 0 points
/// right along +x; angles increase counterclockwise on screen.
pub fn vector_angle(v: Point) -> f64 {
    normalize_angle((-v.y).atan2(v.x))
}

/// Unit vector for an angle under the same screen convention as
/// [`vector_angle`]: `(cos a, -sin a)`.
pub fn ray_direction(angle: f64) -> Point {
    Point::new(angle.cos(), -angle.sin())
}

/// Whether `angle` lies within the arc `[start, end)`, handling
/// wraparound when `end < start`.
pub fn angle_in_arc(angle: f64, start: f64, end: f64) -> bool {
    let a = normalize_angle(angle);
    let s = normalize_angle(start);
    let e = normalize_angle(end);
    if (s - e).abs() < 1e-12 {
        // zero-width arc matches only its own ray
        return (a - s).abs() < 1e-12;
    }
    if s <= e {
        a >= s && a < e
    } else {
        a >= s || a < e
    }
}

/// Snaps an angle to the nearest multiple of 45 degrees.
pub fn snap_angle_to_eighth(angle: f64) -> f64 {
    let step = PI / 4.0;
    (angle / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_corners_normalizes_negative_spans() {
        let r = Rect::from_corners(Point::new(0.8, 0.2), Point::new(0.3, 0.6));
        assert_eq!(r.origin, Point::new(0.3, 0.2));
        assert_eq!(r.size, Size::new(0.5, 0.4));
    }

    #[test]
    fn rect_center_round_trips_with_from_center_and_size() {
        let r = Rect::from_center_and_size(Point::new(0.4, 0.3), Size::new(0.2, 0.6));
        assert!((r.center().x - 0.4).abs() < 1e-12);
        assert!((r.center().y - 0.3).abs() < 1e-12);
        assert_eq!(r.origin, Point::new(0.3, 0.0));
    }

    #[test]
    fn vector_angle_uses_negated_vertical_axis() {
        // straight up on screen is -y, which is 90 degrees
        let up = vector_angle(Point::new(0.0, -1.0));
        assert!((up - PI / 2.0).abs() < 1e-12);
        let right = vector_angle(Point::new(1.0, 0.0));
        assert!(right.abs() < 1e-12);
        // ray_direction is the inverse
        let d = ray_direction(PI / 2.0);
        assert!(d.x.abs() < 1e-12);
        assert!((d.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn angle_arc_handles_wraparound() {
        let start = 7.0 * PI / 4.0;
        let end = PI / 4.0;
        assert!(angle_in_arc(0.0, start, end));
        assert!(angle_in_arc(7.5 * PI / 4.0, start, end));
        assert!(!angle_in_arc(PI, start, end));
    }

    #[test]
    fn snap_angle_rounds_to_nearest_ray() {
        assert!((snap_angle_to_eighth(0.1) - 0.0).abs() < 1e-12);
        assert!((snap_angle_to_eighth(PI / 4.0 + 0.1) - PI / 4.0).abs() < 1e-12);
        assert!((snap_angle_to_eighth(1.5) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_about_center_preserves_distance() {
        let c = Point::new(0.5, 0.5);
        let p = Point::new(0.9, 0.5);
        let q = p.rotated_about(c, PI / 3.0);
        assert!((q.distance_to(c) - 0.4).abs() < 1e-12);
    }
}
