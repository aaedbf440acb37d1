//! Geometry primitives: [`Point`] and [`Aabb`].
//!
//! Map coordinates are continuous, so both types are built on `f64`. Only the
//! horizontal plane matters for routing; height is dropped at the input
//! boundary.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D map coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub fn shift(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// --- trait impls for Point ---

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// An axis-aligned box \[start, end). `start` is inclusive, `end` is exclusive.
///
/// The centre is computed once at construction since quadtree subdivision
/// reads it on every split.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "AabbCorners", into = "AabbCorners"))]
pub struct Aabb {
    start: Point,
    end: Point,
    center: Point,
}

impl Aabb {
    /// Create a box from two corners, canonicalized so that
    /// `start` ≤ `end` on each axis.
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        let start = Point::new(a.x.min(b.x), a.y.min(b.y));
        let end = Point::new(a.x.max(b.x), a.y.max(b.y));
        Self {
            start,
            end,
            center: (start + end) / 2.0,
        }
    }

    /// Create a square box with lower corner `start` and side length `size`.
    #[inline]
    pub fn square(start: Point, size: f64) -> Self {
        Self::new(start, start.shift(size, size))
    }

    /// Lower (inclusive) corner.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Upper (exclusive) corner.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Centre of the box.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Side length along the x axis (the side of a square box).
    #[inline]
    pub fn size(&self) -> f64 {
        self.end.x - self.start.x
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    /// Whether the box has zero area (no point can be contained).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.x >= self.end.x || self.start.y >= self.end.y
    }

    /// Whether `p` is inside the half-open box.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.start.x && p.x < self.end.x && p.y >= self.start.y && p.y < self.end.y
    }

    /// Whether the two boxes touch or overlap. Shared edges count.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.start.x <= other.end.x
            && self.end.x >= other.start.x
            && self.start.y <= other.end.y
            && self.end.y >= other.start.y
    }

    /// Split into four boxes at the centre, in NW, NE, SW, SE order.
    ///
    /// The quadrants tile `self` exactly: every point contained in `self`
    /// is contained in exactly one quadrant.
    pub fn quadrants(&self) -> [Aabb; 4] {
        let (s, c, e) = (self.start, self.center, self.end);
        [
            Aabb::new(s, c),
            Aabb::new(Point::new(c.x, s.y), Point::new(e.x, c.y)),
            Aabb::new(Point::new(s.x, c.y), Point::new(c.x, e.y)),
            Aabb::new(c, e),
        ]
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.start, self.end)
    }
}

/// Serialized shape of an [`Aabb`]: its two corners.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct AabbCorners {
    start: Point,
    end: Point,
}

#[cfg(feature = "serde")]
impl From<AabbCorners> for Aabb {
    fn from(c: AabbCorners) -> Self {
        Aabb::new(c.start, c.end)
    }
}

#[cfg(feature = "serde")]
impl From<Aabb> for AabbCorners {
    fn from(b: Aabb) -> Self {
        Self {
            start: b.start,
            end: b.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Point
    // -----------------------------------------------------------------------

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a + b, Point::new(4.0, 6.0));
        assert_eq!(b - a, Point::new(2.0, 2.0));
        assert_eq!(a * 3.0, Point::new(3.0, 6.0));
        assert_eq!(b / 2.0, Point::new(1.5, 2.0));
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn point_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn point_display() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }

    // -----------------------------------------------------------------------
    // Aabb
    // -----------------------------------------------------------------------

    #[test]
    fn square_box_derived_fields() {
        let b = Aabb::square(Point::new(-10.0, 20.0), 40.0);
        assert_eq!(b.start(), Point::new(-10.0, 20.0));
        assert_eq!(b.end(), Point::new(30.0, 60.0));
        assert_eq!(b.center(), Point::new(10.0, 40.0));
        assert_eq!(b.size(), 40.0);
    }

    #[test]
    fn box_auto_canonicalize() {
        let b = Aabb::new(Point::new(3.0, 2.0), Point::new(0.0, 0.0));
        assert_eq!(b.start(), Point::new(0.0, 0.0));
        assert_eq!(b.end(), Point::new(3.0, 2.0));
    }

    #[test]
    fn containment_is_half_open() {
        let b = Aabb::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(b.contains(b.start()));
        assert!(!b.contains(b.end()));
        assert!(b.contains(Point::new(9.999, 0.0)));
        assert!(!b.contains(Point::new(10.0, 5.0)));
        assert!(!b.contains(Point::new(5.0, 10.0)));
        assert!(!b.contains(Point::new(-0.001, 5.0)));
    }

    #[test]
    fn intersection_counts_shared_edges() {
        let a = Aabb::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let touching = Aabb::new(Point::new(10.0, 0.0), Point::new(20.0, 10.0));
        let overlapping = Aabb::new(Point::new(5.0, 5.0), Point::new(15.0, 15.0));
        let apart = Aabb::new(Point::new(11.0, 0.0), Point::new(20.0, 10.0));
        assert!(a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn quadrants_tile_parent() {
        let b = Aabb::new(Point::new(-8.0, 0.0), Point::new(8.0, 4.0));
        let q = b.quadrants();
        let area: f64 = q.iter().map(|c| c.width() * c.height()).sum();
        assert_eq!(area, b.width() * b.height());
        for p in [
            Point::new(-8.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(-8.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(7.9, 3.9),
            Point::new(-0.1, 1.9),
        ] {
            let hits = q.iter().filter(|c| c.contains(p)).count();
            assert_eq!(hits, 1, "{p} should be in exactly one quadrant");
        }
        assert_eq!(q[0].end(), b.center());
        assert_eq!(q[3].start(), b.center());
    }

    #[test]
    fn empty_box_contains_nothing() {
        let b = Aabb::square(Point::new(1.0, 1.0), 0.0);
        assert!(b.is_empty());
        assert!(!b.contains(Point::new(1.0, 1.0)));
    }

    #[test]
    fn box_display() {
        let b = Aabb::square(Point::new(0.0, 0.0), 2.0);
        assert_eq!(b.to_string(), "[(0, 0)-(2, 2))");
    }
}
