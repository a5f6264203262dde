//! Planar point type in canvas units.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A point (or displacement vector) on the canvas plane.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Origin.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Create a new point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians from +X.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length when used as a vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle of this vector (radians, CCW from +X).
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Angle from this point to another (radians, CCW from +X)
    #[inline]
    pub fn angle_to(&self, other: &Point2D) -> f64 {
        (*other - *self).angle()
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(&self, other: &Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    #[inline]
    pub fn normalize(&self) -> Point2D {
        let len = self.length();
        if len > 0.0 {
            Point2D::new(self.x / len, self.y / len)
        } else {
            Point2D::ZERO
        }
    }

    /// Counter-clockwise perpendicular (-y, x).
    #[inline]
    pub fn perp(&self) -> Point2D {
        Point2D::new(-self.y, self.x)
    }

    /// Rotate around `pivot` by `angle` radians (CCW).
    #[inline]
    pub fn rotate_about(&self, pivot: &Point2D, angle: f64) -> Point2D {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point2D::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }

    /// Midpoint between this point and another.
    #[inline]
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Check both coordinates are within `epsilon`.
    #[inline]
    pub fn approx_eq(&self, other: &Point2D, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Arithmetic mean of a point set, `None` when empty.
    pub fn mean<'a, I>(points: I) -> Option<Point2D>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut count = 0usize;
        let mut sum = Point2D::ZERO;
        for p in points {
            sum = sum + *p;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum * (1.0 / count as f64))
        }
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Point2D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Point2D::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point2D {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Point2D::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    #[inline]
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl From<kurbo::Point> for Point2D {
    #[inline]
    fn from(p: kurbo::Point) -> Self {
        Point2D::new(p.x, p.y)
    }
}

impl From<Point2D> for kurbo::Point {
    #[inline]
    fn from(p: Point2D) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}
