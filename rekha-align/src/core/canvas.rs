//! Canvas bounds that every scan line is clipped to.

use serde::{Deserialize, Serialize};

use super::math::GEOM_EPSILON;
use super::point::Point2D;

/// Axis-aligned drawing area `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in canvas units
    pub width: f64,
    /// Height in canvas units
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Canvas {
    /// Create a canvas of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Point2D {
        Point2D::new(self.width * 0.5, self.height * 0.5)
    }

    /// The four corners, counter-clockwise from the origin.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(0.0, 0.0),
            Point2D::new(self.width, 0.0),
            Point2D::new(self.width, self.height),
            Point2D::new(0.0, self.height),
        ]
    }

    /// Whether a point lies inside or on the border.
    #[inline]
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= -GEOM_EPSILON
            && p.y >= -GEOM_EPSILON
            && p.x <= self.width + GEOM_EPSILON
            && p.y <= self.height + GEOM_EPSILON
    }

    /// Nearest point inside or on the border.
    #[inline]
    pub fn clamp(&self, p: Point2D) -> Point2D {
        Point2D::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Clip the infinite line `origin + t * direction` to the canvas.
    ///
    /// Returns the parameter range `(t0, t1)` with `t0 < t1`, or `None` if
    /// the line misses the canvas or only touches a corner.
    pub fn clip_line(&self, origin: Point2D, direction: Point2D) -> Option<(f64, f64)> {
        let mut t0 = f64::NEG_INFINITY;
        let mut t1 = f64::INFINITY;

        // Liang-Barsky against the four slabs
        let slabs = [
            (-direction.x, origin.x),
            (direction.x, self.width - origin.x),
            (-direction.y, origin.y),
            (direction.y, self.height - origin.y),
        ];
        for (p, q) in slabs {
            if p.abs() < GEOM_EPSILON {
                if q < -GEOM_EPSILON {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }

        let len = direction.length();
        if t1 - t0 <= GEOM_EPSILON / len.max(GEOM_EPSILON) || !t0.is_finite() || !t1.is_finite() {
            return None;
        }
        Some((t0, t1))
    }
}
