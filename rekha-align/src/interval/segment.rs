//! Directed scan-line interval and its segment geometry.

use serde::{Deserialize, Serialize};

use super::relation::AllenRelation;
use crate::core::{Canvas, GEOM_EPSILON, Point2D, RigidTransform};

/// Sine of the angle below which two directions count as parallel.
const PARALLEL_SIN_TOLERANCE: f64 = 1e-9;

/// Perpendicular distance below which a point counts as on a line.
const COLLINEAR_TOLERANCE: f64 = 1e-7;

/// A directed sub-segment of one scan line.
///
/// `line_id` is the 1-based index of the owning line within its scan.
/// Intervals are ordered `start → end` along the scan direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Owning scan line (1-based)
    pub line_id: usize,
    /// Start point
    pub start: Point2D,
    /// End point
    pub end: Point2D,
}

impl Interval {
    /// Create a new interval.
    #[inline]
    pub fn new(line_id: usize, start: Point2D, end: Point2D) -> Self {
        Self {
            line_id,
            start,
            end,
        }
    }

    /// Direction vector (end - start), not normalized.
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Segment length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Whether the interval has (numerically) zero length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length() <= GEOM_EPSILON
    }

    /// Direction angle in radians (-π, π].
    #[inline]
    pub fn angle(&self) -> f64 {
        self.direction().angle()
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Point2D {
        self.start.midpoint(&self.end)
    }

    /// Same interval with both endpoints transformed.
    #[inline]
    pub fn transformed(&self, transform: &RigidTransform) -> Self {
        Self::new(
            self.line_id,
            transform.apply(self.start),
            transform.apply(self.end),
        )
    }

    /// Extend the segment to its line's full intersection with the canvas.
    ///
    /// The result keeps this interval's line id and direction. Returns `None`
    /// when the line misses the canvas or the interval is degenerate.
    pub fn full_extent(&self, canvas: &Canvas) -> Option<Interval> {
        let (x1, y1) = (self.start.x, self.start.y);
        let (x2, y2) = (self.end.x, self.end.y);

        if (x1 - x2).abs() <= GEOM_EPSILON {
            if (y1 - y2).abs() <= GEOM_EPSILON || x1 < 0.0 || x1 > canvas.width {
                return None;
            }
            let (from, to) = if y2 >= y1 {
                (0.0, canvas.height)
            } else {
                (canvas.height, 0.0)
            };
            return Some(Interval::new(
                self.line_id,
                Point2D::new(x1, from),
                Point2D::new(x1, to),
            ));
        }

        let direction = self.direction();
        let (t0, t1) = canvas.clip_line(self.start, direction)?;
        Some(Interval::new(
            self.line_id,
            canvas.clamp(self.start + direction * t0),
            canvas.clamp(self.start + direction * t1),
        ))
    }

    /// Perpendicular distance from `point` to the infinite line through
    /// this interval.
    pub fn distance_to_parallel_line(&self, point: &Point2D) -> f64 {
        let d = self.direction();
        let len = d.length();
        if len <= GEOM_EPSILON {
            return self.start.distance(point);
        }
        (d.cross(&(*point - self.start)) / len).abs()
    }

    /// Closest point on the segment (projection clamped to the endpoints).
    pub fn closest_point(&self, point: &Point2D) -> Point2D {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq <= GEOM_EPSILON * GEOM_EPSILON {
            return self.start;
        }
        let t = (d.dot(&(*point - self.start)) / len_sq).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Whether two segments share at least one point.
    ///
    /// Touching endpoints and collinear overlap both count.
    pub fn intersects(&self, other: &Interval) -> bool {
        let r = self.direction();
        let s = other.direction();
        let qp = other.start - self.start;
        let r_len = r.length();
        let s_len = s.length();
        if r_len <= GEOM_EPSILON || s_len <= GEOM_EPSILON {
            let (point, segment) = if r_len <= GEOM_EPSILON {
                (self.start, other)
            } else {
                (other.start, self)
            };
            return segment.closest_point(&point).distance(&point) <= COLLINEAR_TOLERANCE;
        }

        let det = r.cross(&s);
        if (det / (r_len * s_len)).abs() <= PARALLEL_SIN_TOLERANCE {
            // Parallel: only collinear segments can meet
            if (r.cross(&qp) / r_len).abs() > COLLINEAR_TOLERANCE {
                return false;
            }
            let rr = r.dot(&r);
            let t0 = qp.dot(&r) / rr;
            let t1 = t0 + s.dot(&r) / rr;
            let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            let slack = COLLINEAR_TOLERANCE / r_len;
            return hi >= -slack && lo <= 1.0 + slack;
        }

        let t = qp.cross(&s) / det;
        let u = qp.cross(&r) / det;
        let t_slack = COLLINEAR_TOLERANCE / r_len;
        let u_slack = COLLINEAR_TOLERANCE / s_len;
        (-t_slack..=1.0 + t_slack).contains(&t) && (-u_slack..=1.0 + u_slack).contains(&u)
    }

    /// Proper crossing point of two segments.
    ///
    /// Returns `None` for parallel or collinear segments and when the
    /// crossing falls on an endpoint of either segment, so adjacent
    /// intervals that merely touch never register as a crossing.
    pub fn intersection_point(&self, other: &Interval) -> Option<Point2D> {
        let r = self.direction();
        let s = other.direction();
        let r_len = r.length();
        let s_len = s.length();
        if r_len <= GEOM_EPSILON || s_len <= GEOM_EPSILON {
            return None;
        }
        let det = r.cross(&s);
        if (det / (r_len * s_len)).abs() <= PARALLEL_SIN_TOLERANCE {
            return None;
        }

        let qp = other.start - self.start;
        let t = qp.cross(&s) / det;
        let u = qp.cross(&r) / det;
        let t_slack = GEOM_EPSILON.max(COLLINEAR_TOLERANCE / r_len);
        let u_slack = GEOM_EPSILON.max(COLLINEAR_TOLERANCE / s_len);
        if t <= t_slack || t >= 1.0 - t_slack || u <= u_slack || u >= 1.0 - u_slack {
            return None;
        }
        Some(self.start + r * t)
    }

    /// Scalar positions of this interval along `axis` (unit vector), ordered.
    #[inline]
    fn projection(&self, axis: &Point2D) -> (f64, f64) {
        let a = self.start.dot(axis);
        let b = self.end.dot(axis);
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Allen relation of this interval to `other`.
    ///
    /// Both intervals are projected onto this interval's direction, which
    /// is the same as rotating them into a shared axis-aligned frame.
    /// Only meaningful for intervals from scans of the same orientation.
    pub fn allen_relation(&self, other: &Interval) -> AllenRelation {
        let axis = Point2D::from_angle(self.angle());
        let (s1, e1) = self.projection(&axis);
        let (s2, e2) = other.projection(&axis);
        AllenRelation::classify(s1, e1, s2, e2)
    }

    /// Whether `other` starts exactly where this interval ends on the same line.
    pub fn is_continuation(&self, other: &Interval) -> bool {
        self.line_id == other.line_id && self.end.distance(&other.start) <= GEOM_EPSILON
    }

    /// Whether this interval bounds `other` from the left: both lie on the
    /// same line and this one ends exactly where `other` starts.
    pub fn is_left_boundary(&self, other: &Interval) -> bool {
        self.is_continuation(other) && self.allen_relation(other) == AllenRelation::Meets
    }
}
