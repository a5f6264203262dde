//! Geometry of the parallel line family a scan samples along.

use serde::{Deserialize, Serialize};

use crate::core::math::normalize_line_angle;
use crate::core::{Canvas, GEOM_EPSILON, Point2D, RigidTransform, normalize_angle};
use crate::error::ScanDataError;
use crate::interval::Interval;

/// A family of equally spaced parallel lines.
///
/// Line `k` (1-based) is the set of points `p` with
/// `p · normal = first_offset + (k - 1) * gap * sign`, where `sign` is +1
/// when ids grow along the left normal of the scan direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanLines {
    /// Direction of every line (radians, CCW from +X)
    pub angle: f64,
    /// Perpendicular spacing between consecutive lines
    pub gap: f64,
    /// Signed normal offset of line 1
    pub first_offset: f64,
    /// Number of lines
    pub count: usize,
    /// Whether ids grow along the left normal (false: against it)
    pub ascending: bool,
}

impl ScanLines {
    /// Lines at `angle` spaced `gap` apart, covering the whole canvas.
    ///
    /// The angle is reduced to [0, π). Lines that only touch a canvas
    /// corner are dropped, so ids start at the first line crossing the
    /// canvas.
    pub fn generate(canvas: &Canvas, angle: f64, gap: f64) -> Result<Self, ScanDataError> {
        if !(gap.is_finite() && gap > 0.0) {
            return Err(ScanDataError::InvalidSpacing(gap));
        }
        let angle = normalize_line_angle(angle);
        let normal = Point2D::from_angle(angle).perp();

        let offsets = canvas.corners().map(|c| c.dot(&normal));
        let c_min = offsets.iter().copied().fold(f64::INFINITY, f64::min);
        let c_max = offsets.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut family = Self {
            angle,
            gap,
            first_offset: c_min,
            count: 0,
            ascending: true,
        };

        let mut first: Option<usize> = None;
        let mut last = 0;
        let mut k = 0usize;
        while c_min + k as f64 * gap <= c_max + GEOM_EPSILON {
            if family.line(k + 1, canvas).is_some() {
                first.get_or_insert(k);
                last = k;
            }
            k += 1;
        }

        if let Some(first) = first {
            family.first_offset = c_min + first as f64 * gap;
            family.count = last - first + 1;
        }
        Ok(family)
    }

    /// Unit direction of the lines.
    #[inline]
    pub fn direction(&self) -> Point2D {
        Point2D::from_angle(self.angle)
    }

    /// Unit left normal of the lines.
    #[inline]
    pub fn normal(&self) -> Point2D {
        self.direction().perp()
    }

    /// Signed normal offset of a line.
    #[inline]
    pub fn offset(&self, line_id: usize) -> f64 {
        let step = (line_id as f64 - 1.0) * self.gap;
        if self.ascending {
            self.first_offset + step
        } else {
            self.first_offset - step
        }
    }

    /// Nearest line id for a point, if the point is on the id side of line 1.
    pub fn line_id_at(&self, point: &Point2D) -> Option<usize> {
        if self.gap <= 0.0 {
            return Some(1);
        }
        let mut k = (point.dot(&self.normal()) - self.first_offset) / self.gap;
        if !self.ascending {
            k = -k;
        }
        let k = k.round();
        if k < 0.0 { None } else { Some(k as usize + 1) }
    }

    /// Full in-canvas extent of a line, oriented along the scan direction.
    pub fn line(&self, line_id: usize, canvas: &Canvas) -> Option<Interval> {
        let origin = self.normal() * self.offset(line_id);
        Interval::new(line_id, origin, origin + self.direction()).full_extent(canvas)
    }

    /// The same line family moved by a rigid transform.
    pub fn transformed(&self, transform: &RigidTransform) -> Self {
        let normal = self.normal();
        let anchor = transform.apply(normal * self.first_offset);
        let angle = normalize_angle(self.angle + transform.theta);
        let moved = Self { angle, ..*self };
        Self {
            first_offset: anchor.dot(&moved.normal()),
            ..moved
        }
    }
}
