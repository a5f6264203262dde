//! Closed outline paths and the records that flag them as solid or hole.
//!
//! An [`Outline`] wraps a [`kurbo::BezPath`]. Each `MoveTo` starts a
//! sub-path, `LineTo`/`QuadTo`/`CurveTo` extend it and `ClosePath`
//! finalizes it. Curves are flattened into polylines with
//! [`kurbo::flatten`] before any scan or topology processing.

use kurbo::{BezPath, PathEl, Shape};
use serde::{Deserialize, Serialize};

use super::math::GEOM_EPSILON;
use super::point::Point2D;

/// Default flattening tolerance for curved segments (canvas units).
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 0.25;

/// Smallest flattening tolerance honoured. Finer requests are clamped.
pub const MIN_FLATTEN_TOLERANCE: f64 = 1e-3;

/// A path made of one or more closed sub-paths.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    path: BezPath,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw path elements.
    pub fn from_elements(elements: Vec<PathEl>) -> Self {
        Self {
            path: BezPath::from_vec(elements),
        }
    }

    /// Closed polygon through the given vertices.
    pub fn polygon(vertices: &[Point2D]) -> Self {
        let mut outline = Self::new();
        let mut iter = vertices.iter();
        if let Some(first) = iter.next() {
            outline = outline.move_to(*first);
            for p in iter {
                outline = outline.line_to(*p);
            }
            outline = outline.close();
        }
        outline
    }

    /// Axis-aligned rectangle, counter-clockwise.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::polygon(&[
            Point2D::new(x, y),
            Point2D::new(x + width, y),
            Point2D::new(x + width, y + height),
            Point2D::new(x, y + height),
        ])
    }

    /// Circle approximated with four cubic arcs, counter-clockwise.
    pub fn circle(center: Point2D, radius: f64) -> Self {
        // Control distance for a quarter arc
        const K: f64 = 0.552_284_749_831;
        let (cx, cy, r) = (center.x, center.y, radius);
        let k = K * r;
        Self::new()
            .move_to(Point2D::new(cx + r, cy))
            .cubic_to(
                Point2D::new(cx + r, cy + k),
                Point2D::new(cx + k, cy + r),
                Point2D::new(cx, cy + r),
            )
            .cubic_to(
                Point2D::new(cx - k, cy + r),
                Point2D::new(cx - r, cy + k),
                Point2D::new(cx - r, cy),
            )
            .cubic_to(
                Point2D::new(cx - r, cy - k),
                Point2D::new(cx - k, cy - r),
                Point2D::new(cx, cy - r),
            )
            .cubic_to(
                Point2D::new(cx + k, cy - r),
                Point2D::new(cx + r, cy - k),
                Point2D::new(cx + r, cy),
            )
            .close()
    }

    /// Append a `MoveTo`.
    pub fn move_to(mut self, p: Point2D) -> Self {
        self.path.move_to(p);
        self
    }

    /// Append a `LineTo`.
    pub fn line_to(mut self, p: Point2D) -> Self {
        self.path.line_to(p);
        self
    }

    /// Append a cubic `CurveTo`.
    pub fn cubic_to(mut self, c1: Point2D, c2: Point2D, end: Point2D) -> Self {
        self.path.curve_to(c1, c2, end);
        self
    }

    /// Append a `ClosePath`.
    pub fn close(mut self) -> Self {
        self.path.close_path();
        self
    }

    /// The raw element stream.
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    /// The underlying path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Whether the outline has no elements.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Signed enclosed area, positive for counter-clockwise sub-paths.
    pub fn signed_area(&self) -> f64 {
        self.path.area()
    }

    /// Winding number of `p` with respect to the outline.
    pub fn winding(&self, p: &Point2D) -> i32 {
        self.path.winding((*p).into())
    }

    /// Flatten every sub-path into a polygon ring.
    ///
    /// Rings with fewer than three distinct vertices are dropped. A
    /// sub-path left open is closed implicitly.
    pub fn rings(&self, tolerance: f64) -> Vec<Vec<Point2D>> {
        let mut rings = Vec::new();
        let mut current: Vec<Point2D> = Vec::new();

        kurbo::flatten(
            self.path.iter(),
            tolerance.max(MIN_FLATTEN_TOLERANCE),
            |el| match el {
                PathEl::MoveTo(p) => {
                    finish_ring(&mut rings, &mut current);
                    current.push(p.into());
                }
                PathEl::LineTo(p) => push_vertex(&mut current, p.into()),
                PathEl::ClosePath => finish_ring(&mut rings, &mut current),
                // flatten only emits moves, lines and closes
                PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
            },
        );
        finish_ring(&mut rings, &mut current);
        rings
    }
}

pub(crate) fn push_vertex(ring: &mut Vec<Point2D>, p: Point2D) {
    if ring.last().is_none_or(|last| last.distance(&p) > GEOM_EPSILON) {
        ring.push(p);
    }
}

fn finish_ring(rings: &mut Vec<Vec<Point2D>>, current: &mut Vec<Point2D>) {
    let mut ring = std::mem::take(current);
    if ring.len() > 1 && ring[0].distance(&ring[ring.len() - 1]) <= GEOM_EPSILON {
        ring.pop();
    }
    if ring.len() >= 3 {
        rings.push(ring);
    }
}

/// A closed outline flagged as solid material or a hole cut from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionOutline {
    /// The closed path
    pub outline: Outline,
    /// Whether the outline is subtracted instead of added
    pub is_hole: bool,
}

impl RegionOutline {
    /// A solid outline.
    pub fn solid(outline: Outline) -> Self {
        Self {
            outline,
            is_hole: false,
        }
    }

    /// A hole outline.
    pub fn hole(outline: Outline) -> Self {
        Self {
            outline,
            is_hole: true,
        }
    }
}
