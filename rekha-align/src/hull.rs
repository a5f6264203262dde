//! Planar convex hull (Graham scan) and hull-based distance utilities.

use std::cmp::Ordering;

use crate::core::{GEOM_EPSILON, Point2D};
use crate::spatial::PointIndex;

/// Convex hull of a point set, counter-clockwise.
///
/// Collinear points on hull edges and duplicate points are excluded. The
/// first vertex is the lowest point (smallest `y`, then smallest `x`).
/// A set of fewer than two distinct points returns those points; a fully
/// collinear set returns its two extremes.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut pts: Vec<Point2D> = points.to_vec();
    pts.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    pts.dedup_by(|a, b| a.distance(b) <= GEOM_EPSILON);
    if pts.len() < 3 {
        return pts;
    }

    let pivot = pts[0];
    let rest = &mut pts[1..];
    rest.sort_by(|a, b| polar_order(&pivot, a, b));

    let mut hull: Vec<Point2D> = Vec::with_capacity(pts.len());
    'points: for p in pts {
        while hull.len() >= 2 {
            let a = hull[hull.len() - 2];
            let b = hull[hull.len() - 1];
            let ab = b - a;
            let ap = p - a;
            let t = ab.cross(&ap);
            let scale = ab.length() * ap.length();
            if t > GEOM_EPSILON * scale {
                break;
            }
            if t.abs() <= GEOM_EPSILON * scale
                && ab.dot(&ap) > 0.0
                && ap.length() < ab.length()
            {
                // p lies between a and b on the same ray
                continue 'points;
            }
            hull.pop();
        }
        hull.push(p);
    }
    hull
}

/// Order by polar angle around `pivot`, nearer first on ties.
///
/// Uses `atan2` keys so the comparator is a total order even for
/// near-collinear inputs; the stack pass removes what is left collinear.
fn polar_order(pivot: &Point2D, a: &Point2D, b: &Point2D) -> Ordering {
    pivot
        .angle_to(a)
        .total_cmp(&pivot.angle_to(b))
        .then_with(|| {
            pivot
                .distance_squared(a)
                .total_cmp(&pivot.distance_squared(b))
        })
}

/// Arithmetic mean of hull vertices.
#[inline]
pub fn centroid(hull: &[Point2D]) -> Option<Point2D> {
    Point2D::mean(hull)
}

/// Pair of hull vertices at maximum distance.
///
/// Ties go to the first pair found in hull traversal order. Returns `None`
/// for fewer than two vertices.
pub fn longest_diagonal(hull: &[Point2D]) -> Option<(Point2D, Point2D)> {
    let mut best: Option<(Point2D, Point2D)> = None;
    let mut best_dist = 0.0;
    for (i, a) in hull.iter().enumerate() {
        for b in &hull[i + 1..] {
            let d = a.distance_squared(b);
            if d > best_dist {
                best_dist = d;
                best = Some((*a, *b));
            }
        }
    }
    best
}

/// Sum over `from` of the distance to the nearest point of `to`.
///
/// Returns infinity when `to` is empty and `from` is not.
pub fn sum_closest_distance(from: &[Point2D], to: &[Point2D]) -> f64 {
    PointIndex::new(to).sum_nearest_distance(from)
}
