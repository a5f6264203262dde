//! Simple-polygon predicates used by topology containment.
//!
//! Area and winding come from [`kurbo::Shape`] on a closed [`BezPath`]
//! through the ring; boundary distance from [`kurbo::Line`].

use kurbo::{BezPath, Line, ParamCurveNearest, PathEl, Shape};

use super::math::GEOM_EPSILON;
use super::point::Point2D;

/// Closed path through the ring vertices.
pub fn ring_path(vertices: &[Point2D]) -> BezPath {
    let mut elements = Vec::with_capacity(vertices.len() + 1);
    let mut iter = vertices.iter();
    if let Some(first) = iter.next() {
        elements.push(PathEl::MoveTo((*first).into()));
        elements.extend(iter.map(|p| PathEl::LineTo((*p).into())));
        elements.push(PathEl::ClosePath);
    }
    BezPath::from_vec(elements)
}

/// Signed area (positive for counter-clockwise vertex order).
pub fn signed_area(vertices: &[Point2D]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    ring_path(vertices).area()
}

/// Absolute polygon area.
#[inline]
pub fn area(vertices: &[Point2D]) -> f64 {
    signed_area(vertices).abs()
}

/// Whether `p` lies on the polygon boundary.
pub fn on_boundary(vertices: &[Point2D], p: &Point2D) -> bool {
    let n = vertices.len();
    let query: kurbo::Point = (*p).into();
    (0..n).any(|i| {
        let edge = Line::new(vertices[i], vertices[(i + 1) % n]);
        let tolerance = GEOM_EPSILON * edge.length().max(1.0);
        edge.nearest(query, GEOM_EPSILON).distance_sq <= tolerance * tolerance
    })
}

/// Point-in-polygon test by winding number. Boundary points count as inside.
pub fn contains_point(vertices: &[Point2D], p: &Point2D) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    on_boundary(vertices, p) || ring_path(vertices).winding((*p).into()) != 0
}

/// Whether the filled area of `outer` fully contains the filled area of `inner`.
///
/// Both rings must be boundaries of one non-self-intersecting region, so
/// rings never cross and a vertex test decides containment. Identical rings
/// do not contain each other.
pub fn contains_polygon(outer: &[Point2D], inner: &[Point2D]) -> bool {
    if outer.len() < 3 || inner.len() < 3 {
        return false;
    }
    if area(inner) >= area(outer) {
        return false;
    }
    let outer_path = ring_path(outer);
    let mut strictly_inside = false;
    for p in inner {
        if on_boundary(outer, p) {
            continue;
        }
        if outer_path.winding((*p).into()) == 0 {
            return false;
        }
        strictly_inside = true;
    }
    if strictly_inside {
        return true;
    }
    // Every vertex sits on the outer boundary: decide with an interior sample.
    Point2D::mean(inner).is_some_and(|c| contains_point(outer, &c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2D> {
        vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = square(0.0, 0.0, 2.0);
        assert_relative_eq!(signed_area(&ccw), 4.0);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert_relative_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_contains_point() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(contains_point(&sq, &Point2D::new(5.0, 5.0)));
        assert!(contains_point(&sq, &Point2D::new(0.0, 5.0)));
        assert!(!contains_point(&sq, &Point2D::new(11.0, 5.0)));
        let cw: Vec<_> = sq.iter().rev().copied().collect();
        assert!(contains_point(&cw, &Point2D::new(5.0, 5.0)));
    }

    #[test]
    fn test_on_boundary() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(on_boundary(&sq, &Point2D::new(10.0, 3.0)));
        assert!(on_boundary(&sq, &Point2D::new(0.0, 0.0)));
        assert!(!on_boundary(&sq, &Point2D::new(5.0, 5.0)));
        assert!(!on_boundary(&sq, &Point2D::new(10.5, 3.0)));
    }

    #[test]
    fn test_contains_polygon() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 3.0);
        let apart = square(20.0, 20.0, 3.0);
        assert!(contains_polygon(&outer, &inner));
        assert!(!contains_polygon(&inner, &outer));
        assert!(!contains_polygon(&outer, &apart));
        assert!(!contains_polygon(&outer, &outer));
    }

    #[test]
    fn test_contains_touching_polygon() {
        // Inner square shares the corner (0,0) with the outer one
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(0.0, 0.0, 4.0);
        assert!(contains_polygon(&outer, &inner));
    }
}
