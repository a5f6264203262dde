//! Sampling region outlines along scan lines.

use log::trace;

use crate::core::{GEOM_EPSILON, Point2D};
use crate::interval::Interval;

/// A flattened outline ring and whether it is subtracted.
pub(crate) struct Ring<'a> {
    pub vertices: &'a [Point2D],
    pub is_hole: bool,
}

/// Positive intervals of one full scan line.
///
/// Rings are applied in order: solid rings add the spans where the line is
/// inside them, hole rings cut their spans out of what has accumulated.
pub(crate) fn positive_intervals(line: &Interval, rings: &[Ring<'_>]) -> Vec<Interval> {
    let length = line.length();
    if length <= GEOM_EPSILON {
        return Vec::new();
    }
    let dir = line.direction().normalize();
    let mut spans: Vec<(f64, f64)> = Vec::new();

    for ring in rings {
        let inside = inside_spans(line.start, dir, length, ring.vertices);
        if inside.is_empty() {
            continue;
        }
        if ring.is_hole {
            spans = subtract(&spans, &inside);
        } else {
            spans = union(&spans, &inside);
        }
    }

    trace!("line {}: {} positive span(s)", line.line_id, spans.len());
    spans
        .into_iter()
        .map(|(t0, t1)| Interval::new(line.line_id, line.start + dir * t0, line.start + dir * t1))
        .collect()
}

/// Parameter spans of `origin + t * dir`, `t ∈ [0, length]`, inside a ring.
///
/// Uses a half-open crossing rule: an edge crosses the line when exactly
/// one endpoint lies strictly on the normal side. Edges running along the
/// line are therefore counted once, by their neighbours.
fn inside_spans(origin: Point2D, dir: Point2D, length: f64, ring: &[Point2D]) -> Vec<(f64, f64)> {
    let normal = dir.perp();
    let n = ring.len();
    let mut crossings: Vec<f64> = Vec::new();

    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let va = (a - origin).dot(&normal);
        let vb = (b - origin).dot(&normal);
        if (va > 0.0) != (vb > 0.0) {
            let ta = (a - origin).dot(&dir);
            let tb = (b - origin).dot(&dir);
            crossings.push(ta + (tb - ta) * (va / (va - vb)));
        }
    }
    crossings.sort_by(f64::total_cmp);

    crossings
        .chunks_exact(2)
        .filter_map(|pair| {
            let t0 = pair[0].clamp(0.0, length);
            let t1 = pair[1].clamp(0.0, length);
            (t1 - t0 > GEOM_EPSILON).then_some((t0, t1))
        })
        .collect()
}

/// Union of two sorted disjoint span lists.
fn union(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut all: Vec<(f64, f64)> = a.iter().chain(b.iter()).copied().collect();
    all.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(all.len());
    for (s, e) in all {
        match merged.last_mut() {
            Some(last) if s <= last.1 + GEOM_EPSILON => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }
    merged
}

/// Remove every span of `cut` from `spans`.
fn subtract(spans: &[(f64, f64)], cut: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut result = spans.to_vec();
    for &(cs, ce) in cut {
        let mut next = Vec::with_capacity(result.len() + 1);
        for (s, e) in result {
            if ce <= s || cs >= e {
                next.push((s, e));
                continue;
            }
            if cs - s > GEOM_EPSILON {
                next.push((s, cs));
            }
            if e - ce > GEOM_EPSILON {
                next.push((ce, e));
            }
        }
        result = next;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2D> {
        vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
        ]
    }

    fn horizontal(y: f64) -> Interval {
        Interval::new(1, Point2D::new(0.0, y), Point2D::new(800.0, y))
    }

    #[test]
    fn test_single_square() {
        let sq = square(100.0, 100.0, 50.0);
        let rings = [Ring {
            vertices: &sq,
            is_hole: false,
        }];
        let out = positive_intervals(&horizontal(120.0), &rings);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start, Point2D::new(100.0, 120.0));
        assert_eq!(out[0].end, Point2D::new(150.0, 120.0));
        assert!(positive_intervals(&horizontal(200.0), &rings).is_empty());
    }

    #[test]
    fn test_hole_splits_interval() {
        let outer = square(100.0, 100.0, 100.0);
        let hole = square(130.0, 130.0, 20.0);
        let rings = [
            Ring {
                vertices: &outer,
                is_hole: false,
            },
            Ring {
                vertices: &hole,
                is_hole: true,
            },
        ];
        let out = positive_intervals(&horizontal(140.0), &rings);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].end, Point2D::new(130.0, 140.0));
        assert_eq!(out[1].start, Point2D::new(150.0, 140.0));
    }

    #[test]
    fn test_overlapping_solids_merge() {
        let a = square(100.0, 100.0, 50.0);
        let b = square(140.0, 100.0, 50.0);
        let rings = [
            Ring {
                vertices: &a,
                is_hole: false,
            },
            Ring {
                vertices: &b,
                is_hole: false,
            },
        ];
        let out = positive_intervals(&horizontal(120.0), &rings);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].end, Point2D::new(190.0, 120.0));
    }

    #[test]
    fn test_span_ops() {
        assert_eq!(union(&[(0.0, 1.0)], &[(0.5, 2.0), (3.0, 4.0)]), vec![(0.0, 2.0), (3.0, 4.0)]);
        assert_eq!(subtract(&[(0.0, 10.0)], &[(2.0, 3.0), (5.0, 12.0)]), vec![(0.0, 2.0), (3.0, 5.0)]);
    }
}
