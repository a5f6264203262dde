//! Spatial indexes for nearest-neighbour queries.
//!
//! - [`PointIndex`]: k-d tree over points (`kiddo`), for hull vertex
//!   distances and ICP correspondences.
//! - [`IntervalIndex`]: R-tree over interval segments (`rstar`), for the
//!   closest point on a scan's positives.
//!
//! Both are built once per target and queried many times inside the
//! rotation and local-search loops.

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::core::{GEOM_EPSILON, Point2D};
use crate::interval::Interval;

/// Immutable k-d tree over a point set.
///
/// Built in one pass from a slice, so many points sharing a coordinate
/// (every endpoint on one edge of an axis-aligned scan) are fine.
pub struct PointIndex {
    tree: Option<ImmutableKdTree<f64, 2>>,
    points: Vec<Point2D>,
}

impl PointIndex {
    /// Index `points`. An empty slice gives an empty index.
    pub fn new(points: &[Point2D]) -> Self {
        let tree = if points.is_empty() {
            None
        } else {
            let entries: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
            Some(ImmutableKdTree::new_from_slice(&entries))
        };
        Self {
            tree,
            points: points.to_vec(),
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Nearest indexed point to `p` and its distance.
    pub fn nearest(&self, p: &Point2D) -> Option<(Point2D, f64)> {
        let tree = self.tree.as_ref()?;
        let found = tree.nearest_one::<SquaredEuclidean>(&[p.x, p.y]);
        let point = *self.points.get(found.item as usize)?;
        Some((point, found.distance.sqrt()))
    }

    /// Sum over `from` of the distance to the nearest indexed point.
    ///
    /// Infinity when the index is empty and `from` is not.
    pub fn sum_nearest_distance(&self, from: &[Point2D]) -> f64 {
        from.iter()
            .map(|p| self.nearest(p).map_or(f64::INFINITY, |(_, d)| d))
            .sum()
    }
}

/// Interval stored in the R-tree with its position in the source slice.
#[derive(Clone, Debug)]
struct IndexedInterval {
    interval: Interval,
    index: usize,
}

impl RTreeObject for IndexedInterval {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (a, b) = (self.interval.start, self.interval.end);
        AABB::from_corners([a.x.min(b.x), a.y.min(b.y)], [a.x.max(b.x), a.y.max(b.y)])
    }
}

impl PointDistance for IndexedInterval {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let p = Point2D::new(point[0], point[1]);
        self.interval.closest_point(&p).distance_squared(&p)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.distance_2(point) <= GEOM_EPSILON * GEOM_EPSILON
    }
}

/// R-tree over interval segments.
#[derive(Clone)]
pub struct IntervalIndex {
    tree: RTree<IndexedInterval>,
}

impl IntervalIndex {
    /// Bulk-load `intervals`.
    pub fn new(intervals: &[Interval]) -> Self {
        let indexed: Vec<IndexedInterval> = intervals
            .iter()
            .enumerate()
            .map(|(index, interval)| IndexedInterval {
                interval: *interval,
                index,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Number of indexed intervals.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Position (in the source slice) of the interval nearest to `p`, and
    /// the closest point on it.
    pub fn nearest(&self, p: &Point2D) -> Option<(usize, Point2D)> {
        self.tree
            .nearest_neighbor(&[p.x, p.y])
            .map(|found| (found.index, found.interval.closest_point(p)))
    }

    /// Closest point on any indexed interval.
    pub fn closest_point(&self, p: &Point2D) -> Option<Point2D> {
        self.nearest(p).map(|(_, q)| q)
    }

    /// Sum over `from` of the distance to the closest indexed interval.
    ///
    /// Infinity when the index is empty and `from` is not.
    pub fn sum_closest_distance<'a, I>(&self, from: I) -> f64
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        from.into_iter()
            .map(|p| self.closest_point(p).map_or(f64::INFINITY, |q| q.distance(p)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_nearest(points: &[Point2D], p: &Point2D) -> f64 {
        points
            .iter()
            .map(|q| q.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_point_index_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<Point2D> = (0..200)
            .map(|_| Point2D::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0)))
            .collect();
        let index = PointIndex::new(&points);
        assert_eq!(index.len(), 200);
        for _ in 0..100 {
            let q = Point2D::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            let (_, d) = index.nearest(&q).unwrap();
            assert_relative_eq!(d, brute_nearest(&points, &q), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_point_index_shared_coordinates() {
        // 300 endpoints on one vertical edge
        let points: Vec<Point2D> = (0..300).map(|i| Point2D::new(100.0, i as f64)).collect();
        let index = PointIndex::new(&points);
        let (p, d) = index.nearest(&Point2D::new(90.0, 41.2)).unwrap();
        assert_eq!(p, Point2D::new(100.0, 41.0));
        assert_relative_eq!(d, (100.0f64 + 0.04).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_empty_indexes() {
        let points = PointIndex::new(&[]);
        assert!(points.is_empty());
        assert!(points.nearest(&Point2D::ZERO).is_none());
        assert_eq!(points.sum_nearest_distance(&[]), 0.0);
        assert!(points.sum_nearest_distance(&[Point2D::ZERO]).is_infinite());

        let intervals = IntervalIndex::new(&[]);
        assert!(intervals.is_empty());
        assert!(intervals.closest_point(&Point2D::ZERO).is_none());
    }

    #[test]
    fn test_interval_index_closest_point() {
        let intervals = [
            Interval::new(1, Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0)),
            Interval::new(2, Point2D::new(0.0, 20.0), Point2D::new(50.0, 20.0)),
            Interval::new(2, Point2D::new(80.0, 20.0), Point2D::new(120.0, 20.0)),
        ];
        let index = IntervalIndex::new(&intervals);
        assert_eq!(index.len(), 3);

        let (i, q) = index.nearest(&Point2D::new(60.0, 18.0)).unwrap();
        assert_eq!(i, 1);
        assert_eq!(q, Point2D::new(50.0, 20.0));

        let q = index.closest_point(&Point2D::new(40.0, 3.0)).unwrap();
        assert_eq!(q, Point2D::new(40.0, 0.0));

        let from = [Point2D::new(40.0, 3.0), Point2D::new(130.0, 20.0)];
        assert_relative_eq!(index.sum_closest_distance(&from), 13.0);
    }
}
