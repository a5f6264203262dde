//! Positive/negative interval collection of one sweep.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::conflict::ConflictCount;
use super::lines::ScanLines;
use super::negatives::derive_negatives;
use super::raster::{Ring, positive_intervals};
use super::records::{infer_lines, parse_records, write_records};
use crate::core::outline::DEFAULT_FLATTEN_TOLERANCE;
use crate::core::{Canvas, Point2D, RegionOutline, RigidTransform};
use crate::error::ScanDataError;
use crate::hull::{self, convex_hull};
use crate::interval::{Interval, IntervalKind};
use crate::spatial::IntervalIndex;

/// One sweep of a region: positive intervals (inside) and the negative
/// intervals (outside) derived from them.
///
/// Positives are ordered by line id, then along the scan direction. For a
/// freshly built scan, positives and negatives of each line partition the
/// line's in-canvas extent. [`ScanData::apply_transform`] moves both lists
/// without re-deriving negatives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanData {
    positives: Vec<Interval>,
    negatives: Vec<Interval>,
    lines: ScanLines,
    canvas: Canvas,
}

impl ScanData {
    /// Sample region outlines along lines at `angle` spaced `gap` apart.
    ///
    /// Outlines are applied in order: solids add coverage, holes cut it.
    pub fn from_outlines(
        outlines: &[RegionOutline],
        angle: f64,
        gap: f64,
        canvas: Canvas,
    ) -> Result<Self, ScanDataError> {
        Self::from_outlines_with_tolerance(outlines, angle, gap, canvas, DEFAULT_FLATTEN_TOLERANCE)
    }

    /// Same as [`ScanData::from_outlines`] with an explicit curve flattening tolerance.
    pub fn from_outlines_with_tolerance(
        outlines: &[RegionOutline],
        angle: f64,
        gap: f64,
        canvas: Canvas,
        flatten_tolerance: f64,
    ) -> Result<Self, ScanDataError> {
        let lines = ScanLines::generate(&canvas, angle, gap)?;

        let flattened: Vec<(Vec<Point2D>, bool)> = outlines
            .iter()
            .flat_map(|o| {
                o.outline
                    .rings(flatten_tolerance)
                    .into_iter()
                    .map(move |ring| (ring, o.is_hole))
            })
            .collect();
        let rings: Vec<Ring<'_>> = flattened
            .iter()
            .map(|(vertices, is_hole)| Ring {
                vertices,
                is_hole: *is_hole,
            })
            .collect();

        let mut positives = Vec::new();
        for line_id in 1..=lines.count {
            if let Some(full) = lines.line(line_id, &canvas) {
                positives.extend(positive_intervals(&full, &rings));
            }
        }

        debug!(
            "Scanned {} ring(s) at {:.4} rad, gap {}: {} lines, {} positive intervals",
            rings.len(),
            lines.angle,
            gap,
            lines.count,
            positives.len()
        );
        Ok(Self::from_positives(positives, lines, canvas))
    }

    /// Build from positive intervals, deriving the negatives.
    pub fn from_positives(positives: Vec<Interval>, lines: ScanLines, canvas: Canvas) -> Self {
        let negatives = derive_negatives(&positives, &lines, &canvas);
        Self {
            positives,
            negatives,
            lines,
            canvas,
        }
    }

    /// Parse positive intervals from record text.
    ///
    /// Line geometry (angle, spacing, line count) is inferred from the
    /// records; negatives are derived against `canvas`.
    pub fn from_records(text: &str, canvas: Canvas) -> Result<Self, ScanDataError> {
        let records = parse_records(text)?;
        let lines = infer_lines(&records)?;
        let positives: Vec<Interval> = records.into_iter().map(|(_, iv)| iv).collect();
        Ok(Self::from_positives(positives, lines, canvas))
    }

    /// Read a record file.
    pub fn load(path: &Path, canvas: Canvas) -> Result<Self, ScanDataError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_records(&text, canvas)
    }

    /// Render positive or negative intervals in record format.
    pub fn to_records(&self, kind: IntervalKind) -> String {
        write_records(self.intervals(kind))
    }

    /// Positive intervals.
    #[inline]
    pub fn positives(&self) -> &[Interval] {
        &self.positives
    }

    /// Negative intervals.
    #[inline]
    pub fn negatives(&self) -> &[Interval] {
        &self.negatives
    }

    /// Intervals of the given kind.
    #[inline]
    pub fn intervals(&self, kind: IntervalKind) -> &[Interval] {
        match kind {
            IntervalKind::Positive => &self.positives,
            IntervalKind::Negative => &self.negatives,
        }
    }

    /// Intervals of one kind on one line.
    pub fn intervals_on_line(
        &self,
        line_id: usize,
        kind: IntervalKind,
    ) -> impl Iterator<Item = &Interval> {
        self.intervals(kind)
            .iter()
            .filter(move |iv| iv.line_id == line_id)
    }

    /// Line family geometry.
    #[inline]
    pub fn lines(&self) -> &ScanLines {
        &self.lines
    }

    /// Scan direction (radians).
    #[inline]
    pub fn angle(&self) -> f64 {
        self.lines.angle
    }

    /// Line spacing.
    #[inline]
    pub fn gap(&self) -> f64 {
        self.lines.gap
    }

    /// Number of scan lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.count
    }

    /// Canvas the scan was taken on.
    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Whether the scan saw no region at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positives.is_empty()
    }

    /// All positive interval endpoints.
    pub fn positive_points(&self) -> Vec<Point2D> {
        self.positives
            .iter()
            .flat_map(|iv| [iv.start, iv.end])
            .collect()
    }

    /// Convex hull of the positive endpoints, counter-clockwise.
    pub fn convex_hull(&self) -> Vec<Point2D> {
        convex_hull(&self.positive_points())
    }

    /// Mean of the convex hull vertices.
    pub fn centroid(&self) -> Option<Point2D> {
        hull::centroid(&self.convex_hull())
    }

    /// Mean of all positive endpoints.
    pub fn positive_centroid(&self) -> Option<Point2D> {
        Point2D::mean(self.positives.iter().flat_map(|iv| [&iv.start, &iv.end]))
    }

    /// New scan with every interval endpoint moved by `transform`.
    ///
    /// Negatives are moved, not re-derived.
    pub fn apply_transform(&self, transform: &RigidTransform) -> ScanData {
        ScanData {
            positives: self
                .positives
                .iter()
                .map(|iv| iv.transformed(transform))
                .collect(),
            negatives: self
                .negatives
                .iter()
                .map(|iv| iv.transformed(transform))
                .collect(),
            lines: self.lines.transformed(transform),
            canvas: self.canvas,
        }
    }

    /// Re-derive negatives from the current positives and line geometry.
    pub fn with_derived_negatives(&self) -> ScanData {
        Self::from_positives(self.positives.clone(), self.lines, self.canvas)
    }

    /// Crossings of this scan's positives with `other`'s negatives.
    pub fn conflict_points(&self, other: &ScanData) -> Vec<Point2D> {
        let mut points = Vec::new();
        for pos in &self.positives {
            for neg in &other.negatives {
                if let Some(p) = pos.intersection_point(neg) {
                    points.push(p);
                }
            }
        }
        points
    }

    /// Whether any positive interval of this scan meets one of `other`.
    pub fn positive_intersects(&self, other: &ScanData) -> bool {
        self.positives
            .iter()
            .any(|a| other.positives.iter().any(|b| a.intersects(b)))
    }

    /// Conflicts in both directions, or `Incompatible` when the positives
    /// of the two scans never meet.
    pub fn count_conflicts(&self, other: &ScanData) -> ConflictCount {
        if !self.positive_intersects(other) {
            return ConflictCount::Incompatible;
        }
        ConflictCount::Conflicts(self.conflict_points(other).len() + other.conflict_points(self).len())
    }

    /// R-tree over the positive intervals.
    ///
    /// Build it once when the same scan is the target of many
    /// closest-point queries.
    pub fn positive_index(&self) -> IntervalIndex {
        IntervalIndex::new(&self.positives)
    }

    /// Closest point on any positive interval, `None` for an empty scan.
    ///
    /// Builds a fresh index; use [`ScanData::positive_index`] for repeated
    /// queries.
    pub fn closest_positive_point(&self, point: &Point2D) -> Option<Point2D> {
        self.positive_index().closest_point(point)
    }

    /// Sum over this scan's positive endpoints of the distance to the
    /// nearest point on `other`'s positives.
    pub fn sum_closest_point_error(&self, other: &ScanData) -> f64 {
        self.sum_closest_point_error_to(&other.positive_index())
    }

    /// [`ScanData::sum_closest_point_error`] against a prebuilt index of
    /// the other scan's positives.
    pub fn sum_closest_point_error_to(&self, index: &IntervalIndex) -> f64 {
        index.sum_closest_distance(self.positives.iter().flat_map(|iv| [&iv.start, &iv.end]))
    }

    /// Sum over this scan's hull vertices of the distance to the nearest
    /// hull vertex of `other`.
    pub fn sum_closest_hull_error(&self, other: &ScanData) -> f64 {
        hull::sum_closest_distance(&self.convex_hull(), &other.convex_hull())
    }

    /// Rotate about the canvas centre so lines run at angle 0, then shift
    /// so the smallest positive coordinates sit at the origin.
    ///
    /// Returns the normalized scan and the transform that produced it.
    pub fn normalized(&self) -> (ScanData, RigidTransform) {
        let rotate = RigidTransform::rotation(-self.lines.angle, self.canvas.center());
        let rotated = self.apply_transform(&rotate);
        let Some((min_x, min_y)) = rotated
            .positive_points()
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p.x, p.y)),
                Some((x, y)) => Some((x.min(p.x), y.min(p.y))),
            })
        else {
            warn!("Normalizing an empty scan: rotation only");
            return (rotated, rotate);
        };
        let shift = RigidTransform::translation(-min_x, -min_y);
        (rotated.apply_transform(&shift), rotate.then(&shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outline;
    use approx::assert_relative_eq;

    fn square_scan(gap: f64) -> ScanData {
        let outlines = [RegionOutline::solid(Outline::rectangle(100.0, 100.0, 200.0, 100.0))];
        ScanData::from_outlines(&outlines, 0.0, gap, Canvas::default()).unwrap()
    }

    #[test]
    fn test_square_positives() {
        let scan = square_scan(20.0);
        // Lines at y = 100, 120, ..., 180 are inside (y = 200 is the top edge)
        assert_eq!(scan.positives().len(), 5);
        for iv in scan.positives() {
            assert_relative_eq!(iv.length(), 200.0);
        }
        assert_eq!(scan.line_count(), 31);
    }

    #[test]
    fn test_hull_and_centroids() {
        let scan = square_scan(20.0);
        let hull = scan.convex_hull();
        assert_eq!(hull.len(), 4);
        let c = scan.centroid().unwrap();
        assert_relative_eq!(c.x, 200.0);
        assert_relative_eq!(c.y, 140.0);
        let pc = scan.positive_centroid().unwrap();
        assert_relative_eq!(pc.x, 200.0);
        assert_relative_eq!(pc.y, 140.0);
    }

    #[test]
    fn test_self_conflicts_are_zero() {
        let scan = square_scan(20.0);
        assert!(scan.positive_intersects(&scan));
        assert_eq!(scan.count_conflicts(&scan), ConflictCount::ZERO);
    }

    #[test]
    fn test_disjoint_scans_incompatible() {
        let scan = square_scan(20.0);
        let far = scan.apply_transform(&RigidTransform::translation(400.0, 300.0));
        assert!(!scan.positive_intersects(&far));
        assert_eq!(scan.count_conflicts(&far), ConflictCount::Incompatible);
    }

    #[test]
    fn test_rotated_copy_conflicts() {
        let scan = square_scan(20.0);
        let pivot = scan.positive_centroid().unwrap();
        let turned = scan.apply_transform(&RigidTransform::rotation(0.3, pivot));
        let count = scan.count_conflicts(&turned);
        assert!(count.count().is_some_and(|n| n > 0));
        assert!(scan.sum_closest_point_error(&turned) > 0.0);
    }

    #[test]
    fn test_normalized() {
        let scan = square_scan(20.0);
        let pivot = scan.positive_centroid().unwrap();
        let turned = scan.apply_transform(&RigidTransform::rotation(0.5, pivot));
        let (norm, transform) = turned.normalized();
        assert_relative_eq!(norm.angle(), 0.0, epsilon = 1e-12);
        let min_x = norm.positive_points().iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = norm.positive_points().iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert_relative_eq!(min_x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(min_y, 0.0, epsilon = 1e-9);
        let moved = turned.apply_transform(&transform);
        assert_relative_eq!(moved.positives()[0].start.x, norm.positives()[0].start.x, epsilon = 1e-9);
    }

    #[test]
    fn test_records_roundtrip() {
        let scan = square_scan(20.0);
        let text = scan.to_records(IntervalKind::Positive);
        let parsed = ScanData::from_records(&text, Canvas::default()).unwrap();
        assert_eq!(parsed.positives(), scan.positives());
        assert_relative_eq!(parsed.gap(), 20.0);
        assert_eq!(parsed.negatives().len(), scan.negatives().len() - (31 - 10));
    }
}
