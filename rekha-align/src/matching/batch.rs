//! Parallel alignment of many scan pairs.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::search::AlignmentSearch;
use super::types::AlignmentResult;
use crate::core::{Canvas, RegionOutline};
use crate::error::ScanDataError;
use crate::scan::{ConflictCount, ScanData};

/// Align every `(source, target)` pair in parallel.
///
/// Results come back in input order.
pub fn align_batch(search: &AlignmentSearch, pairs: &[(ScanData, ScanData)]) -> Vec<AlignmentResult> {
    pairs
        .par_iter()
        .map(|(source, target)| search.align(source, target))
        .collect()
}

/// A region sensed twice at different angles with the same gap.
#[derive(Clone, Debug)]
pub struct BenchmarkInstance {
    /// Instance identifier, used in logs.
    pub id: usize,
    /// Region outlines (the ground truth).
    pub outlines: Vec<RegionOutline>,
    /// Line angle of the first scan.
    pub angle: f64,
    /// Angle added for the second scan.
    pub angle_difference: f64,
    /// Line spacing of both scans.
    pub gap: f64,
    /// Canvas both scans are clipped to.
    pub canvas: Canvas,
}

/// Outcome of one benchmark instance.
#[derive(Clone, Debug)]
pub struct BenchmarkRecord {
    /// Instance identifier.
    pub id: usize,
    /// Alignment of the normalized first scan onto the normalized second.
    pub result: AlignmentResult,
    /// Conflicts between the two scans as sensed, before normalization.
    pub ground_truth_conflicts: ConflictCount,
    /// Wall time of the alignment.
    pub elapsed: Duration,
}

impl BenchmarkRecord {
    /// Residual conflicts minus the conflicts of the scans as sensed.
    pub fn error(&self) -> Option<i64> {
        match (self.result.residual.count(), self.ground_truth_conflicts.count()) {
            (Some(after), Some(truth)) => Some(after as i64 - truth as i64),
            _ => None,
        }
    }
}

impl BenchmarkInstance {
    /// Instance with a random first angle drawn from `rng`.
    pub fn random(
        id: usize,
        outlines: Vec<RegionOutline>,
        gap: f64,
        angle_difference: f64,
        canvas: Canvas,
        rng: &mut StdRng,
    ) -> Self {
        Self {
            id,
            outlines,
            angle: rng.random_range(0.0..PI),
            angle_difference,
            gap,
            canvas,
        }
    }

    /// Line angle of the second scan, in `[0, π)`.
    pub fn second_angle(&self) -> f64 {
        (self.angle + self.angle_difference).rem_euclid(PI)
    }

    /// Sense the region at both angles.
    pub fn measurements(&self) -> Result<(ScanData, ScanData), ScanDataError> {
        let first = ScanData::from_outlines(&self.outlines, self.angle, self.gap, self.canvas)?;
        let second = ScanData::from_outlines(&self.outlines, self.second_angle(), self.gap, self.canvas)?;
        Ok((first, second))
    }

    /// Normalize both measurements and align the first onto the second.
    pub fn run(&self, search: &AlignmentSearch) -> Result<BenchmarkRecord, ScanDataError> {
        let (first, second) = self.measurements()?;
        let ground_truth_conflicts = first.count_conflicts(&second);
        let (source, _) = first.normalized();
        let (target, _) = second.normalized();

        let start = Instant::now();
        let result = search.align(&source, &target);
        let elapsed = start.elapsed();
        debug!(
            "Instance {}: {:?} with {} residual conflicts in {:?}",
            self.id,
            result.outcome(),
            result.residual,
            elapsed
        );

        Ok(BenchmarkRecord {
            id: self.id,
            result,
            ground_truth_conflicts,
            elapsed,
        })
    }
}

/// Run every instance in parallel. Results come back in input order.
pub fn run_benchmarks(
    search: &AlignmentSearch,
    instances: &[BenchmarkInstance],
) -> Vec<Result<BenchmarkRecord, ScanDataError>> {
    instances.par_iter().map(|instance| instance.run(search)).collect()
}

/// Seeded generator for [`BenchmarkInstance::random`].
pub fn benchmark_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outline;
    use approx::assert_relative_eq;

    fn rectangle() -> Vec<RegionOutline> {
        vec![RegionOutline::solid(Outline::rectangle(250.0, 200.0, 240.0, 120.0))]
    }

    #[test]
    fn test_second_angle_wraps() {
        let instance = BenchmarkInstance {
            id: 0,
            outlines: rectangle(),
            angle: 3.0,
            angle_difference: 0.5,
            gap: 20.0,
            canvas: Canvas::default(),
        };
        assert_relative_eq!(instance.second_angle(), 3.5 - PI, epsilon = 1e-12);
    }

    #[test]
    fn test_random_angle_in_range() {
        let mut rng = benchmark_rng(7);
        for id in 0..20 {
            let instance = BenchmarkInstance::random(id, rectangle(), 20.0, 0.1, Canvas::default(), &mut rng);
            assert!((0.0..PI).contains(&instance.angle));
        }
    }

    #[test]
    fn test_batch_keeps_order() {
        let a = ScanData::from_outlines(&rectangle(), 0.0, 10.0, Canvas::default()).unwrap();
        let empty = ScanData::from_outlines(&[], 0.0, 10.0, Canvas::default()).unwrap();
        let pairs = vec![(a.clone(), a.clone()), (empty, a.clone()), (a.clone(), a)];
        let results = align_batch(&AlignmentSearch::with_defaults(), &pairs);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_exact());
        assert!(results[1].transform.is_none());
        assert!(results[2].is_exact());
    }
}
