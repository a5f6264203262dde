//! Stage 2: rotation refinement about the positive centroid.
//!
//! Two strategies are provided:
//!
//! - [`refine_rotation`] sweeps a fixed angular grid and stops early at the
//!   first rotation with zero conflicts.
//! - [`refine_rotation_golden`] runs golden-section search on the closest
//!   point error inside a bracket. It only finds the minimum of that
//!   bracket, so it suits local refinement but not the initial wide sweep.

use log::trace;

use super::config::AngularWindow;
use crate::core::{GEOM_EPSILON, RigidTransform};
use crate::scan::{ConflictCount, ScanData};
use crate::spatial::IntervalIndex;

/// Upper bound on golden-section iterations.
const MAX_GOLDEN_ITERATIONS: usize = 100;

/// 1/φ
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Best rotation found by a refinement pass.
#[derive(Clone, Debug)]
pub struct RotationOutcome {
    /// The rotated scan.
    pub scan: ScanData,
    /// The rotation applied (identity if none helped).
    pub transform: RigidTransform,
    /// Conflicts of the rotated scan against the target.
    pub conflicts: ConflictCount,
    /// Closest-point error of the rotated scan against the target.
    pub error: f64,
}

impl RotationOutcome {
    fn evaluate(
        scan: ScanData,
        target: &ScanData,
        index: &IntervalIndex,
        transform: RigidTransform,
    ) -> Self {
        let conflicts = scan.count_conflicts(target);
        let error = scan.sum_closest_point_error_to(index);
        Self {
            scan,
            transform,
            conflicts,
            error,
        }
    }
}

/// Sweep rotations over `window`, returning the first with zero conflicts
/// or else the one with the lowest closest-point error.
///
/// The unrotated state is evaluated first and kept on ties.
pub fn refine_rotation(state: &ScanData, target: &ScanData, window: &AngularWindow) -> RotationOutcome {
    sweep_rotation(state, target, &target.positive_index(), window)
}

/// [`refine_rotation`] with a prebuilt index of the target's positives.
pub(super) fn sweep_rotation(
    state: &ScanData,
    target: &ScanData,
    index: &IntervalIndex,
    window: &AngularWindow,
) -> RotationOutcome {
    let mut best = RotationOutcome::evaluate(state.clone(), target, index, RigidTransform::identity());
    if best.conflicts.is_zero() {
        return best;
    }
    let Some(pivot) = state.positive_centroid() else {
        return best;
    };

    for i in 0..window.steps() {
        let angle = window.angle_at(i);
        if angle.abs() <= GEOM_EPSILON {
            continue;
        }
        let transform = RigidTransform::rotation(angle, pivot);
        let candidate = RotationOutcome::evaluate(state.apply_transform(&transform), target, index, transform);
        if candidate.conflicts.is_zero() {
            trace!("Rotation {:.4} rad resolves every conflict", angle);
            return candidate;
        }
        if candidate.error < best.error {
            best = candidate;
        }
    }
    best
}

/// Golden-section search for the rotation minimizing the closest-point
/// error inside `[window.min, window.max]`.
///
/// The result replaces the unrotated state only if it has zero conflicts
/// or a lower error.
pub fn refine_rotation_golden(
    state: &ScanData,
    target: &ScanData,
    window: &AngularWindow,
    tolerance: f64,
) -> RotationOutcome {
    golden_rotation(state, target, &target.positive_index(), window, tolerance)
}

/// [`refine_rotation_golden`] with a prebuilt index of the target's positives.
pub(super) fn golden_rotation(
    state: &ScanData,
    target: &ScanData,
    index: &IntervalIndex,
    window: &AngularWindow,
    tolerance: f64,
) -> RotationOutcome {
    let baseline = RotationOutcome::evaluate(state.clone(), target, index, RigidTransform::identity());
    if baseline.conflicts.is_zero() {
        return baseline;
    }
    let Some(pivot) = state.positive_centroid() else {
        return baseline;
    };

    let error_at = |angle: f64| {
        state
            .apply_transform(&RigidTransform::rotation(angle, pivot))
            .sum_closest_point_error_to(index)
    };

    let (mut a, mut b) = (window.min, window.max);
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = error_at(c);
    let mut fd = error_at(d);

    let mut iterations = 0;
    while b - a > tolerance && iterations < MAX_GOLDEN_ITERATIONS {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = error_at(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = error_at(d);
        }
        iterations += 1;
    }

    let angle = 0.5 * (a + b);
    let transform = RigidTransform::rotation(angle, pivot);
    let candidate = RotationOutcome::evaluate(state.apply_transform(&transform), target, index, transform);
    trace!(
        "Golden section: {:.5} rad after {} iterations, error {:.4} (baseline {:.4})",
        angle, iterations, candidate.error, baseline.error
    );
    if candidate.conflicts.is_zero() || candidate.error < baseline.error {
        candidate
    } else {
        baseline
    }
}
