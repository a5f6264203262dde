//! Alignment result types.

use crate::core::{Point2D, RigidTransform};
use crate::scan::{ConflictCount, ScanData};

/// Result of one alignment run.
#[derive(Clone, Debug)]
pub struct AlignmentResult {
    /// Total transform mapping the source scan onto the target.
    /// `None` when coarse pairing found no usable hull diagonal.
    pub transform: Option<RigidTransform>,
    /// Coarse pairing output: `[rotation, translation]`, or empty.
    pub coarse: Vec<RigidTransform>,
    /// Conflict count after alignment (zero for an exact match).
    pub residual: ConflictCount,
    /// Conflict count of the unaligned input pair.
    pub initial: ConflictCount,
    /// Local-search translations applied.
    pub steps_used: usize,
    /// The source scan after applying `transform`.
    pub aligned: Option<ScanData>,
    /// Positive centroid of the source at every local-search step.
    pub trajectory: Vec<Point2D>,
}

/// Classification of an alignment run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Zero residual conflicts.
    Exact,
    /// Search ended with conflicts left (local optimum or budget spent).
    BestEffort,
    /// The aligned scans do not overlap at all.
    Incompatible,
    /// No usable hull diagonal: nothing to align.
    NoMatch,
}

impl AlignmentResult {
    /// A run that stopped at coarse pairing.
    pub fn no_match(initial: ConflictCount) -> Self {
        Self {
            transform: None,
            coarse: Vec::new(),
            residual: initial,
            initial,
            steps_used: 0,
            aligned: None,
            trajectory: Vec::new(),
        }
    }

    /// Outcome classification.
    pub fn outcome(&self) -> MatchOutcome {
        if self.transform.is_none() {
            MatchOutcome::NoMatch
        } else if self.residual.is_zero() {
            MatchOutcome::Exact
        } else if self.residual.is_incompatible() {
            MatchOutcome::Incompatible
        } else {
            MatchOutcome::BestEffort
        }
    }

    /// Whether the run ended with zero conflicts.
    pub fn is_exact(&self) -> bool {
        self.outcome() == MatchOutcome::Exact
    }

    /// Residual minus the conflicts of the unaligned pair.
    ///
    /// Negative values mean alignment removed conflicts. `None` when either
    /// count is `Incompatible`.
    pub fn search_error(&self) -> Option<i64> {
        match (self.residual.count(), self.initial.count()) {
            (Some(after), Some(before)) => Some(after as i64 - before as i64),
            _ => None,
        }
    }
}
