//! Stage 3: heuristic local search.
//!
//! Each iteration refines the rotation inside the narrow window, then asks
//! the configured [`Heuristic`] for a translation. The search stops when the
//! conflicts reach zero, the step budget is spent, or the heuristic finds no
//! move that leads somewhere new.
//!
//! Rotations pivot on the positive centroid, so only translations move the
//! centroid. Every centroid the search stands on is remembered, and moves
//! that would return within [`VISITED_TOLERANCE`] of one are rejected.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{AlignmentConfig, Heuristic, RefinementMethod};
use super::rotation::{RotationOutcome, golden_rotation, sweep_rotation};
use crate::core::{Point2D, RigidTransform};
use crate::scan::{ConflictCount, ScanData};
use crate::spatial::IntervalIndex;

/// Two centroids closer than this count as the same place.
pub const VISITED_TOLERANCE: f64 = 0.01;

/// Translations shorter than this are not worth taking.
pub const MIN_MOVE: f64 = 1e-4;

/// Centroids the search has already stood on.
#[derive(Clone, Debug)]
pub struct VisitedCentroids {
    points: Vec<Point2D>,
    tolerance: f64,
}

impl VisitedCentroids {
    /// Empty set with the given matching tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self {
            points: Vec::new(),
            tolerance,
        }
    }

    /// Whether `p` lies within tolerance of a recorded centroid.
    pub fn contains(&self, p: &Point2D) -> bool {
        self.points.iter().any(|q| q.distance(p) < self.tolerance)
    }

    /// Record `p`. Returns `false` if it was already present.
    pub fn insert(&mut self, p: Point2D) -> bool {
        if self.contains(&p) {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Number of recorded centroids.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for VisitedCentroids {
    fn default() -> Self {
        Self::new(VISITED_TOLERANCE)
    }
}

/// Result of a local search run.
#[derive(Clone, Debug)]
pub struct LocalSearchOutcome {
    /// Final state.
    pub scan: ScanData,
    /// Transform from the starting state to `scan`.
    pub transform: RigidTransform,
    /// Conflicts of `scan` against the target.
    pub conflicts: ConflictCount,
    /// Translations taken.
    pub steps_used: usize,
    /// Positive centroid after each refinement.
    pub trajectory: Vec<Point2D>,
}

/// Local search state for one source/target pair.
pub struct LocalSearch<'a> {
    config: &'a AlignmentConfig,
    target: &'a ScanData,
    target_index: IntervalIndex,
    visited: VisitedCentroids,
    rng: StdRng,
}

impl<'a> LocalSearch<'a> {
    /// Fresh search towards `target`.
    pub fn new(config: &'a AlignmentConfig, target: &'a ScanData) -> Self {
        Self {
            config,
            target,
            target_index: target.positive_index(),
            visited: VisitedCentroids::default(),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Run from `start` until zero conflicts, budget exhaustion, or no move.
    pub fn run(mut self, start: &ScanData) -> LocalSearchOutcome {
        let mut state = start.clone();
        let mut transform = RigidTransform::identity();
        let mut trajectory = Vec::new();
        let mut steps_used = 0;

        let conflicts = loop {
            let refined = self.refine(&state);
            transform = transform.then(&refined.transform);
            state = refined.scan;
            if let Some(c) = state.positive_centroid() {
                trajectory.push(c);
            }

            let conflicts = refined.conflicts;
            trace!("Step {}: {} conflicts", steps_used, conflicts);
            if conflicts.is_zero() {
                break conflicts;
            }
            if steps_used >= self.config.step_budget {
                debug!("Step budget of {} spent", self.config.step_budget);
                break conflicts;
            }
            let Some(delta) = self.next_move(&state, conflicts) else {
                debug!("{:?} found no new move after {} steps", self.config.heuristic, steps_used);
                break conflicts;
            };

            let step = RigidTransform::translation_by(delta);
            state = state.apply_transform(&step);
            transform = transform.then(&step);
            steps_used += 1;
        };

        LocalSearchOutcome {
            scan: state,
            transform,
            conflicts,
            steps_used,
            trajectory,
        }
    }

    fn refine(&self, state: &ScanData) -> RotationOutcome {
        let window = &self.config.refinement_window;
        match self.config.refinement_method {
            RefinementMethod::Grid => sweep_rotation(state, self.target, &self.target_index, window),
            RefinementMethod::GoldenSection => golden_rotation(
                state,
                self.target,
                &self.target_index,
                window,
                self.config.golden_tolerance,
            ),
        }
    }

    /// Pick the next translation, or `None` to stop.
    fn next_move(&mut self, state: &ScanData, current: ConflictCount) -> Option<Point2D> {
        let centroid = state.positive_centroid()?;
        self.visited.insert(centroid);

        match self.config.heuristic {
            Heuristic::MinDistance => self.extreme_move(state, centroid, false),
            Heuristic::MaxDistance => self.extreme_move(state, centroid, true),
            Heuristic::AvgDistance => self.average_move(state, centroid),
            Heuristic::Random => self.random_move(state, centroid, current),
        }
    }

    /// Displacements that would pull each conflict onto a positive.
    ///
    /// For a crossing of the state's positive with a target negative, the
    /// state should move the crossing onto the target's positives. For the
    /// opposite direction the state should move its nearest positive onto
    /// the crossing.
    fn conflict_deltas(&self, state: &ScanData) -> Vec<Point2D> {
        let mut deltas = Vec::new();
        for p in state.conflict_points(self.target) {
            if let Some(q) = self.target_index.closest_point(&p) {
                deltas.push(q - p);
            }
        }
        let state_index = state.positive_index();
        for p in self.target.conflict_points(state) {
            if let Some(q) = state_index.closest_point(&p) {
                deltas.push(p - q);
            }
        }
        deltas
    }

    fn is_new_place(&self, centroid: Point2D, delta: Point2D) -> bool {
        delta.length() >= MIN_MOVE && !self.visited.contains(&(centroid + delta))
    }

    fn extreme_move(&self, state: &ScanData, centroid: Point2D, largest: bool) -> Option<Point2D> {
        let candidates = self
            .conflict_deltas(state)
            .into_iter()
            .filter(|d| self.is_new_place(centroid, *d));
        if largest {
            candidates.max_by(|a, b| a.length().total_cmp(&b.length()))
        } else {
            candidates.min_by(|a, b| a.length().total_cmp(&b.length()))
        }
    }

    fn average_move(&self, state: &ScanData, centroid: Point2D) -> Option<Point2D> {
        let deltas = self.conflict_deltas(state);
        let delta = Point2D::mean(&deltas)?;
        self.is_new_place(centroid, delta).then_some(delta)
    }

    fn random_move(&mut self, state: &ScanData, centroid: Point2D, current: ConflictCount) -> Option<Point2D> {
        let radius = self.config.random_radius;
        if !(radius.is_finite() && radius > 0.0) {
            debug!("Random radius {} gives no moves", radius);
            return None;
        }
        for _ in 0..self.config.random_trials {
            let delta = Point2D::new(
                self.rng.random_range(-radius..=radius),
                self.rng.random_range(-radius..=radius),
            );
            if !self.is_new_place(centroid, delta) {
                continue;
            }
            let moved = state.apply_transform(&RigidTransform::translation_by(delta));
            if self.refine(&moved).conflicts < current {
                return Some(delta);
            }
        }
        None
    }
}

/// Run a local search from `start` towards `target`.
pub fn local_search(start: &ScanData, target: &ScanData, config: &AlignmentConfig) -> LocalSearchOutcome {
    LocalSearch::new(config, target).run(start)
}
