//! Three-stage alignment pipeline.

use log::{debug, info};

use super::coarse::coarse_pairing;
use super::config::AlignmentConfig;
use super::local_search::{LocalSearchOutcome, local_search};
use super::rotation::{RotationOutcome, refine_rotation};
use super::types::AlignmentResult;
use crate::config::ConfigLoadError;
use crate::core::RigidTransform;
use crate::scan::ScanData;

/// Aligns a source scan onto a target scan.
///
/// Stages:
/// 1. Coarse pairing of the longest hull diagonals
/// 2. Wide rotation sweep about the positive centroid
/// 3. Heuristic local search with narrow rotation refinement
///
/// The search is stateless between calls, so one instance can serve many
/// pairs (see [`align_batch`](super::align_batch)).
#[derive(Clone, Debug, Default)]
pub struct AlignmentSearch {
    config: AlignmentConfig,
}

impl AlignmentSearch {
    /// Search with the given configuration, rejected if it fails
    /// [`AlignmentConfig::validate`].
    pub fn new(config: AlignmentConfig) -> Result<Self, ConfigLoadError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Search with [`AlignmentConfig::default`].
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Active configuration.
    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Stage 1 only.
    pub fn coarse(&self, source: &ScanData, target: &ScanData) -> Vec<RigidTransform> {
        coarse_pairing(source, target)
    }

    /// Stage 2 only, over the configured wide window.
    pub fn rotate(&self, state: &ScanData, target: &ScanData) -> RotationOutcome {
        refine_rotation(state, target, &self.config.rotation_window)
    }

    /// Stage 3 only.
    pub fn refine(&self, state: &ScanData, target: &ScanData) -> LocalSearchOutcome {
        local_search(state, target, &self.config)
    }

    /// Run the full pipeline.
    pub fn align(&self, source: &ScanData, target: &ScanData) -> AlignmentResult {
        let initial = source.count_conflicts(target);

        let coarse = self.coarse(source, target);
        if coarse.is_empty() {
            info!("No hull diagonal to pair, skipping alignment");
            return AlignmentResult::no_match(initial);
        }
        let paired = RigidTransform::chain(&coarse);
        let state = source.apply_transform(&paired);
        debug!(
            "Coarse pairing: theta={:.4} t=({:.2}, {:.2}), {} conflicts",
            paired.theta,
            paired.tx,
            paired.ty,
            state.count_conflicts(target)
        );

        let rotated = self.rotate(&state, target);
        let transform = paired.then(&rotated.transform);
        debug!("Wide rotation: {} conflicts", rotated.conflicts);

        if rotated.conflicts.is_zero() {
            info!("Aligned without local search");
            let trajectory = rotated.scan.positive_centroid().into_iter().collect();
            return AlignmentResult {
                transform: Some(transform),
                coarse,
                residual: rotated.conflicts,
                initial,
                steps_used: 0,
                aligned: Some(rotated.scan),
                trajectory,
            };
        }

        let searched = self.refine(&rotated.scan, target);
        let transform = transform.then(&searched.transform);
        info!(
            "Alignment finished: {} -> {} conflicts in {} steps",
            initial, searched.conflicts, searched.steps_used
        );

        AlignmentResult {
            transform: Some(transform),
            coarse,
            residual: searched.conflicts,
            initial,
            steps_used: searched.steps_used,
            aligned: Some(searched.scan),
            trajectory: searched.trajectory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Canvas, Outline, Point2D, RegionOutline};
    use crate::matching::{Heuristic, MatchOutcome};

    fn l_shape(angle: f64) -> ScanData {
        let outlines = [RegionOutline::solid(Outline::polygon(&[
            Point2D::new(200.0, 150.0),
            Point2D::new(500.0, 150.0),
            Point2D::new(500.0, 230.0),
            Point2D::new(300.0, 230.0),
            Point2D::new(300.0, 400.0),
            Point2D::new(200.0, 400.0),
        ]))];
        ScanData::from_outlines(&outlines, angle, 10.0, Canvas::default()).unwrap()
    }

    #[test]
    fn test_identical_scans_align_exactly() {
        let s = l_shape(0.0);
        let result = AlignmentSearch::with_defaults().align(&s, &s);
        assert_eq!(result.outcome(), MatchOutcome::Exact);
        assert_eq!(result.steps_used, 0);
        assert!(result.transform.unwrap().is_identity(1e-9, 1e-9));
    }

    #[test]
    fn test_empty_source_is_no_match() {
        let empty = ScanData::from_outlines(&[], 0.0, 10.0, Canvas::default()).unwrap();
        let result = AlignmentSearch::with_defaults().align(&empty, &l_shape(0.0));
        assert_eq!(result.outcome(), MatchOutcome::NoMatch);
        assert!(result.aligned.is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AlignmentConfig::default().with_heuristic(Heuristic::Random);
        config.random_radius = -1.0;
        assert!(matches!(
            AlignmentSearch::new(config),
            Err(ConfigLoadError::Invalid { .. })
        ));
        assert!(AlignmentSearch::new(AlignmentConfig::thorough()).is_ok());
    }

    #[test]
    fn test_aligned_scan_matches_transform() {
        let target = l_shape(0.0);
        let source = l_shape(0.4);
        let search = AlignmentSearch::new(AlignmentConfig::fast()).unwrap();
        let result = search.align(&source, &target);
        let transform = result.transform.unwrap();
        let aligned = result.aligned.unwrap();
        let replay = source.apply_transform(&transform);
        let a = replay.positive_centroid().unwrap();
        let b = aligned.positive_centroid().unwrap();
        assert!(a.distance(&b) < 1e-6);
        assert!(result.steps_used <= search.config().step_budget);
    }
}
