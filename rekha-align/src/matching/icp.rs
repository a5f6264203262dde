//! Point-to-point ICP on positive endpoints.
//!
//! Not part of the alignment pipeline. Useful as a polishing step or a
//! baseline to compare the conflict-driven search against.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{Point2D, RigidTransform};
use crate::scan::ScanData;
use crate::spatial::PointIndex;

/// ICP settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IcpConfig {
    /// Iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Stop once the mean correspondence distance improves by less than this.
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
}

fn default_max_iterations() -> usize {
    50
}

fn default_convergence_threshold() -> f64 {
    1e-6
}

impl Default for IcpConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
        }
    }
}

/// ICP result.
#[derive(Clone, Debug)]
pub struct IcpResult {
    /// Transform mapping the source points onto the target.
    pub transform: RigidTransform,
    /// Mean distance to the nearest target point after the last iteration.
    pub mean_error: f64,
    /// Iterations run.
    pub iterations: usize,
    /// Whether the improvement dropped below the threshold.
    pub converged: bool,
}

/// Best rigid transform for fixed correspondences `(from, to)`.
fn fit_pairs(pairs: &[(Point2D, Point2D)]) -> Option<RigidTransform> {
    let from_mean = Point2D::mean(pairs.iter().map(|(a, _)| a))?;
    let to_mean = Point2D::mean(pairs.iter().map(|(_, b)| b))?;

    let (mut sum_dot, mut sum_cross) = (0.0, 0.0);
    for (a, b) in pairs {
        let a = *a - from_mean;
        let b = *b - to_mean;
        sum_dot += a.dot(&b);
        sum_cross += a.cross(&b);
    }
    let theta = sum_cross.atan2(sum_dot);

    let rotated = RigidTransform::new(theta, 0.0, 0.0).apply(from_mean);
    let t = to_mean - rotated;
    Some(RigidTransform::new(theta, t.x, t.y))
}

/// Align `source` point set onto `target` point set.
///
/// Returns `None` if either set is empty.
pub fn icp_points(source: &[Point2D], target: &[Point2D], config: &IcpConfig) -> Option<IcpResult> {
    if source.is_empty() || target.is_empty() {
        return None;
    }

    let target_tree = PointIndex::new(target);
    let mut transform = RigidTransform::identity();
    let mut previous = f64::INFINITY;
    let mut mean_error = f64::INFINITY;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        let mut pairs: Vec<(Point2D, Point2D)> = Vec::with_capacity(source.len());
        let mut total = 0.0;
        for p in source.iter().map(|p| transform.apply(*p)) {
            if let Some((q, distance)) = target_tree.nearest(&p) {
                pairs.push((p, q));
                total += distance;
            }
        }
        mean_error = total / pairs.len() as f64;
        trace!("ICP iteration {}: mean error {:.6}", iterations, mean_error);

        if previous - mean_error < config.convergence_threshold {
            converged = true;
            break;
        }
        previous = mean_error;

        let step = fit_pairs(&pairs)?;
        transform = transform.then(&step);
        iterations += 1;
    }

    Some(IcpResult {
        transform,
        mean_error,
        iterations,
        converged,
    })
}

/// ICP on the positive endpoints of two scans.
pub fn icp_scans(source: &ScanData, target: &ScanData, config: &IcpConfig) -> Option<IcpResult> {
    icp_points(&source.positive_points(), &target.positive_points(), config)
}
