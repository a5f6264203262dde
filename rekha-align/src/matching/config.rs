//! Alignment search configuration.

use serde::{Deserialize, Serialize};

use crate::config::ConfigLoadError;
use crate::core::deg_to_rad;

/// Most rotations a single window may sweep.
pub const MAX_WINDOW_STEPS: usize = 100_000;

/// Translation heuristic used by the local search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Move by the smallest conflict-to-positive displacement not yet visited.
    #[default]
    MinDistance,
    /// Move by the largest conflict-to-positive displacement not yet visited.
    MaxDistance,
    /// Move by the mean displacement over all conflicts.
    AvgDistance,
    /// Try random small translations, keep the first that helps.
    Random,
}

/// How the rotation is refined inside the local search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementMethod {
    /// Fixed-step sweep over the refinement window.
    #[default]
    Grid,
    /// Golden-section search inside the refinement window.
    GoldenSection,
}

/// Angular search window in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngularWindow {
    /// Smallest rotation tried
    pub min: f64,
    /// Largest rotation tried
    pub max: f64,
    /// Step between rotations
    pub resolution: f64,
}

impl AngularWindow {
    /// Window `[min, max]` with the given step, all in degrees.
    pub fn from_degrees(min: f64, max: f64, resolution: f64) -> Self {
        Self {
            min: deg_to_rad(min),
            max: deg_to_rad(max),
            resolution: deg_to_rad(resolution),
        }
    }

    /// Wide initial sweep: ±180° at 1°.
    pub fn wide() -> Self {
        Self::from_degrees(-180.0, 180.0, 1.0)
    }

    /// Narrow refinement sweep: ±5° at 0.1°.
    pub fn narrow() -> Self {
        Self::from_degrees(-5.0, 5.0, 0.1)
    }

    /// Number of steps in the sweep (inclusive of both ends), capped at
    /// [`MAX_WINDOW_STEPS`].
    pub fn steps(&self) -> usize {
        let span = self.max - self.min;
        if !(self.resolution > 0.0 && span.is_finite() && span >= 0.0) {
            return 1;
        }
        let steps = (span / self.resolution).round();
        if steps >= MAX_WINDOW_STEPS as f64 {
            MAX_WINDOW_STEPS
        } else {
            steps as usize + 1
        }
    }

    /// Bounds finite and ordered, resolution positive and coarse enough
    /// to stay within [`MAX_WINDOW_STEPS`].
    pub fn validate(&self, field: &'static str) -> Result<(), ConfigLoadError> {
        let invalid = |reason: String| Err(ConfigLoadError::Invalid { field, reason });
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return invalid(format!("bounds [{}, {}] are not a finite range", self.min, self.max));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return invalid(format!("resolution {} is not above zero", self.resolution));
        }
        if (self.max - self.min) / self.resolution >= MAX_WINDOW_STEPS as f64 {
            return invalid(format!(
                "resolution {} needs more than {} steps",
                self.resolution, MAX_WINDOW_STEPS
            ));
        }
        Ok(())
    }

    /// Rotation at step `i`.
    #[inline]
    pub fn angle_at(&self, i: usize) -> f64 {
        self.min + i as f64 * self.resolution
    }
}

/// Configuration for [`AlignmentSearch`](super::AlignmentSearch).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Translation heuristic for the local search.
    #[serde(default)]
    pub heuristic: Heuristic,

    /// Maximum number of local-search translations.
    #[serde(default = "default_step_budget")]
    pub step_budget: usize,

    /// Window for the initial rotation sweep after coarse pairing.
    #[serde(default = "AngularWindow::wide")]
    pub rotation_window: AngularWindow,

    /// Window for rotation refinement inside the local search.
    #[serde(default = "AngularWindow::narrow")]
    pub refinement_window: AngularWindow,

    /// Grid sweep or golden-section search for local refinement.
    #[serde(default)]
    pub refinement_method: RefinementMethod,

    /// Bracket width (radians) at which golden-section search stops.
    #[serde(default = "default_golden_tolerance")]
    pub golden_tolerance: f64,

    /// Translations the random heuristic tries per step.
    #[serde(default = "default_random_trials")]
    pub random_trials: usize,

    /// Largest per-axis translation the random heuristic tries.
    #[serde(default = "default_random_radius")]
    pub random_radius: f64,

    /// Seed for the random heuristic, so runs are reproducible.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_step_budget() -> usize {
    100
}

fn default_golden_tolerance() -> f64 {
    deg_to_rad(0.01)
}

fn default_random_trials() -> usize {
    20
}

fn default_random_radius() -> f64 {
    5.0
}

fn default_seed() -> u64 {
    0x5eed
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            step_budget: default_step_budget(),
            rotation_window: AngularWindow::wide(),
            refinement_window: AngularWindow::narrow(),
            refinement_method: RefinementMethod::default(),
            golden_tolerance: default_golden_tolerance(),
            random_trials: default_random_trials(),
            random_radius: default_random_radius(),
            seed: default_seed(),
        }
    }
}

impl AlignmentConfig {
    /// Small budget and coarse windows for quick checks.
    pub fn fast() -> Self {
        Self {
            step_budget: 20,
            rotation_window: AngularWindow::from_degrees(-180.0, 180.0, 2.0),
            refinement_window: AngularWindow::from_degrees(-3.0, 3.0, 0.5),
            ..Default::default()
        }
    }

    /// Large budget and golden-section refinement.
    pub fn thorough() -> Self {
        Self {
            step_budget: 500,
            refinement_method: RefinementMethod::GoldenSection,
            random_trials: 50,
            ..Default::default()
        }
    }

    /// Reject settings that would panic or never finish.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.rotation_window.validate("alignment.rotation_window")?;
        self.refinement_window.validate("alignment.refinement_window")?;
        ConfigLoadError::require_positive("alignment.golden_tolerance", self.golden_tolerance)?;
        ConfigLoadError::require_positive("alignment.random_radius", self.random_radius)?;
        Ok(())
    }

    /// Builder: set the heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Builder: set the step budget.
    pub fn with_step_budget(mut self, step_budget: usize) -> Self {
        self.step_budget = step_budget;
        self
    }

    /// Builder: set the refinement method.
    pub fn with_refinement(mut self, method: RefinementMethod) -> Self {
        self.refinement_method = method;
        self
    }

    /// Builder: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
