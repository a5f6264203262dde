//! Scan sampling section.

use serde::{Deserialize, Serialize};

use crate::core::Canvas;

use super::defaults;
use super::error::ConfigLoadError;

/// How regions are sampled into scans
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanSection {
    /// Canvas width (pixels)
    #[serde(default = "defaults::canvas_width")]
    pub canvas_width: f64,

    /// Canvas height (pixels)
    #[serde(default = "defaults::canvas_height")]
    pub canvas_height: f64,

    /// Spacing between scan lines
    #[serde(default = "defaults::gap")]
    pub gap: f64,

    /// Scan line angle (radians)
    #[serde(default)]
    pub angle: f64,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            gap: 20.0,
            angle: 0.0,
        }
    }
}

impl ScanSection {
    /// Canvas bounds
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
    }

    /// Canvas size and gap must be finite and positive; the angle finite.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        ConfigLoadError::require_positive("scan.canvas_width", self.canvas_width)?;
        ConfigLoadError::require_positive("scan.canvas_height", self.canvas_height)?;
        ConfigLoadError::require_positive("scan.gap", self.gap)?;
        if !self.angle.is_finite() {
            return Err(ConfigLoadError::Invalid {
                field: "scan.angle",
                reason: format!("expected a finite angle, got {}", self.angle),
            });
        }
        Ok(())
    }
}
