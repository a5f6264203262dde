//! Region topology section.

use serde::{Deserialize, Serialize};

use crate::topology::EditCosts;

use super::defaults;
use super::error::ConfigLoadError;

/// Tree construction and comparison settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopologySection {
    /// Tree edit costs
    #[serde(default)]
    pub edit_costs: EditCosts,

    /// Max deviation when flattening curved outlines
    #[serde(default = "defaults::flatten_tolerance")]
    pub flatten_tolerance: f64,
}

impl TopologySection {
    /// The flattening tolerance must be finite and positive.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        ConfigLoadError::require_positive("topology.flatten_tolerance", self.flatten_tolerance)
    }
}

impl Default for TopologySection {
    fn default() -> Self {
        Self {
            edit_costs: EditCosts::default(),
            flatten_tolerance: defaults::flatten_tolerance(),
        }
    }
}
