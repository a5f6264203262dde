//! Main RekhaConfig.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Canvas;
use crate::matching::AlignmentConfig;
use crate::topology::EditCosts;

use super::error::ConfigLoadError;
use super::scan::ScanSection;
use super::topology::TopologySection;

/// Full rekha-align configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RekhaConfig {
    /// Scan sampling settings
    #[serde(default)]
    pub scan: ScanSection,

    /// Alignment search settings
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Topology settings
    #[serde(default)]
    pub topology: TopologySection,
}

impl RekhaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/rekha.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/rekha.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate every section
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values the algorithms cannot run with
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.scan.validate()?;
        self.alignment.validate()?;
        self.topology.validate()
    }

    /// Canvas bounds from the scan section
    pub fn canvas(&self) -> Canvas {
        self.scan.canvas()
    }

    /// Tree edit costs from the topology section
    pub fn edit_costs(&self) -> EditCosts {
        self.topology.edit_costs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{Heuristic, RefinementMethod};

    #[test]
    fn test_default_config() {
        let config = RekhaConfig::default();
        assert_eq!(config.scan.gap, 20.0);
        assert_eq!(config.canvas(), Canvas::new(800.0, 600.0));
        assert_eq!(config.alignment.step_budget, 100);
        assert_eq!(config.edit_costs(), EditCosts::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = RekhaConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = RekhaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.scan.canvas_width, config.scan.canvas_width);
        assert_eq!(parsed.alignment.heuristic, config.alignment.heuristic);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "scan:\n  gap: 5.0\nalignment:\n  heuristic: random\n  refinement_method: golden_section\n";
        let config = RekhaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.scan.gap, 5.0);
        assert_eq!(config.scan.canvas_height, 600.0);
        assert_eq!(config.alignment.heuristic, Heuristic::Random);
        assert_eq!(config.alignment.refinement_method, RefinementMethod::GoldenSection);
        assert_eq!(config.topology.edit_costs.relabel, 1);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            RekhaConfig::from_yaml("scan: [1, 2"),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let cases = [
            ("alignment:\n  random_radius: -1.0\n", "alignment.random_radius"),
            ("alignment:\n  random_radius: .nan\n", "alignment.random_radius"),
            ("alignment:\n  golden_tolerance: 0.0\n", "alignment.golden_tolerance"),
            (
                "alignment:\n  refinement_window:\n    min: -0.1\n    max: 0.1\n    resolution: 1.0e-12\n",
                "alignment.refinement_window",
            ),
            (
                "alignment:\n  rotation_window:\n    min: 1.0\n    max: -1.0\n    resolution: 0.1\n",
                "alignment.rotation_window",
            ),
            ("scan:\n  gap: 0.0\n", "scan.gap"),
            ("topology:\n  flatten_tolerance: -0.5\n", "topology.flatten_tolerance"),
        ];
        for (yaml, expected) in cases {
            match RekhaConfig::from_yaml(yaml) {
                Err(ConfigLoadError::Invalid { field, .. }) => assert_eq!(field, expected, "{yaml}"),
                other => panic!("{yaml}: expected an invalid `{expected}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RekhaConfig::default().validate().is_ok());
        assert!(crate::matching::AlignmentConfig::fast().validate().is_ok());
        assert!(crate::matching::AlignmentConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RekhaConfig::load(Path::new("does/not/exist.yaml")),
            Err(ConfigLoadError::Io(_))
        ));
    }
}
