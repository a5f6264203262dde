//! Configuration loading for rekha-align.
//!
//! Everything lives in one YAML file. Each section and field falls back to a
//! default when missing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rekha_align::config::RekhaConfig;
//!
//! // Load from default path (configs/rekha.yaml), or defaults if absent
//! let config = RekhaConfig::load_default()?;
//!
//! let search = AlignmentSearch::new(config.alignment.clone())?;
//! let scan = ScanData::from_outlines(&outlines, config.scan.angle, config.scan.gap, config.canvas())?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`ScanSection`] | Canvas size, line angle and spacing |
//! | [`AlignmentConfig`](crate::matching::AlignmentConfig) | Heuristic, budgets, angular windows |
//! | [`TopologySection`] | Edit costs, curve flattening |
//!
//! ## Example YAML
//!
//! ```yaml
//! scan:
//!   canvas_width: 800
//!   canvas_height: 600
//!   gap: 20.0
//!   angle: 0.0            # radians
//!
//! alignment:
//!   heuristic: min_distance
//!   step_budget: 100
//!   refinement_method: golden_section
//!
//! topology:
//!   edit_costs: { insert: 1, delete: 1, relabel: 1 }
//! ```

mod defaults;
mod error;
mod rekha;
mod scan;
mod topology;

pub use error::ConfigLoadError;
pub use rekha::RekhaConfig;
pub use scan::ScanSection;
pub use topology::TopologySection;
