//! # Rekha
//!
//! Rigid alignment of line-scan samplings of planar regions, and comparison
//! of region topology through containment trees.
//!
//! ## Overview
//!
//! A **scan** samples a region along parallel lines at some angle and
//! spacing. Each line is split into **positive** intervals (inside the
//! region) and **negative** intervals (outside). Two scans of the same
//! region taken at different angles disagree wherever a positive of one
//! crosses a negative of the other; these crossings are **conflicts**.
//!
//! [`AlignmentSearch`] finds a rigid transform that drives the conflicts
//! between two scans towards zero:
//!
//! - **Coarse pairing**: match the longest convex-hull diagonals
//! - **Rotation sweep**: rotate about the positive centroid
//! - **Local search**: translate by conflict-derived heuristics, refining
//!   the rotation after each move
//!
//! Independently, [`RegionTree`] builds the containment tree of a region
//! (solids, holes inside solids, islands inside holes) and
//! [`tree_edit_distance`] compares two such trees regardless of child order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rekha_align::{AlignmentSearch, Canvas, Outline, RegionOutline, ScanData};
//!
//! let region = [RegionOutline::solid(Outline::rectangle(100.0, 100.0, 300.0, 200.0))];
//! let first = ScanData::from_outlines(&region, 0.0, 20.0, Canvas::default())?;
//! let second = ScanData::from_outlines(&region, 0.6, 20.0, Canvas::default())?;
//!
//! let result = AlignmentSearch::with_defaults().align(&first, &second);
//! println!("{:?}: {} conflicts left", result.outcome(), result.residual);
//! ```
//!
//! ## Coordinate System
//!
//! Canvas pixel units with the origin at one corner:
//! - X: along the canvas width
//! - Y: along the canvas height
//! - Angles: radians, CCW positive from +X; scan line angles live in `[0, π)`

#![warn(missing_docs)]

// Geometric primitives
pub mod core;

// Intervals and Allen relations
pub mod interval;

// Convex hull utilities
pub mod hull;

// Nearest-neighbour indexes
pub mod spatial;

// Scan data
pub mod scan;

// Alignment search
pub mod matching;

// Containment trees and tree edit distance
pub mod topology;

// YAML configuration
pub mod config;

pub mod error;

// Re-export commonly used types
pub use core::{Canvas, Outline, PathEl, Point2D, RegionOutline, RigidTransform};

pub use interval::{AllenRelation, Interval, IntervalKind, RelationSet};

pub use scan::{ConflictCount, ScanData, ScanLines};

pub use matching::{
    AlignmentConfig, AlignmentResult, AlignmentSearch, AngularWindow, BenchmarkInstance,
    Heuristic, MatchOutcome, RefinementMethod, align_batch, run_benchmarks,
};

pub use topology::{EditCosts, NodeId, RegionTree, tree_edit_distance};

pub use config::{ConfigLoadError, RekhaConfig};

pub use error::{Error, Result, ScanDataError, TopologyError};
