//! Scan-to-scan alignment.
//!
//! ```text
//!   source, target
//!        │
//!        ▼
//!   coarse_pairing ──► [rotation, translation]   (empty: NoMatch)
//!        │
//!        ▼
//!   refine_rotation (wide window)  ──► zero conflicts? done
//!        │
//!        ▼
//!   LocalSearch: refine (narrow) → heuristic translation → repeat
//!        │
//!        ▼
//!   AlignmentResult
//! ```
//!
//! Conflicts are crossings of one scan's positives with the other scan's
//! negatives. A perfect alignment has none.

mod batch;
mod coarse;
mod config;
mod icp;
mod local_search;
mod rotation;
mod search;
mod types;

pub use batch::{BenchmarkInstance, BenchmarkRecord, align_batch, benchmark_rng, run_benchmarks};
pub use coarse::coarse_pairing;
pub use config::{AlignmentConfig, AngularWindow, Heuristic, MAX_WINDOW_STEPS, RefinementMethod};
pub use icp::{IcpConfig, IcpResult, icp_points, icp_scans};
pub use local_search::{
    LocalSearch, LocalSearchOutcome, MIN_MOVE, VISITED_TOLERANCE, VisitedCentroids, local_search,
};
pub use rotation::{RotationOutcome, refine_rotation, refine_rotation_golden};
pub use search::AlignmentSearch;
pub use types::{AlignmentResult, MatchOutcome};
