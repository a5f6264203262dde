//! Scan-line intervals and Allen's interval algebra.
//!
//! An [`Interval`] is a directed sub-segment of one scan line. Intervals on
//! lines of the same orientation can be compared with
//! [`Interval::allen_relation`], which yields one of the thirteen
//! [`AllenRelation`] codes.

mod relation;
mod segment;

pub use relation::{AllenRelation, RelationSet};
pub use segment::Interval;

use serde::{Deserialize, Serialize};

/// Which side of the region boundary an interval lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalKind {
    /// Inside the region
    Positive,
    /// Outside the region
    Negative,
}
