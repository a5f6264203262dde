//! Conflict count between two scans.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of positive/negative crossings between two scans.
///
/// `Incompatible` sorts after every finite count and stands for "no
/// positive interval of one scan meets a positive interval of the other",
/// where no count is meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConflictCount {
    /// Finite number of conflicts
    Conflicts(usize),
    /// No spatial overlap to evaluate
    Incompatible,
}

impl ConflictCount {
    /// A perfect match.
    pub const ZERO: ConflictCount = ConflictCount::Conflicts(0);

    /// Whether there are no conflicts at all.
    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Whether the scans do not overlap.
    #[inline]
    pub fn is_incompatible(self) -> bool {
        self == ConflictCount::Incompatible
    }

    /// The finite count, if any.
    #[inline]
    pub fn count(self) -> Option<usize> {
        match self {
            ConflictCount::Conflicts(n) => Some(n),
            ConflictCount::Incompatible => None,
        }
    }

    /// Count as a float, `+∞` for `Incompatible`.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            ConflictCount::Conflicts(n) => n as f64,
            ConflictCount::Incompatible => f64::INFINITY,
        }
    }
}

impl fmt::Display for ConflictCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictCount::Conflicts(n) => write!(f, "{}", n),
            ConflictCount::Incompatible => f.write_str("inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(ConflictCount::Conflicts(0) < ConflictCount::Conflicts(5));
        assert!(ConflictCount::Conflicts(usize::MAX) < ConflictCount::Incompatible);
        assert!(ConflictCount::Incompatible.as_f64().is_infinite());
        assert_eq!(ConflictCount::Incompatible.to_string(), "inf");
        assert!(ConflictCount::ZERO.is_zero());
    }
}
