//! Allen's thirteen interval relations.

use std::cmp::Ordering;
use std::fmt;

use crate::core::GEOM_EPSILON;

/// Relation between two 1D intervals `a = (s1, e1)` and `b = (s2, e2)`.
///
/// Each variant reads "a *relation* b".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllenRelation {
    /// Same start and end.
    Equals,
    /// `a` ends before `b` starts.
    Precedes,
    /// `a` starts after `b` ends.
    PrecededBy,
    /// `a` ends exactly where `b` starts.
    Meets,
    /// `a` starts exactly where `b` ends.
    MetBy,
    /// Same start, `a` ends first.
    Starts,
    /// Same start, `a` ends last.
    StartedBy,
    /// `a` starts first and ends inside `b`.
    Overlaps,
    /// `a` starts inside `b` and ends after it.
    OverlappedBy,
    /// `a` lies strictly inside `b`.
    During,
    /// `b` lies strictly inside `a`.
    Contains,
    /// Same end, `a` starts last.
    Finishes,
    /// Same end, `a` starts first.
    FinishedBy,
}

impl AllenRelation {
    /// All thirteen relations, in bit order.
    pub const ALL: [AllenRelation; 13] = [
        AllenRelation::Equals,
        AllenRelation::Precedes,
        AllenRelation::PrecededBy,
        AllenRelation::Meets,
        AllenRelation::MetBy,
        AllenRelation::Starts,
        AllenRelation::StartedBy,
        AllenRelation::Overlaps,
        AllenRelation::OverlappedBy,
        AllenRelation::During,
        AllenRelation::Contains,
        AllenRelation::Finishes,
        AllenRelation::FinishedBy,
    ];

    /// Classify `(s1, e1)` against `(s2, e2)`; both need `start < end`.
    ///
    /// Scalars closer than [`GEOM_EPSILON`] compare equal. The comparison
    /// table is total, so every input pair maps to exactly one relation.
    ///
    /// `s1 > s2, e1 < e2` (the first interval strictly inside the second)
    /// is [`During`](AllenRelation::During). Some reference tables label
    /// that case `di`; here `di` is reserved for the mirrored case so that
    /// `classify(a, b) == classify(b, a).inverse()` holds for
    /// [`Contains`](AllenRelation::Contains) as for every other relation.
    pub fn classify(s1: f64, e1: f64, s2: f64, e2: f64) -> Self {
        use AllenRelation::*;
        use Ordering::*;

        if cmp(e1, s2) == Less {
            return Precedes;
        }
        if cmp(e2, s1) == Less {
            return PrecededBy;
        }
        if cmp(e1, s2) == Equal {
            return Meets;
        }
        if cmp(e2, s1) == Equal {
            return MetBy;
        }
        match (cmp(s1, s2), cmp(e1, e2)) {
            (Less, Less) => Overlaps,
            (Less, Equal) => FinishedBy,
            (Less, Greater) => Contains,
            (Equal, Less) => Starts,
            (Equal, Equal) => Equals,
            (Equal, Greater) => StartedBy,
            (Greater, Less) => During,
            (Greater, Equal) => Finishes,
            (Greater, Greater) => OverlappedBy,
        }
    }

    /// The converse relation (`b` relative to `a`).
    pub fn inverse(self) -> Self {
        use AllenRelation::*;
        match self {
            Equals => Equals,
            Precedes => PrecededBy,
            PrecededBy => Precedes,
            Meets => MetBy,
            MetBy => Meets,
            Starts => StartedBy,
            StartedBy => Starts,
            Overlaps => OverlappedBy,
            OverlappedBy => Overlaps,
            During => Contains,
            Contains => During,
            Finishes => FinishedBy,
            FinishedBy => Finishes,
        }
    }

    /// Short code (`eq`, `p`, `pi`, `m`, `mi`, `s`, `si`, `o`, `oi`, `d`, `di`, `f`, `fi`).
    pub fn code(self) -> &'static str {
        use AllenRelation::*;
        match self {
            Equals => "eq",
            Precedes => "p",
            PrecededBy => "pi",
            Meets => "m",
            MetBy => "mi",
            Starts => "s",
            StartedBy => "si",
            Overlaps => "o",
            OverlappedBy => "oi",
            During => "d",
            Contains => "di",
            Finishes => "f",
            FinishedBy => "fi",
        }
    }

    /// Parse a short code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    /// Single-bit mask of this relation.
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for AllenRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[inline]
fn cmp(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= GEOM_EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// A disjunction of Allen relations stored as a 13-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RelationSet(u16);

impl RelationSet {
    /// No relation.
    pub const EMPTY: RelationSet = RelationSet(0);
    /// Every relation (complete uncertainty).
    pub const UNIVERSAL: RelationSet = RelationSet(0x1FFF);

    /// Set holding a single relation.
    pub fn single(relation: AllenRelation) -> Self {
        Self(relation.bit())
    }

    /// Raw bit mask.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Add a relation.
    pub fn insert(&mut self, relation: AllenRelation) {
        self.0 |= relation.bit();
    }

    /// Membership test.
    pub fn contains(self, relation: AllenRelation) -> bool {
        self.0 & relation.bit() != 0
    }

    /// Number of relations in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two sets.
    pub fn union(self, other: RelationSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of two sets.
    pub fn intersection(self, other: RelationSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Converse of every member.
    pub fn inverse(self) -> Self {
        self.iter().map(AllenRelation::inverse).collect()
    }

    /// Iterate the members in bit order.
    pub fn iter(self) -> impl Iterator<Item = AllenRelation> {
        AllenRelation::ALL
            .into_iter()
            .filter(move |r| self.contains(*r))
    }
}

impl FromIterator<AllenRelation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = AllenRelation>>(iter: I) -> Self {
        let mut set = RelationSet::EMPTY;
        for r in iter {
            set.insert(r);
        }
        set
    }
}

impl fmt::Display for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.iter().map(AllenRelation::code).collect();
        write!(f, "{{{}}}", codes.join(","))
    }
}
