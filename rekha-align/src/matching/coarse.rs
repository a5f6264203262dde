//! Stage 1: coarse pairing of the longest convex-hull diagonals.

use log::debug;

use crate::core::{RigidTransform, normalize_angle};
use crate::hull::longest_diagonal;
use crate::scan::ScanData;

use std::f64::consts::PI;

/// Pair the longest hull diagonals of `source` and `target`.
///
/// Two candidates are scored: the rotation aligning the diagonals in the
/// same direction and that rotation plus π. Each rotates about the
/// midpoint of the source diagonal and is followed by the translation
/// onto the target diagonal midpoint. The candidate with the lower
/// hull-vertex error wins (the first on ties).
///
/// Returns `[rotation, translation]`, or an empty list when either hull has
/// fewer than two distinct vertices.
pub fn coarse_pairing(source: &ScanData, target: &ScanData) -> Vec<RigidTransform> {
    let Some((a1, b1)) = longest_diagonal(&source.convex_hull()) else {
        debug!("Coarse pairing: source hull is degenerate");
        return Vec::new();
    };
    let Some((a2, b2)) = longest_diagonal(&target.convex_hull()) else {
        debug!("Coarse pairing: target hull is degenerate");
        return Vec::new();
    };

    let theta = normalize_angle((b2 - a2).angle() - (b1 - a1).angle());
    let pivot = a1.midpoint(&b1);
    let translation = RigidTransform::translation_by(a2.midpoint(&b2) - pivot);

    let mut best: Option<(f64, RigidTransform)> = None;
    for candidate_theta in [theta, normalize_angle(theta + PI)] {
        let rotation = RigidTransform::rotation(candidate_theta, pivot);
        let moved = source.apply_transform(&rotation.then(&translation));
        let score = moved.sum_closest_hull_error(target);
        debug!(
            "Coarse candidate {:.4} rad: hull error {:.4}",
            candidate_theta, score
        );
        if best.is_none_or(|(s, _)| score < s) {
            best = Some((score, rotation));
        }
    }

    match best {
        Some((_, rotation)) => vec![rotation, translation],
        None => Vec::new(),
    }
}
