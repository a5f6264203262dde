//! Deriving negative intervals as the complement of positives per line.

use std::collections::BTreeMap;

use log::warn;

use super::lines::ScanLines;
use crate::core::{Canvas, GEOM_EPSILON, Point2D};
use crate::interval::Interval;

/// Negative intervals for every line of a scan.
///
/// For each line the full in-canvas extent is walked in scan direction;
/// every stretch not covered by a positive interval becomes a negative
/// interval. Lines without positives yield one fully negative interval.
/// Lines carrying positives use the positives' own line geometry so the
/// shared endpoints stay bit-identical.
pub(crate) fn derive_negatives(
    positives: &[Interval],
    lines: &ScanLines,
    canvas: &Canvas,
) -> Vec<Interval> {
    let mut by_line: BTreeMap<usize, Vec<&Interval>> = BTreeMap::new();
    for iv in positives {
        by_line.entry(iv.line_id).or_default().push(iv);
    }

    let last_id = by_line
        .keys()
        .next_back()
        .copied()
        .unwrap_or(0)
        .max(lines.count);

    let mut negatives = Vec::new();
    for line_id in 1..=last_id {
        match by_line.get(&line_id) {
            Some(on_line) => complement_line(line_id, on_line, canvas, &mut negatives),
            None => {
                if let Some(full) = lines.line(line_id, canvas) {
                    negatives.push(full);
                }
            }
        }
    }
    negatives
}

fn complement_line(
    line_id: usize,
    on_line: &[&Interval],
    canvas: &Canvas,
    out: &mut Vec<Interval>,
) {
    let Some(full) = on_line
        .iter()
        .find_map(|iv| (!iv.is_degenerate()).then(|| iv.full_extent(canvas)).flatten())
    else {
        warn!("line {}: positives do not cross the canvas, no negatives derived", line_id);
        return;
    };

    let dir = full.direction().normalize();
    let at = |p: &Point2D| (*p - full.start).dot(&dir);

    // Orient each positive along the line and sort by start
    let mut spans: Vec<(f64, Point2D, f64, Point2D)> = on_line
        .iter()
        .map(|iv| {
            let (a, b) = (at(&iv.start), at(&iv.end));
            if a <= b {
                (a, iv.start, b, iv.end)
            } else {
                (b, iv.end, a, iv.start)
            }
        })
        .collect();
    spans.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut cursor_t = 0.0;
    let mut cursor = full.start;
    for (ts, s, te, e) in spans {
        if ts > cursor_t + GEOM_EPSILON {
            out.push(Interval::new(line_id, cursor, s));
        }
        if te > cursor_t {
            cursor_t = te;
            cursor = e;
        }
    }
    if full.length() > cursor_t + GEOM_EPSILON {
        out.push(Interval::new(line_id, cursor, full.end));
    }
}
