//! Text records of scan intervals: `Sensor<id> [x1,y1] [x2,y2]`.

use std::fmt::Write;

use super::lines::ScanLines;
use crate::core::math::{angles_approx_equal, round_to};
use crate::core::{GEOM_EPSILON, Point2D};
use crate::error::ScanDataError;
use crate::interval::Interval;

/// Maximum angular difference between intervals of one record (radians).
const ANGLE_TOLERANCE: f64 = 1e-6;

/// Decimal places the derived line spacing is rounded to.
const SPACING_DECIMALS: i32 = 3;

/// Parse one record per line. Blank lines and `#` comments are skipped.
pub(crate) fn parse_records(text: &str) -> Result<Vec<(usize, Interval)>, ScanDataError> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let interval = parse_line(line).map_err(|message| ScanDataError::Parse {
            line: line_no,
            message,
        })?;
        records.push((line_no, interval));
    }
    Ok(records)
}

fn parse_line(line: &str) -> Result<Interval, String> {
    let rest = line
        .strip_prefix("Sensor")
        .ok_or_else(|| format!("expected 'Sensor<id>', found '{}'", line))?;
    let id_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let line_id: usize = rest[..id_end]
        .parse()
        .map_err(|_| "missing sensor id".to_string())?;
    if line_id == 0 {
        return Err("sensor ids start at 1".to_string());
    }

    let mut points = rest[id_end..].split('[').skip(1).map(parse_point);
    let start = points.next().ok_or("missing start point")??;
    let end = points.next().ok_or("missing end point")??;
    if points.next().is_some() {
        return Err("more than two points".to_string());
    }
    Ok(Interval::new(line_id, start, end))
}

fn parse_point(chunk: &str) -> Result<Point2D, String> {
    let body = chunk
        .split(']')
        .next()
        .filter(|_| chunk.contains(']'))
        .ok_or_else(|| format!("unterminated point '[{}'", chunk.trim()))?;
    let mut coords = body.split(',').map(|s| s.trim().parse::<f64>());
    match (coords.next(), coords.next(), coords.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => {
            Ok(Point2D::new(x, y))
        }
        _ => Err(format!("invalid point '[{}]'", body)),
    }
}

/// Recover the line family from parsed positives.
///
/// Every interval must share the first interval's angle. The spacing is
/// the perpendicular distance to the first interval divided by the id
/// difference, rounded to three decimals, and must agree for every line.
pub(crate) fn infer_lines(records: &[(usize, Interval)]) -> Result<ScanLines, ScanDataError> {
    let Some(&(_, reference)) = records.first() else {
        return Err(ScanDataError::Empty);
    };
    let angle = reference.angle();

    let mut gap: Option<f64> = None;
    let mut ascending = true;
    for &(line_no, iv) in records {
        if iv.is_degenerate() || !angles_approx_equal(iv.angle(), angle, ANGLE_TOLERANCE) {
            return Err(ScanDataError::InconsistentAngle { line: line_no });
        }
        if iv.line_id == reference.line_id {
            continue;
        }
        let id_diff = iv.line_id as f64 - reference.line_id as f64;
        let spacing = round_to(
            reference.distance_to_parallel_line(&iv.start) / id_diff.abs(),
            SPACING_DECIMALS,
        );
        let normal_step = (iv.start - reference.start).dot(&reference.direction().perp());
        let step_ascending = (normal_step >= 0.0) == (id_diff > 0.0);
        match gap {
            None => {
                gap = Some(spacing);
                ascending = step_ascending;
            }
            Some(g) if (g - spacing).abs() <= GEOM_EPSILON && step_ascending == ascending => {}
            Some(_) => return Err(ScanDataError::InconsistentSpacing { line: line_no }),
        }
    }

    let count = records
        .iter()
        .map(|(_, iv)| iv.line_id)
        .max()
        .unwrap_or(reference.line_id);
    let gap = match gap {
        Some(g) if g > 0.0 => g,
        Some(g) => return Err(ScanDataError::InvalidSpacing(g)),
        None if count == 1 => 0.0,
        None => return Err(ScanDataError::UndeterminedSpacing),
    };

    let normal = reference.direction().normalize().perp();
    let step = (reference.line_id as f64 - 1.0) * gap;
    let reference_offset = reference.start.dot(&normal);
    Ok(ScanLines {
        angle,
        gap,
        first_offset: if ascending {
            reference_offset - step
        } else {
            reference_offset + step
        },
        count,
        ascending,
    })
}

/// Render intervals in record format, one per line.
pub(crate) fn write_records(intervals: &[Interval]) -> String {
    let mut out = String::with_capacity(intervals.len() * 48);
    for iv in intervals {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "Sensor{} [{},{}] [{},{}]",
            iv.line_id, iv.start.x, iv.start.y, iv.end.x, iv.end.y
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_line() {
        let iv = parse_line("Sensor12 [1.5,2] [3,-4.25]").unwrap();
        assert_eq!(iv.line_id, 12);
        assert_eq!(iv.start, Point2D::new(1.5, 2.0));
        assert_eq!(iv.end, Point2D::new(3.0, -4.25));
        assert!(parse_line("Sensor12 [1.5,2] [3,-4.25").is_err());
        assert!(parse_line("Sensor [1,2] [3,4]").is_err());
        assert!(parse_line("Beam1 [1,2] [3,4]").is_err());
        assert!(parse_line("Sensor1 [1,2]").is_err());
        assert!(parse_line("Sensor1 [1,x] [3,4]").is_err());
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = "Sensor1 [0,0] [1,0]\n\n# comment\nSensor2 [0,1] [oops]\n";
        match parse_records(text) {
            Err(ScanDataError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_infer_lines() {
        let text = "Sensor2 [10,20] [50,20]\nSensor4 [0,60] [30,60]\nSensor5 [5,80] [9,80]\n";
        let records = parse_records(text).unwrap();
        let lines = infer_lines(&records).unwrap();
        assert_relative_eq!(lines.gap, 20.0);
        assert_eq!(lines.count, 5);
        assert_relative_eq!(lines.offset(1), 0.0, epsilon = 1e-12);
        assert_relative_eq!(lines.offset(4), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_infer_lines_errors() {
        let tilted = parse_records("Sensor1 [0,0] [10,0]\nSensor2 [0,20] [10,21]\n").unwrap();
        assert!(matches!(
            infer_lines(&tilted),
            Err(ScanDataError::InconsistentAngle { line: 2 })
        ));

        let uneven =
            parse_records("Sensor1 [0,0] [10,0]\nSensor2 [0,20] [10,20]\nSensor3 [0,45] [10,45]\n")
                .unwrap();
        assert!(matches!(
            infer_lines(&uneven),
            Err(ScanDataError::InconsistentSpacing { line: 3 })
        ));

        let single = parse_records("Sensor3 [0,0] [10,0]\n").unwrap();
        assert!(matches!(
            infer_lines(&single),
            Err(ScanDataError::UndeterminedSpacing)
        ));
        assert!(matches!(infer_lines(&[]), Err(ScanDataError::Empty)));
    }

    #[test]
    fn test_write_records() {
        let text = write_records(&[Interval::new(
            3,
            Point2D::new(1.0, 2.5),
            Point2D::new(4.0, 2.5),
        )]);
        assert_eq!(text, "Sensor3 [1,2.5] [4,2.5]\n");
        let back = parse_records(&text).unwrap();
        assert_eq!(back[0].1.end, Point2D::new(4.0, 2.5));
    }
}
