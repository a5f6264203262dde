//! Boolean combination of region outlines and decomposition of the result
//! into closed components.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use kurbo::PathEl;
use log::{debug, warn};

use crate::core::outline::{MIN_FLATTEN_TOLERANCE, push_vertex};
use crate::core::{GEOM_EPSILON, Outline, Point2D, RegionOutline};
use crate::error::TopologyError;

type Contour = Vec<[f64; 2]>;

fn to_contour(ring: &[Point2D]) -> Contour {
    ring.iter().map(|p| [p.x, p.y]).collect()
}

/// Union solids and subtract holes, in input order, into one region.
///
/// The boundary of the region comes back as an [`Outline`] with one
/// `MoveTo .. Close` sub-path per contour, outer boundaries and hole
/// boundaries alike.
pub fn combine_outlines(outlines: &[RegionOutline], tolerance: f64) -> Outline {
    let mut region: Vec<Contour> = Vec::new();

    for record in outlines {
        for ring in record.outline.rings(tolerance) {
            let clip = to_contour(&ring);
            if region.is_empty() {
                if record.is_hole {
                    debug!("Hole outline with nothing to cut, skipped");
                } else {
                    region.push(clip);
                }
                continue;
            }
            let rule = if record.is_hole {
                OverlayRule::Difference
            } else {
                OverlayRule::Union
            };
            let shapes = region.overlay(&[clip], rule, FillRule::NonZero);
            region = shapes
                .into_iter()
                .flatten()
                .filter(|contour| contour.len() >= 3)
                .collect();
        }
    }

    let mut outline = Outline::new();
    for contour in &region {
        let mut points = contour.iter().map(|&[x, y]| Point2D::new(x, y));
        if let Some(first) = points.next() {
            outline = outline.move_to(first);
            for p in points {
                outline = outline.line_to(p);
            }
            outline = outline.close();
        }
    }
    outline
}

/// Split a path into its closed sub-paths.
///
/// `MoveTo` starts a component, `LineTo`/`QuadTo`/`CurveTo` extend it and
/// `ClosePath` finalizes it. Drawing before the first `MoveTo`, closing
/// nothing, or ending with an open sub-path is malformed. Components with
/// fewer than three distinct vertices are dropped.
pub fn decompose(outline: &Outline, tolerance: f64) -> Result<Vec<Vec<Point2D>>, TopologyError> {
    validate_structure(outline.elements())?;

    let mut components = Vec::new();
    let mut current: Vec<Point2D> = Vec::new();
    kurbo::flatten(
        outline.path().iter(),
        tolerance.max(MIN_FLATTEN_TOLERANCE),
        |el| match el {
            PathEl::MoveTo(p) => current = vec![p.into()],
            PathEl::LineTo(p) => push_vertex(&mut current, p.into()),
            PathEl::ClosePath => {
                let mut ring = std::mem::take(&mut current);
                if ring.len() > 1 && ring[0].distance(&ring[ring.len() - 1]) <= GEOM_EPSILON {
                    ring.pop();
                }
                if ring.len() >= 3 {
                    components.push(ring);
                } else {
                    warn!("Dropping degenerate component with {} vertices", ring.len());
                }
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        },
    );
    Ok(components)
}

fn validate_structure(elements: &[PathEl]) -> Result<(), TopologyError> {
    let mut open = false;
    for (index, el) in elements.iter().enumerate() {
        let problem = match el {
            PathEl::MoveTo(_) if open => Some("move_to inside an open sub-path"),
            PathEl::MoveTo(_) => {
                open = true;
                None
            }
            PathEl::LineTo(_) if !open => Some("line_to before move_to"),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) if !open => Some("curve before move_to"),
            PathEl::LineTo(_) | PathEl::QuadTo(..) | PathEl::CurveTo(..) => None,
            PathEl::ClosePath if !open => Some("close without a sub-path"),
            PathEl::ClosePath => {
                open = false;
                None
            }
        };
        if let Some(problem) = problem {
            return Err(TopologyError::MalformedPath(format!("element {index}: {problem}")));
        }
    }
    if open {
        return Err(TopologyError::MalformedPath(
            "path ends inside an open sub-path".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::polygon::area;
    use approx::assert_relative_eq;

    #[test]
    fn test_union_of_overlapping_squares() {
        let outlines = [
            RegionOutline::solid(Outline::rectangle(0.0, 0.0, 10.0, 10.0)),
            RegionOutline::solid(Outline::rectangle(5.0, 0.0, 10.0, 10.0)),
        ];
        let combined = combine_outlines(&outlines, 0.25);
        let components = decompose(&combined, 0.25).unwrap();
        assert_eq!(components.len(), 1);
        assert_relative_eq!(area(&components[0]), 150.0, max_relative = 1e-6);
    }

    #[test]
    fn test_hole_leaves_two_contours() {
        let outlines = [
            RegionOutline::solid(Outline::rectangle(0.0, 0.0, 100.0, 100.0)),
            RegionOutline::hole(Outline::rectangle(25.0, 25.0, 50.0, 50.0)),
        ];
        let components = decompose(&combine_outlines(&outlines, 0.25), 0.25).unwrap();
        assert_eq!(components.len(), 2);
        let mut areas: Vec<f64> = components.iter().map(|c| area(c)).collect();
        areas.sort_by(f64::total_cmp);
        assert_relative_eq!(areas[0], 2500.0, max_relative = 1e-6);
        assert_relative_eq!(areas[1], 10000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_leading_hole_is_ignored() {
        let outlines = [
            RegionOutline::hole(Outline::rectangle(0.0, 0.0, 10.0, 10.0)),
            RegionOutline::solid(Outline::rectangle(20.0, 20.0, 10.0, 10.0)),
        ];
        let components = decompose(&combine_outlines(&outlines, 0.25), 0.25).unwrap();
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn test_malformed_paths() {
        let line_first = Outline::from_elements(vec![PathEl::LineTo((1.0, 1.0).into())]);
        assert!(matches!(
            decompose(&line_first, 0.25),
            Err(TopologyError::MalformedPath(_))
        ));

        let double_move = Outline::from_elements(vec![
            PathEl::MoveTo((0.0, 0.0).into()),
            PathEl::MoveTo((1.0, 1.0).into()),
        ]);
        assert!(decompose(&double_move, 0.25).is_err());

        let stray_close = Outline::rectangle(0.0, 0.0, 1.0, 1.0).close();
        assert!(decompose(&stray_close, 0.25).is_err());

        let open = Outline::new()
            .move_to(Point2D::new(0.0, 0.0))
            .line_to(Point2D::new(1.0, 0.0))
            .line_to(Point2D::new(1.0, 1.0));
        assert!(decompose(&open, 0.25).is_err());
    }

    #[test]
    fn test_curves_are_flattened() {
        let circle = Outline::circle(Point2D::new(50.0, 50.0), 20.0);
        let components = decompose(&circle, 0.1).unwrap();
        assert_eq!(components.len(), 1);
        assert!(components[0].len() > 8);
        assert_relative_eq!(area(&components[0]), std::f64::consts::PI * 400.0, max_relative = 0.01);
    }
}
