//! Test utilities for rekha-align.
//!
//! Region builders and scan helpers shared by the integration tests.

#![allow(dead_code)]

use rekha_align::{Canvas, Outline, Point2D, RegionOutline, ScanData};

/// Asymmetric L-shaped region (no rotational symmetry).
pub fn l_shape() -> Vec<RegionOutline> {
    vec![RegionOutline::solid(Outline::polygon(&[
        Point2D::new(200.0, 150.0),
        Point2D::new(500.0, 150.0),
        Point2D::new(500.0, 230.0),
        Point2D::new(300.0, 230.0),
        Point2D::new(300.0, 400.0),
        Point2D::new(200.0, 400.0),
    ]))]
}

/// Axis-aligned rectangle region.
pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Vec<RegionOutline> {
    vec![RegionOutline::solid(Outline::rectangle(x, y, width, height))]
}

/// Solid with a hole, an island inside the hole, and a separate disc.
pub fn nested_region() -> Vec<RegionOutline> {
    vec![
        RegionOutline::solid(Outline::rectangle(100.0, 100.0, 400.0, 300.0)),
        RegionOutline::hole(Outline::rectangle(150.0, 150.0, 200.0, 200.0)),
        RegionOutline::solid(Outline::rectangle(200.0, 200.0, 50.0, 50.0)),
        RegionOutline::solid(Outline::circle(Point2D::new(650.0, 300.0), 60.0)),
    ]
}

/// Scan outlines on the default 800×600 canvas.
pub fn scan(outlines: &[RegionOutline], angle: f64, gap: f64) -> ScanData {
    ScanData::from_outlines(outlines, angle, gap, Canvas::default()).expect("valid scan parameters")
}

/// All pairwise distances in a point list are at least `min`.
pub fn all_apart(points: &[Point2D], min: f64) -> bool {
    points
        .iter()
        .enumerate()
        .all(|(i, a)| points[i + 1..].iter().all(|b| a.distance(b) >= min))
}
