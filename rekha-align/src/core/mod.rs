//! Core geometric types shared by scans, alignment and topology.

pub mod canvas;
pub mod math;
pub mod outline;
pub mod point;
pub mod polygon;
pub mod transform;

pub use canvas::Canvas;
pub use math::{GEOM_EPSILON, angle_diff, deg_to_rad, normalize_angle, rad_to_deg};
pub use kurbo::PathEl;
pub use outline::{Outline, RegionOutline};
pub use point::Point2D;
pub use transform::RigidTransform;
