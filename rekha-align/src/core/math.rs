//! Angle utilities and numeric tolerances.
//!
//! All angles are in radians, counter-clockwise positive from +X.

use std::f64::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f64 = 2.0 * PI;

/// Absolute tolerance for geometric predicates (endpoint, parallel tests).
pub const GEOM_EPSILON: f64 = 1e-9;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use rekha_align::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-12);
/// assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Normalize a line orientation to [0, π).
///
/// Lines have no direction, so `θ` and `θ + π` describe the same family.
#[inline]
pub fn normalize_line_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(PI);
    if PI - a <= GEOM_EPSILON { 0.0 } else { a }
}

/// Signed shortest angular difference from `from` to `to`, in [-π, π).
///
/// # Example
/// ```
/// use rekha_align::core::math::angle_diff;
/// use std::f64::consts::PI;
///
/// let diff = angle_diff(-0.9 * PI, 0.9 * PI);
/// assert!((diff - (-0.2 * PI)).abs() < 1e-12);
/// ```
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Check two angles are equal within `tolerance`, handling wrap-around.
#[inline]
pub fn angles_approx_equal(a: f64, b: f64, tolerance: f64) -> bool {
    angle_diff(a, b).abs() <= tolerance
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_range() {
        for i in -50..50 {
            let a = normalize_angle(i as f64 * 0.37);
            assert!((-PI..PI).contains(&a), "{} out of range", a);
        }
    }

    #[test]
    fn test_normalize_line_angle() {
        assert_relative_eq!(normalize_line_angle(PI + 0.25), 0.25, epsilon = 1e-12);
        assert_relative_eq!(normalize_line_angle(-0.25), PI - 0.25, epsilon = 1e-12);
        assert_eq!(normalize_line_angle(PI), 0.0);
    }

    #[test]
    fn test_deg_rad_roundtrip() {
        assert_relative_eq!(rad_to_deg(deg_to_rad(37.5)), 37.5, epsilon = 1e-12);
        assert_relative_eq!(deg_to_rad(180.0), PI);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(19.99951, 3), 20.0);
        assert_eq!(round_to(1.23449, 3), 1.234);
    }

    #[test]
    fn test_angles_approx_equal_wraps() {
        assert!(angles_approx_equal(PI - 0.001, -PI + 0.001, 0.01));
        assert!(!angles_approx_equal(0.0, PI, 0.1));
    }
}
