//! Rigid planar transforms (rotation plus translation, no scale or shear).

use serde::{Deserialize, Serialize};

use super::math::{angles_approx_equal, normalize_angle};
use super::point::Point2D;

/// A rigid transform `p' = R(theta) * p + (tx, ty)`.
///
/// A rotation about an arbitrary pivot is stored in this canonical form, so
/// chains of rotations and translations collapse into a single value.
///
/// # Composition
///
/// ```
/// use rekha_align::core::{Point2D, RigidTransform};
/// use std::f64::consts::FRAC_PI_2;
///
/// let rotate = RigidTransform::rotation(FRAC_PI_2, Point2D::new(1.0, 1.0));
/// let shift = RigidTransform::translation(2.0, 0.0);
/// let both = rotate.then(&shift);
///
/// let p = both.apply(Point2D::new(2.0, 1.0));
/// assert!((p.x - 3.0).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation angle in radians [-π, π), CCW positive.
    pub theta: f64,
    /// Translation along X applied after rotation.
    pub tx: f64,
    /// Translation along Y applied after rotation.
    pub ty: f64,
}

impl RigidTransform {
    /// Create a transform from its canonical parameters.
    #[inline]
    pub fn new(theta: f64, tx: f64, ty: f64) -> Self {
        Self {
            theta: normalize_angle(theta),
            tx,
            ty,
        }
    }

    /// The identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self {
            theta: 0.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Rotation by `theta` about `pivot`.
    #[inline]
    pub fn rotation(theta: f64, pivot: Point2D) -> Self {
        let rotated = Self::new(theta, 0.0, 0.0).apply(pivot);
        Self::new(theta, pivot.x - rotated.x, pivot.y - rotated.y)
    }

    /// Pure translation.
    #[inline]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            theta: 0.0,
            tx: dx,
            ty: dy,
        }
    }

    /// Translation by a displacement vector.
    #[inline]
    pub const fn translation_by(delta: Point2D) -> Self {
        Self::translation(delta.x, delta.y)
    }

    /// Translation component.
    #[inline]
    pub fn translation_vector(&self) -> Point2D {
        Point2D::new(self.tx, self.ty)
    }

    /// Apply to a point.
    #[inline]
    pub fn apply(&self, p: Point2D) -> Point2D {
        let (sin, cos) = self.theta.sin_cos();
        Point2D {
            x: p.x * cos - p.y * sin + self.tx,
            y: p.x * sin + p.y * cos + self.ty,
        }
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    #[inline]
    pub fn compose(&self, other: &RigidTransform) -> Self {
        let t = self.apply(other.translation_vector());
        Self::new(self.theta + other.theta, t.x, t.y)
    }

    /// Apply `self` first, then `next`.
    #[inline]
    pub fn then(&self, next: &RigidTransform) -> Self {
        next.compose(self)
    }

    /// Collapse an ordered chain (first element applied first).
    pub fn chain(transforms: &[RigidTransform]) -> Self {
        transforms
            .iter()
            .fold(Self::identity(), |acc, t| acc.then(t))
    }

    /// The inverse transform: `t.then(&t.inverse())` is the identity.
    #[inline]
    pub fn inverse(&self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.theta,
            -self.tx * cos - self.ty * sin,
            self.tx * sin - self.ty * cos,
        )
    }

    /// Whether this is the identity within tolerances.
    #[inline]
    pub fn is_identity(&self, pos_epsilon: f64, angle_epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), pos_epsilon, angle_epsilon)
    }

    /// Check approximate equality.
    #[inline]
    pub fn approx_eq(&self, other: &RigidTransform, pos_epsilon: f64, angle_epsilon: f64) -> bool {
        (self.tx - other.tx).abs() <= pos_epsilon
            && (self.ty - other.ty).abs() <= pos_epsilon
            && angles_approx_equal(self.theta, other.theta, angle_epsilon)
    }
}

impl std::ops::Mul for RigidTransform {
    type Output = Self;

    /// Same as `compose`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}
