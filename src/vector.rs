//! 2D vector/point primitives.
//!
//! The arithmetic, dot products and normalization are supplied by `cgmath`;
//! this module only adds the handful of 2D-specific operations `cgmath`
//! does not provide directly: rotate-by-angle, the scalar 2D cross product,
//! polar angle, and point distance.

use cgmath::{Basis2, EuclideanSpace, InnerSpace, Rad, Rotation, Rotation2};

use crate::Real;

/// A 2D vector, value-typed and copyable.
pub type Vector2D = cgmath::Vector2<Real>;

/// A 2D point, value-typed and copyable.
pub type Point2D = cgmath::Point2<Real>;

/// Operations this crate needs on top of what `cgmath::Vector2` supplies.
pub trait Vector2DExt: Sized {
    /// Rotate this vector by `angle` radians, returning a new vector.
    fn rotated(self, angle: Real) -> Self;

    /// The polar angle of this vector, `atan2(y, x)`.
    fn angle(self) -> Real;
}

impl Vector2DExt for Vector2D {
    fn rotated(self, angle: Real) -> Self {
        Basis2::from_angle(Rad(angle)).rotate_vector(self)
    }

    fn angle(self) -> Real {
        Real::atan2(self.y, self.x)
    }
}

/// Operations this crate needs on top of what `cgmath::Point2` supplies.
pub trait Point2DExt: Sized {
    /// Euclidean distance to another point.
    fn distance_to(self, other: Self) -> Real;

    /// Rotate this point about the world origin by `angle` radians.
    fn rotated(self, angle: Real) -> Self;
}

impl Point2DExt for Point2D {
    fn distance_to(self, other: Self) -> Real {
        (other - self).magnitude()
    }

    fn rotated(self, angle: Real) -> Self {
        Point2D::from_vec(self.to_vec().rotated(angle))
    }
}

/// Cross product abstraction bridging scalar angular velocity and 2D linear
/// quantities (`ω × r` in 2D is a rotation of `r` by 90°, scaled by `ω`).
/// Exposed as part of this crate's public vector vocabulary for embedding
/// applications that need it directly.
///
/// Mirrors the `Cross`/`PartialCrossProduct` extension trait this crate
/// lineage has always defined next to `cgmath` rather than inside it.
pub trait Cross<Rhs = Self> {
    /// The result of the cross product.
    type Output;
    /// Compute the cross product.
    fn cross(&self, other: &Rhs) -> Self::Output;
}

impl Cross<Vector2D> for Real {
    type Output = Vector2D;

    /// `ω × r`: rotate `r` by 90° and scale by `ω`.
    fn cross(&self, other: &Vector2D) -> Vector2D {
        Vector2D::new(-*self * other.y, *self * other.x)
    }
}

impl Cross for Vector2D {
    type Output = Real;

    fn cross(&self, other: &Vector2D) -> Real {
        self.x * other.y - self.y * other.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn rotate_quarter_turn() {
        let v = Vector2D::new(1.0, 0.0);
        let rotated = v.rotated(PI / 2.0);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn cross_product_matches_determinant() {
        let a = Vector2D::new(1.0, 0.0);
        let b = Vector2D::new(0.0, 1.0);
        assert_relative_eq!(a.cross(&b), 1.0);
        assert_relative_eq!(b.cross(&a), -1.0);
    }

    #[test]
    fn angular_velocity_cross_is_perpendicular_scale() {
        let omega: Real = 2.0;
        let r = Vector2D::new(1.0, 0.0);
        let v = omega.cross(&r);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(v.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn polar_angle_and_distance() {
        let v = Vector2D::new(0.0, 1.0);
        assert_relative_eq!(v.angle(), PI / 2.0);
        let p = Point2D::new(0.0, 0.0);
        let q = Point2D::new(3.0, 4.0);
        assert_relative_eq!(p.distance_to(q), 5.0);
    }
}
