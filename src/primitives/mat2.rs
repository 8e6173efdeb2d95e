//! 2x2 linear transformation.

use super::Vec2;
use num_traits::Float;
use std::ops::Mul;

/// A 2x2 matrix in row-major order:
/// ```text
/// | a  b |
/// | c  d |
/// ```
///
/// Applied to a vector as `(a*x + b*y, c*x + d*y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2<F> {
    pub a: F,
    pub b: F,
    pub c: F,
    pub d: F,
}

impl<F: Float> Mat2<F> {
    /// Creates a matrix from its components.
    #[inline]
    pub fn new(a: F, b: F, c: F, d: F) -> Self {
        Self { a, b, c, d }
    }

    /// Rotation around the origin. Angle in radians, positive is
    /// counter-clockwise.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    /// Applies the matrix to a vector.
    #[inline]
    pub fn apply(self, v: Vec2<F>) -> Vec2<F> {
        Vec2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
    }
}

impl<F: Float> Mul<Vec2<F>> for Mat2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn mul(self, v: Vec2<F>) -> Vec2<F> {
        self.apply(v)
    }
}
