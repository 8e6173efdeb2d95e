//! Orientation and collinear containment predicates.
//!
//! Every test here is exact: a signed area is compared against zero with no
//! tolerance, and collinearity means a signed area of exactly zero.

use crate::primitives::Vec2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (zero area).
    Collinear,
}

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when `c` is to the left of the line from `a` to `b`, zero when
/// the three points are collinear.
#[inline]
pub fn double_signed_area<F: Float>(a: Vec2<F>, b: Vec2<F>, c: Vec2<F>) -> F {
    (b - a).cross(c - a)
}

/// Classifies the turn `a -> b -> c`.
#[inline]
pub fn orientation<F: Float>(a: Vec2<F>, b: Vec2<F>, c: Vec2<F>) -> Orientation {
    let area = double_signed_area(a, b, c);
    if area > F::zero() {
        Orientation::CounterClockwise
    } else if area < F::zero() {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if `a -> b -> c` turns strictly counter-clockwise.
#[inline]
pub fn are_points_ccw<F: Float>(a: Vec2<F>, b: Vec2<F>, c: Vec2<F>) -> bool {
    double_signed_area(a, b, c) > F::zero()
}

/// Returns `true` if `p` has the winding of triangle `(a, b, c)` against
/// all three of its edges.
pub fn point_inside<F: Float>(p: Vec2<F>, a: Vec2<F>, b: Vec2<F>, c: Vec2<F>) -> bool {
    let triangle_ccw = are_points_ccw(a, b, c);
    are_points_ccw(p, a, b) == triangle_ccw
        && are_points_ccw(p, b, c) == triangle_ccw
        && are_points_ccw(p, c, a) == triangle_ccw
}

/// Tells whether `v` lies strictly between `a` and `b`.
///
/// The three points are assumed collinear. Compares y coordinates when the
/// line is vertical, x coordinates otherwise. Returns `false` when `v`
/// coincides with either bound.
pub fn point_between<F: Float>(v: Vec2<F>, a: Vec2<F>, b: Vec2<F>) -> bool {
    if a.x == b.x {
        v.y > a.y.min(b.y) && v.y < a.y.max(b.y)
    } else {
        v.x > a.x.min(b.x) && v.x < a.x.max(b.x)
    }
}

/// Inclusive variant of [`point_between`]: returns `true` when `v`
/// coincides with either bound.
pub fn point_between_inclusive<F: Float>(v: Vec2<F>, a: Vec2<F>, b: Vec2<F>) -> bool {
    if a.x == b.x {
        v.y >= a.y.min(b.y) && v.y <= a.y.max(b.y)
    } else {
        v.x >= a.x.min(b.x) && v.x <= a.x.max(b.x)
    }
}
