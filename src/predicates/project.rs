//! Orthogonal projection onto lines and segments.

use super::point_between;
use crate::error::{DecomposeError, DecomposeResult};
use crate::primitives::Vec2;
use num_traits::Float;

/// Projects `v` onto the infinite line through `a` and `b`.
///
/// Returns [`DecomposeError::DegenerateSegment`] if `a == b`.
pub fn project_to_line<F: Float>(v: Vec2<F>, a: Vec2<F>, b: Vec2<F>) -> DecomposeResult<Vec2<F>> {
    if a == b {
        return Err(DecomposeError::DegenerateSegment);
    }
    let span = b - a;
    let coef = (v - a).dot(span) / span.dot(span);
    Ok(a + span * coef)
}

/// Distance from `v` to the infinite line through `a` and `b`.
pub fn vertex_to_line_dist<F: Float>(v: Vec2<F>, a: Vec2<F>, b: Vec2<F>) -> DecomposeResult<F> {
    Ok(project_to_line(v, a, b)?.distance(v))
}

/// Distance from `v` to the closed segment `[a, b]` and the closest point
/// on it.
///
/// When the projection falls outside the segment the nearer endpoint is
/// used (`b` on ties).
pub fn vertex_to_segment_dist<F: Float>(
    v: Vec2<F>,
    a: Vec2<F>,
    b: Vec2<F>,
) -> DecomposeResult<(F, Vec2<F>)> {
    let proj = project_to_line(v, a, b)?;
    if point_between(proj, a, b) {
        return Ok((proj.distance(v), proj));
    }

    let dist_a = a.distance(v);
    let dist_b = b.distance(v);
    if dist_a < dist_b {
        Ok((dist_a, a))
    } else {
        Ok((dist_b, b))
    }
}
