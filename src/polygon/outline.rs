//! Index-loop polygon utilities.
//!
//! An outline is a cyclic sequence of offsets into a shared vertex buffer.
//! The loop closes implicitly: the last index connects back to the first.

use crate::error::{DecomposeError, DecomposeResult};
use crate::predicates::double_signed_area;
use crate::primitives::Vec2;
use num_traits::Float;

/// Next position in a cyclic sequence of length `len`.
#[inline]
pub fn plus_wrap(pos: usize, len: usize) -> usize {
    if pos + 1 >= len {
        0
    } else {
        pos + 1
    }
}

/// Previous position in a cyclic sequence of length `len`.
#[inline]
pub fn minus_wrap(pos: usize, len: usize) -> usize {
    if pos == 0 {
        len - 1
    } else {
        pos - 1
    }
}

/// Signed area of the polygon described by `indices`.
///
/// Positive for CCW winding, negative for CW winding, zero for an empty loop.
pub fn signed_area<F: Float>(vertices: &[Vec2<F>], indices: &[usize]) -> F {
    let n = indices.len();
    if n == 0 {
        return F::zero();
    }

    let mut area = F::zero();
    for pos in 0..n {
        let v1 = vertices[indices[pos]];
        let v2 = vertices[indices[plus_wrap(pos, n)]];
        area = area + (v1.x - v2.x) * (v1.y + v2.y);
    }

    area / (F::one() + F::one())
}

/// Returns `true` if the loop winds counter-clockwise (strictly positive area).
#[inline]
pub fn check_ccw<F: Float>(vertices: &[Vec2<F>], indices: &[usize]) -> bool {
    signed_area(vertices, indices) > F::zero()
}

/// Returns `true` if no consecutive triple of the loop turns clockwise.
///
/// Collinear triples are accepted. The loop is assumed to wind CCW.
pub fn check_convex<F: Float>(vertices: &[Vec2<F>], indices: &[usize]) -> bool {
    let n = indices.len();
    (0..n).all(|pos| {
        let next = plus_wrap(pos, n);
        let nnext = plus_wrap(next, n);
        double_signed_area(
            vertices[indices[pos]],
            vertices[indices[next]],
            vertices[indices[nnext]],
        ) >= F::zero()
    })
}

/// Splits an index loop along the diagonal `(a, b)`.
///
/// Both halves keep `a` and `b` and preserve the original relative order,
/// so both are valid loops with the winding of the input. A half with fewer
/// than three indices means `(a, b)` was an edge of the loop, not a
/// diagonal; callers decide what to do with that.
pub fn split_index_buffer(
    indices: &[usize],
    a: usize,
    b: usize,
) -> DecomposeResult<(Vec<usize>, Vec<usize>)> {
    if a == b || !indices.contains(&a) || !indices.contains(&b) {
        return Err(DecomposeError::SplitIndex { a, b });
    }

    let mut buffers: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    let mut current = 0;

    for &index in indices {
        if index == a {
            buffers[current].extend([a, b]);
            current = 1 - current;
        } else if index == b {
            buffers[current].extend([b, a]);
            current = 1 - current;
        } else {
            buffers[current].push(index);
        }
    }

    let [first, second] = buffers;
    Ok((first, second))
}

/// Flattens a loop into `[x0, y0, x1, y1, ..., x0, y0]`.
///
/// The first point is repeated at the end to close the shape. An empty loop
/// gives an empty vector.
pub fn outline_coordinates<F: Float>(vertices: &[Vec2<F>], indices: &[usize]) -> Vec<F> {
    let Some(&first) = indices.first() else {
        return Vec::new();
    };

    let mut coords = Vec::with_capacity(2 * indices.len() + 2);
    for &i in indices.iter().chain(std::iter::once(&first)) {
        coords.push(vertices[i].x);
        coords.push(vertices[i].y);
    }
    coords
}
