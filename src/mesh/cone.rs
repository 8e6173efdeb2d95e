//! Spike detection and anticone construction.

use super::Mesh;
use crate::error::{DecomposeError, DecomposeResult};
use crate::polygon::{minus_wrap, plus_wrap};
use crate::predicates::{double_signed_area, point_between, project_to_line, where_segment_crosses_ray};
use crate::primitives::{Mat2, Vec2};
use log::debug;
use num_traits::Float;

/// A reflex vertex of the outline, with its outline neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spike {
    /// Vertex index preceding the spike on the outline.
    pub prev: usize,
    /// Vertex index of the spike.
    pub index: usize,
    /// Vertex index following the spike on the outline.
    pub next: usize,
}

/// A cone anchored at `tip`, bounded by the rays `tip -> left` and
/// `tip -> right`.
///
/// A point is inside when it is strictly left of `tip -> right` and strictly
/// right of `tip -> left`. Points on either bounding ray are outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone<F> {
    pub left: Vec2<F>,
    pub tip: Vec2<F>,
    pub right: Vec2<F>,
}

impl<F: Float> Cone<F> {
    /// Creates a cone from its tip and a point on each bounding ray.
    #[inline]
    pub fn new(left: Vec2<F>, tip: Vec2<F>, right: Vec2<F>) -> Self {
        Self { left, tip, right }
    }

    /// Returns `true` if `v` lies strictly inside the cone.
    pub fn contains(&self, v: Vec2<F>) -> bool {
        let right_area = double_signed_area(self.tip, self.right, v);
        let left_area = double_signed_area(self.tip, self.left, v);
        right_area > F::zero() && left_area < F::zero()
    }

    /// Returns `true` if part of the segment `[a, b]` lies inside the cone.
    ///
    /// Either an endpoint is inside, or the segment crosses both bounding
    /// rays somewhere other than at the tip.
    pub fn admits_segment(&self, a: Vec2<F>, b: Vec2<F>) -> DecomposeResult<bool> {
        if self.contains(a) || self.contains(b) {
            return Ok(true);
        }

        let left_hit = where_segment_crosses_ray(a, b, self.tip, self.left)?;
        let right_hit = where_segment_crosses_ray(a, b, self.tip, self.right)?;
        Ok(match (left_hit, right_hit) {
            (Some(l), Some(r)) => !(l == self.tip && r == self.tip),
            _ => false,
        })
    }

    /// The point of segment `[a, b]` nearest to the tip among the points
    /// inside the cone, with its distance to the tip.
    ///
    /// The tip is projected onto the segment's line. A projection inside the
    /// cone is used directly when it falls strictly within the segment;
    /// otherwise the nearer endpoint is used. A projection outside the cone
    /// gives way to the nearest crossing with a bounding ray, or to the
    /// nearest endpoint inside the cone when that is closer.
    pub fn closest_point_on_segment(
        &self,
        a: Vec2<F>,
        b: Vec2<F>,
    ) -> DecomposeResult<Option<(Vec2<F>, F)>> {
        let tip = self.tip;
        let proj = project_to_line(tip, a, b)?;

        if self.contains(proj) {
            if point_between(proj, a, b) {
                return Ok(Some((proj, tip.distance(proj))));
            }
            let dist_a = tip.distance(a);
            let dist_b = tip.distance(b);
            return Ok(Some(if dist_a < dist_b { (a, dist_a) } else { (b, dist_b) }));
        }

        let mut best: Option<(Vec2<F>, F)> = None;
        let mut consider = |p: Vec2<F>| {
            let dist = tip.distance(p);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((p, dist));
            }
        };

        // Right first so that ties go to the right ray.
        for through in [self.right, self.left] {
            if let Some(p) = where_segment_crosses_ray(a, b, tip, through)? {
                consider(p);
            }
        }
        for endpoint in [a, b] {
            if self.contains(endpoint) {
                consider(endpoint);
            }
        }

        Ok(best)
    }
}

impl<F: Float> Mesh<F> {
    /// Finds the reflex vertices whose exterior turning angle, in degrees,
    /// strictly exceeds `threshold`.
    ///
    /// Spikes are returned in outline order.
    pub fn find_spikes(&self, threshold: F) -> Vec<Spike> {
        let n = self.indices.len();
        let mut spikes = Vec::new();

        for pos in 0..n {
            let prev = self.indices[minus_wrap(pos, n)];
            let index = self.indices[pos];
            let next = self.indices[plus_wrap(pos, n)];

            let prev_v = self.vertices[prev];
            let cur_v = self.vertices[index];
            let next_v = self.vertices[next];

            if double_signed_area(prev_v, cur_v, next_v) >= F::zero() {
                continue;
            }

            let exterior = (cur_v - prev_v).angle(next_v - cur_v).to_degrees();
            if exterior > threshold {
                debug!("spike at vertex {index} (exterior angle {:?} deg)", exterior.to_f64());
                spikes.push(Spike { prev, index, next });
            }
        }

        spikes
    }

    /// Builds the anticone of a spike.
    ///
    /// The cone starts as the opening between the two edge directions
    /// pointing away from the spike's neighbours. It is widened by
    /// `threshold` degrees in total, half on each side, but never past 180
    /// degrees.
    pub fn anticone(&self, spike: &Spike, threshold: F) -> DecomposeResult<Cone<F>> {
        let tip = self.vertices[spike.index];
        let from_prev = (tip - self.vertices[spike.prev])
            .normalize()
            .ok_or(DecomposeError::DegenerateSegment)?;
        let from_next = (tip - self.vertices[spike.next])
            .normalize()
            .ok_or(DecomposeError::DegenerateSegment)?;

        let opening = from_prev.dot(from_next).max(-F::one()).min(F::one()).acos();
        let widened = (opening + threshold.to_radians()).min(F::from(std::f64::consts::PI).unwrap());
        let half_clearance = (widened - opening) / (F::one() + F::one());

        let right_dir = Mat2::rotation(-half_clearance) * from_prev;
        let left_dir = Mat2::rotation(half_clearance) * from_next;

        Ok(Cone::new(tip + left_dir, tip, tip + right_dir))
    }
}
