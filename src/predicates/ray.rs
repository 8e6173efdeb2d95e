//! Ray / segment crossing with exact degenerate-case handling.
//!
//! A ray is given by its tip and a second point it passes through. It is a
//! half-line: it starts at the tip and extends past the second point.

use super::{orientation, point_between_inclusive, vertex_to_line_dist, Orientation};
use crate::error::{DecomposeError, DecomposeResult};
use crate::primitives::Vec2;
use num_traits::Float;

/// Returns `true` if the ray from `tip` through `through` intersects the
/// closed segment `[seg1, seg2]`.
///
/// Touching a segment endpoint counts, and so does a crossing at the tip of
/// the ray. A segment overlapping the ray in more than one point does not
/// count as crossing.
///
/// Returns [`DecomposeError::DegenerateRay`] if `tip == through`.
pub fn segment_crosses_ray<F: Float>(
    seg1: Vec2<F>,
    seg2: Vec2<F>,
    tip: Vec2<F>,
    through: Vec2<F>,
) -> DecomposeResult<bool> {
    if tip == through {
        return Err(DecomposeError::DegenerateRay);
    }

    let side1 = orientation(tip, through, seg1);
    let side2 = orientation(tip, through, seg2);

    match (side1, side2) {
        // Segment lies on the ray axis: only a single shared point at the tip counts.
        (Orientation::Collinear, Orientation::Collinear) => Ok((seg1 == tip
            && point_between_inclusive(tip, seg2, through))
            || (seg2 == tip && point_between_inclusive(tip, seg1, through))),
        (Orientation::Collinear, _) => Ok(vertex_on_ray(seg1, tip, through)),
        (_, Orientation::Collinear) => Ok(vertex_on_ray(seg2, tip, through)),
        (s1, s2) if s1 == s2 => Ok(false),
        _ => {
            let tip_side = orientation(seg1, seg2, tip);
            if tip_side == Orientation::Collinear {
                return Ok(point_between_inclusive(tip, seg1, seg2));
            }
            let through_side = orientation(seg1, seg2, through);
            if through_side == Orientation::Collinear {
                return Ok(point_between_inclusive(through, seg1, seg2));
            }

            if tip_side != through_side {
                return Ok(true);
            }

            // Both ray points on one side: the ray reaches the segment only
            // if it heads towards the segment's line.
            let tip_dist = vertex_to_line_dist(tip, seg1, seg2)?;
            let through_dist = vertex_to_line_dist(through, seg1, seg2)?;
            Ok(tip_dist >= through_dist)
        }
    }
}

/// Returns the point where the ray from `tip` through `through` meets the
/// segment `[seg1, seg2]`, or `None` if [`segment_crosses_ray`] reports no
/// crossing.
///
/// A segment lying on the ray axis can only cross at the tip, which is
/// returned as is.
pub fn where_segment_crosses_ray<F: Float>(
    seg1: Vec2<F>,
    seg2: Vec2<F>,
    tip: Vec2<F>,
    through: Vec2<F>,
) -> DecomposeResult<Option<Vec2<F>>> {
    if !segment_crosses_ray(seg1, seg2, tip, through)? {
        return Ok(None);
    }

    if orientation(tip, through, seg1) == Orientation::Collinear
        && orientation(tip, through, seg2) == Orientation::Collinear
    {
        return Ok(Some(tip));
    }

    let point = if through.x == tip.x {
        let seg_slope = (seg2.y - seg1.y) / (seg2.x - seg1.x);
        Vec2::new(tip.x, seg1.y + (tip.x - seg1.x) * seg_slope)
    } else if seg2.x == seg1.x {
        let ray_slope = (through.y - tip.y) / (through.x - tip.x);
        Vec2::new(seg1.x, tip.y + (seg1.x - tip.x) * ray_slope)
    } else {
        let ray_slope = (through.y - tip.y) / (through.x - tip.x);
        let seg_slope = (seg2.y - seg1.y) / (seg2.x - seg1.x);
        let x = (tip.y - seg1.y + seg1.x * seg_slope - tip.x * ray_slope) / (seg_slope - ray_slope);
        Vec2::new(x, tip.y + (x - tip.x) * ray_slope)
    };

    Ok(Some(point))
}

/// `v` is known to be on the ray axis; checks it is on the tip's side.
fn vertex_on_ray<F: Float>(v: Vec2<F>, tip: Vec2<F>, through: Vec2<F>) -> bool {
    point_between_inclusive(v, tip, through) || point_between_inclusive(through, tip, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vec2<f64> {
        Vec2::new(x, y)
    }

    fn crosses(s1: Vec2<f64>, s2: Vec2<f64>, tip: Vec2<f64>, through: Vec2<f64>) -> bool {
        segment_crosses_ray(s1, s2, tip, through).unwrap()
    }

    #[test]
    fn test_degenerate_ray() {
        assert_eq!(
            segment_crosses_ray(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 2.0), v(2.0, 2.0)),
            Err(DecomposeError::DegenerateRay)
        );
        assert_eq!(
            where_segment_crosses_ray(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 2.0), v(2.0, 2.0)),
            Err(DecomposeError::DegenerateRay)
        );
    }

    #[test]
    fn test_vertical_ray_through_horizontal_segment() {
        let hit = where_segment_crosses_ray(v(0.0, 0.0), v(2.0, 0.0), v(1.0, -1.0), v(1.0, 1.0));
        assert_eq!(hit, Ok(Some(v(1.0, 0.0))));
    }

    #[test]
    fn test_parallel_ray_misses() {
        assert!(!crosses(v(0.0, 0.0), v(2.0, 0.0), v(1.0, -1.0), v(3.0, -1.0)));
        assert_eq!(
            where_segment_crosses_ray(v(0.0, 0.0), v(2.0, 0.0), v(1.0, -1.0), v(3.0, -1.0)),
            Ok(None)
        );
    }

    #[test]
    fn test_ray_extends_past_its_target() {
        // Target sits between tip and segment: still a crossing.
        assert!(crosses(v(0.0, 0.0), v(2.0, 0.0), v(1.0, -2.0), v(1.0, -1.0)));
        // Ray points away from the segment.
        assert!(!crosses(v(0.0, 0.0), v(2.0, 0.0), v(1.0, -1.0), v(1.0, -2.0)));
    }

    #[test]
    fn test_target_on_segment() {
        assert!(crosses(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 2.0), v(2.0, 0.0)));
        // Target on the segment's line but outside the segment.
        assert!(!crosses(v(0.0, 0.0), v(4.0, 0.0), v(6.0, 2.0), v(6.0, 0.0)));
    }

    #[test]
    fn test_tip_on_segment() {
        assert!(crosses(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 0.0), v(3.0, 5.0)));
        assert_eq!(
            where_segment_crosses_ray(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 0.0), v(3.0, 5.0)),
            Ok(Some(v(2.0, 0.0)))
        );
    }

    #[test]
    fn test_segment_endpoint_on_ray() {
        // seg1 on the ray, ahead of the tip.
        assert!(crosses(v(0.0, 3.0), v(1.0, 5.0), v(0.0, 0.0), v(0.0, 1.0)));
        // seg2 on the ray axis but behind the tip.
        assert!(!crosses(v(1.0, 5.0), v(0.0, -3.0), v(0.0, 0.0), v(0.0, 1.0)));
        // Endpoint exactly at the tip.
        assert!(crosses(v(0.0, 0.0), v(1.0, 5.0), v(0.0, 0.0), v(0.0, 1.0)));
    }

    #[test]
    fn test_collinear_overlap() {
        // Overlap in more than one point is not a crossing.
        assert!(!crosses(v(0.0, 0.0), v(5.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)));
        // Collinear segment entirely behind the tip.
        assert!(!crosses(v(-5.0, 0.0), v(-1.0, 0.0), v(0.0, 0.0), v(1.0, 0.0)));
        // Segment touching the tip from behind.
        assert!(crosses(v(-5.0, 0.0), v(0.0, 0.0), v(0.0, 0.0), v(1.0, 0.0)));
        assert_eq!(
            where_segment_crosses_ray(v(-5.0, 0.0), v(0.0, 0.0), v(0.0, 0.0), v(1.0, 0.0)),
            Ok(Some(v(0.0, 0.0)))
        );
    }

    #[test]
    fn test_same_side_misses() {
        assert!(!crosses(v(0.0, 1.0), v(2.0, 3.0), v(0.0, 0.0), v(1.0, 0.0)));
    }

    #[test]
    fn test_crossing_point_general() {
        let hit = where_segment_crosses_ray(v(0.0, 4.0), v(4.0, 0.0), v(0.0, 0.0), v(1.0, 1.0))
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(hit.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_crossing_point_vertical_segment() {
        let hit = where_segment_crosses_ray(v(3.0, -1.0), v(3.0, 5.0), v(0.0, 0.0), v(1.0, 1.0))
            .unwrap()
            .unwrap();
        assert_relative_eq!(hit.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(hit.y, 3.0, epsilon = 1e-12);
    }
}
