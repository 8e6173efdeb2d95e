//! Exact geometric predicates.
//!
//! Signed areas, collinear containment, projections and ray/segment
//! crossing. Nothing in this module applies a tolerance: collinearity means
//! a signed area of exactly zero and coincidence means exact equality.

mod orient;
mod project;
mod ray;

pub use orient::{
    are_points_ccw, double_signed_area, orientation, point_between, point_between_inclusive,
    point_inside, Orientation,
};
pub use project::{project_to_line, vertex_to_line_dist, vertex_to_segment_dist};
pub use ray::{segment_crosses_ray, where_segment_crosses_ray};
