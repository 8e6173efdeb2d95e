//! anticone - Convex decomposition of simple polygons for navigation meshes
//!
//! Reflex corners of an outline get a cone of admissible diagonal directions,
//! and the nearest edge, vertex or earlier diagonal inside that cone decides
//! where the corner's diagonal lands. The outline is split along the
//! diagonals, and a piece left with a reflex corner is decomposed again on
//! its own. Predicates are exact; the only tolerance is the portal snapping
//! distance in [`DecomposeParams`].

pub mod bounds;
pub mod error;
pub mod mesh;
pub mod polygon;
pub mod predicates;
pub mod primitives;

pub use bounds::Bbox;
pub use error::{DecomposeError, DecomposeResult};
pub use mesh::{Cone, DecomposeParams, DecomposeTrace, Mesh, MeshView, Portal, PortalId, Spike};
pub use predicates::{double_signed_area, segment_crosses_ray, where_segment_crosses_ray, Orientation};
pub use primitives::{Mat2, Vec2};
