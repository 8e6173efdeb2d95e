//! Polygon outline mesh and its convex decomposition.
//!
//! A [`Mesh`] owns a vertex buffer and an outline loop of indices into it.
//! [`Mesh::break_into_convex`] splits the outline into convex pieces with the
//! anticone portal construction of Oliva and Pelechano ("Automatic Generation
//! of Suboptimal NavMeshes"):
//!
//! 1. every reflex vertex above the angle threshold is a *spike*;
//! 2. each spike gets an *anticone*, the cone of directions a diagonal may
//!    take from it;
//! 3. the nearest edge, vertex or earlier portal inside the cone decides
//!    where the spike's portal lands;
//! 4. portal endpoints that are not vertices yet are inserted into the outline;
//! 5. the outline is split along the portals until no portal applies;
//! 6. a piece that still has a reflex corner, because its spike's portal
//!    collapsed onto an earlier one, is decomposed again as a mesh of its own.
//!
//! # Example
//!
//! ```
//! use anticone::Mesh;
//!
//! let mut mesh: Mesh<f64> = Mesh::from_coords(&[
//!     (0.0, 0.0),
//!     (4.0, 0.0),
//!     (4.0, 2.0),
//!     (2.0, 2.0),
//!     (2.0, 4.0),
//!     (0.0, 4.0),
//! ])
//! .unwrap();
//!
//! mesh.decompose(0.0).unwrap();
//! assert_eq!(mesh.pieces().len(), 2);
//! for piece in mesh.pieces_as_views() {
//!     assert!(piece.is_convex());
//! }
//! ```

mod cone;
mod decompose;
mod params;
mod portal;
mod view;

pub use cone::{Cone, Spike};
pub use decompose::{DecomposeTrace, RayHit};
pub use params::DecomposeParams;
pub use portal::{EdgeHit, Portal, PortalHit, PortalId, VertexHit};
pub use view::MeshView;

use crate::bounds::Bbox;
use crate::error::{DecomposeError, DecomposeResult};
use crate::polygon::{self, check_ccw};
use crate::primitives::Vec2;
use num_traits::Float;

/// A simple polygon outline over a growable vertex buffer.
///
/// The outline is normalized to counter-clockwise winding on construction.
/// Vertices are only ever appended, so an index stays valid for the life of
/// the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<F> {
    vertices: Vec<Vec2<F>>,
    indices: Vec<usize>,
    bbox: Bbox<F>,
    pieces: Vec<Vec<usize>>,
    portals: Vec<(usize, usize)>,
}

impl<F: Float> Mesh<F> {
    /// Creates a mesh from a vertex buffer and an outline loop.
    ///
    /// A clockwise loop is reversed. Fails if the loop has fewer than three
    /// indices or addresses a vertex outside the buffer.
    pub fn new(vertices: Vec<Vec2<F>>, indices: Vec<usize>) -> DecomposeResult<Self> {
        if indices.len() < 3 {
            return Err(DecomposeError::TooFewIndices(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
            return Err(DecomposeError::IndexOutOfRange {
                index,
                len: vertices.len(),
            });
        }

        let mut indices = indices;
        if !check_ccw(&vertices, &indices) {
            indices.reverse();
        }

        let bbox = Bbox::from_indices(&vertices, &indices)
            .ok_or(DecomposeError::TooFewIndices(indices.len()))?;

        Ok(Self {
            vertices,
            indices,
            bbox,
            pieces: Vec::new(),
            portals: Vec::new(),
        })
    }

    /// Creates a mesh whose outline visits every coordinate pair in order.
    pub fn from_coords(coords: &[(F, F)]) -> DecomposeResult<Self> {
        let vertices = coords.iter().copied().map(Vec2::from).collect();
        Self::new(vertices, (0..coords.len()).collect())
    }

    /// The vertex buffer, including vertices inserted by decomposition.
    #[inline]
    pub fn vertices(&self) -> &[Vec2<F>] {
        &self.vertices
    }

    /// The current CCW outline.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Bounding box of the outline as it was at construction.
    #[inline]
    pub fn bbox(&self) -> Bbox<F> {
        self.bbox
    }

    /// Convex pieces produced by decomposition.
    #[inline]
    pub fn pieces(&self) -> &[Vec<usize>] {
        &self.pieces
    }

    /// Diagonals applied by decomposition, as `(start, end)` vertex indices,
    /// in the order they were applied.
    #[inline]
    pub fn portals(&self) -> &[(usize, usize)] {
        &self.portals
    }

    /// Signed area of the current outline. Positive after construction.
    pub fn signed_area(&self) -> F {
        polygon::signed_area(&self.vertices, &self.indices)
    }

    /// Returns `true` if the current outline has no clockwise turn.
    pub fn is_convex(&self) -> bool {
        polygon::check_convex(&self.vertices, &self.indices)
    }

    /// Flattens a closed loop of coordinates, repeating the first point.
    ///
    /// Uses the outline when `indices` is `None`.
    ///
    /// # Panics
    ///
    /// Panics if a given index is out of range.
    pub fn outline_coordinates(&self, indices: Option<&[usize]>) -> Vec<F> {
        polygon::outline_coordinates(&self.vertices, indices.unwrap_or(&self.indices))
    }

    /// Flattens a triangle into a closed loop of eight coordinates.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub fn triangle_coordinates(&self, triangle: [usize; 3]) -> [F; 8] {
        let [a, b, c] = triangle.map(|i| self.vertices[i]);
        [a.x, a.y, b.x, b.y, c.x, c.y, a.x, a.y]
    }

    /// Read-only views of the finalized pieces over this mesh's vertex buffer.
    pub fn pieces_as_views(&self) -> Vec<MeshView<'_, F>> {
        self.pieces
            .iter()
            .map(|piece| MeshView::new(&self.vertices, piece))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn l_shape() -> Mesh<f64> {
        Mesh::from_coords(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_keeps_ccw_outline() {
        let mesh = l_shape();
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.signed_area(), 12.0);
        assert!(mesh.pieces().is_empty());
        assert!(mesh.portals().is_empty());
    }

    #[test]
    fn test_new_reverses_cw_outline() {
        let vertices = l_shape().vertices().to_vec();
        let mesh = Mesh::new(vertices, vec![5, 4, 3, 2, 1, 0]).unwrap();
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
        assert!(mesh.signed_area() > 0.0);
    }

    #[test]
    fn test_new_rejects_short_outline() {
        let vertices = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        assert_eq!(
            Mesh::new(vertices, vec![0, 1]),
            Err(DecomposeError::TooFewIndices(2))
        );
    }

    #[test]
    fn test_new_rejects_out_of_range_index() {
        let vertices = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(
            Mesh::new(vertices, vec![0, 1, 3]),
            Err(DecomposeError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_bbox_snapshot() {
        let mesh = l_shape();
        assert_eq!(mesh.bbox(), Bbox::new(0.0, 4.0, 0.0, 4.0));
    }

    #[test]
    fn test_bbox_covers_only_outline_subset() {
        let vertices = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(50.0, 50.0),
        ];
        let mesh = Mesh::new(vertices, vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.bbox(), Bbox::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_coordinates() {
        let mesh = l_shape();
        let coords = mesh.outline_coordinates(None);
        assert_eq!(coords.len(), 14);
        assert_eq!(&coords[12..], &[0.0, 0.0]);

        assert_eq!(
            mesh.outline_coordinates(Some(&[1, 2, 3])),
            vec![4.0, 0.0, 4.0, 2.0, 2.0, 2.0, 4.0, 0.0]
        );
        assert_eq!(
            mesh.triangle_coordinates([0, 1, 5]),
            [0.0, 0.0, 4.0, 0.0, 0.0, 4.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_is_convex() {
        assert!(!l_shape().is_convex());
        let square = Mesh::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        assert!(square.is_convex());
    }
}
