//! Borrowed views of decomposed pieces.

use super::Mesh;
use crate::bounds::Bbox;
use crate::error::DecomposeResult;
use crate::polygon;
use crate::primitives::Vec2;
use num_traits::Float;

/// A read-only outline over a vertex buffer owned elsewhere.
///
/// Views returned by [`Mesh::pieces_as_views`] borrow the mesh, so the
/// buffer cannot change while they are alive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshView<'a, F> {
    vertices: &'a [Vec2<F>],
    indices: &'a [usize],
}

impl<'a, F: Float> MeshView<'a, F> {
    pub fn new(vertices: &'a [Vec2<F>], indices: &'a [usize]) -> Self {
        Self { vertices, indices }
    }

    #[inline]
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    /// The whole shared vertex buffer, not only the vertices of this piece.
    #[inline]
    pub fn vertices(&self) -> &'a [Vec2<F>] {
        self.vertices
    }

    pub fn signed_area(&self) -> F {
        polygon::signed_area(self.vertices, self.indices)
    }

    pub fn is_convex(&self) -> bool {
        polygon::check_convex(self.vertices, self.indices)
    }

    /// Flattened closed loop, first point repeated at the end.
    pub fn outline_coordinates(&self) -> Vec<F> {
        polygon::outline_coordinates(self.vertices, self.indices)
    }

    /// Bounding box of the piece's own vertices. `None` for an empty view.
    pub fn bbox(&self) -> Option<Bbox<F>> {
        Bbox::from_indices(self.vertices, self.indices)
    }

    /// Copies the view into an independent mesh over a copy of the buffer.
    pub fn to_mesh(&self) -> DecomposeResult<Mesh<F>> {
        Mesh::new(self.vertices.to_vec(), self.indices.to_vec())
    }
}
