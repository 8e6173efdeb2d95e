//! Error types for mesh construction and decomposition.

use thiserror::Error;

/// Errors that can occur while building or decomposing a mesh.
///
/// All of them are local to the call that raised them. A failed
/// decomposition leaves the mesh in whatever partially mutated state it
/// reached; decompose a clone if the original must survive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecomposeError {
    /// The two points defining a ray coincide.
    #[error("degenerate ray: tip and target coincide")]
    DegenerateRay,

    /// A segment or line is defined by two coincident points.
    #[error("degenerate segment: endpoints coincide")]
    DegenerateSegment,

    /// Vertex insertion was given two indices that are not adjacent in the
    /// current outline.
    #[error("({a}, {b}) is not an edge of the current outline")]
    InvalidEdge {
        /// First edge index.
        a: usize,
        /// Second edge index.
        b: usize,
    },

    /// An index loop cannot be split at the given pair of indices.
    #[error("cannot split index loop at {a} and {b}")]
    SplitIndex {
        /// First split index.
        a: usize,
        /// Second split index.
        b: usize,
    },

    /// An outline needs at least three indices.
    #[error("outline needs at least 3 indices, got {0}")]
    TooFewIndices(usize),

    /// An index does not address a vertex of the buffer.
    #[error("index {index} out of range for {len} vertices")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the vertex buffer.
        len: usize,
    },
}

/// Result type for mesh operations.
pub type DecomposeResult<T> = std::result::Result<T, DecomposeError>;
