//! Axis-aligned bounding box of an index loop.

use crate::primitives::Vec2;
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// A mesh takes this as a snapshot of its outline when it is constructed.
/// Vertices inserted later by decomposition do not update it, so it always
/// describes the original outline. No containment query is provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox<F> {
    pub xmin: F,
    pub xmax: F,
    pub ymin: F,
    pub ymax: F,
}

impl<F: Float> Bbox<F> {
    /// Creates a box from its extents. Does not validate that min <= max.
    #[inline]
    pub fn new(xmin: F, xmax: F, ymin: F, ymax: F) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    #[inline]
    fn from_point(p: Vec2<F>) -> Self {
        Self::new(p.x, p.x, p.y, p.y)
    }

    /// Creates a box from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut bbox = Self::from_point(first);
        for p in iter {
            bbox = bbox.expand_to_include(p);
        }
        Some(bbox)
    }

    /// Creates a box around the vertices addressed by `indices`.
    ///
    /// Returns `None` if `indices` is empty.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `vertices`.
    pub fn from_indices(vertices: &[Vec2<F>], indices: &[usize]) -> Option<Self> {
        Self::from_points(indices.iter().map(|&i| vertices[i]))
    }

    /// Returns a new box expanded to include the given point.
    #[inline]
    pub fn expand_to_include(self, p: Vec2<F>) -> Self {
        Self {
            xmin: self.xmin.min(p.x),
            xmax: self.xmax.max(p.x),
            ymin: self.ymin.min(p.y),
            ymax: self.ymax.max(p.y),
        }
    }
}
