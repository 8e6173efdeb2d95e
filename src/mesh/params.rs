//! Parameters for convex decomposition.

use num_traits::Float;

/// Parameters for [`Mesh::break_into_convex`](super::Mesh::break_into_convex).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposeParams<F> {
    /// Exterior turning angle, in degrees, that a reflex vertex must strictly
    /// exceed to be treated as a spike. Also widens every anticone by this
    /// much, capped so the cone never opens past 180 degrees.
    /// Default: 0 (every reflex vertex is a spike).
    pub threshold_degrees: F,

    /// Distance below which a hit on an existing portal is snapped onto the
    /// spike itself. Default: 1e-6.
    pub snap_tolerance: F,
}

impl<F: Float> Default for DecomposeParams<F> {
    fn default() -> Self {
        Self {
            threshold_degrees: F::zero(),
            snap_tolerance: F::from(1e-6).unwrap(),
        }
    }
}

impl<F: Float> DecomposeParams<F> {
    /// Set the spike threshold in degrees.
    #[must_use]
    pub fn with_threshold(mut self, degrees: F) -> Self {
        self.threshold_degrees = degrees;
        self
    }

    /// Set the portal snapping distance.
    #[must_use]
    pub fn with_snap_tolerance(mut self, tolerance: F) -> Self {
        self.snap_tolerance = tolerance;
        self
    }
}
