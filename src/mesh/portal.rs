//! Nearest-feature searches inside an anticone and portal synthesis.
//!
//! Every spike looks for the nearest outline edge, outline vertex and
//! previously synthesized portal inside its anticone. The edge is the
//! fallback target; a vertex takes over on ties, and a portal only when it
//! is strictly closer. A spike that lands on a portal never connects to the
//! portal's interior: it reuses one of that portal's endpoints, or both.

use super::{Cone, DecomposeParams, Mesh, Spike};
use crate::error::DecomposeResult;
use crate::polygon::plus_wrap;
use crate::primitives::Vec2;
use log::debug;
use num_traits::Float;

/// Position of a portal in the list produced by
/// [`Mesh::synthesize_portals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortalId(pub usize);

impl PortalId {
    /// The position in the portal list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A candidate diagonal starting at a spike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal<F> {
    /// Vertex index of the spike the portal starts from.
    pub start_index: usize,
    /// Vertex index of the far end, once it exists.
    pub end_index: Option<usize>,
    /// Position of the far end. Always known, even before `end_index`.
    pub end_point: Vec2<F>,
    /// Portal whose endpoint this one reuses. An unresolved `end_index` is
    /// inherited from it after endpoints are materialized.
    pub parent: Option<PortalId>,
    /// Set once the portal has been used to split a piece.
    pub created: bool,
}

impl<F: Float> Portal<F> {
    /// Creates an unresolved portal from `start_index` towards `end_point`.
    pub fn new(start_index: usize, end_point: Vec2<F>) -> Self {
        Self {
            start_index,
            end_index: None,
            end_point,
            parent: None,
            created: false,
        }
    }

    /// Returns `true` once the far end is a vertex index.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.end_index.is_some()
    }
}

/// Nearest outline edge inside a cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit<F> {
    /// The edge as `(from, to)` vertex indices in outline order.
    pub edge: (usize, usize),
    pub point: Vec2<F>,
    pub distance: F,
}

/// Nearest outline vertex inside a cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHit<F> {
    pub index: usize,
    pub distance: F,
}

/// Nearest earlier portal inside a cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalHit<F> {
    pub portal: PortalId,
    pub point: Vec2<F>,
    pub distance: F,
}

impl<F: Float> Mesh<F> {
    /// Finds the outline edge nearest to the cone's tip among the edges the
    /// cone admits.
    ///
    /// Edges touching the tip are skipped. The first edge wins ties.
    pub fn find_closest_edge(&self, cone: &Cone<F>) -> DecomposeResult<Option<EdgeHit<F>>> {
        let n = self.indices.len();
        let mut best: Option<EdgeHit<F>> = None;

        for pos in 0..n {
            let from = self.indices[pos];
            let to = self.indices[plus_wrap(pos, n)];
            let a = self.vertices[from];
            let b = self.vertices[to];

            if a == cone.tip || b == cone.tip || !cone.admits_segment(a, b)? {
                continue;
            }

            if let Some((point, distance)) = cone.closest_point_on_segment(a, b)? {
                if best.map_or(true, |hit| distance < hit.distance) {
                    best = Some(EdgeHit {
                        edge: (from, to),
                        point,
                        distance,
                    });
                }
            }
        }

        Ok(best)
    }

    /// Finds the outline vertex strictly inside the cone nearest to its tip.
    pub fn find_closest_vertex(&self, cone: &Cone<F>) -> Option<VertexHit<F>> {
        let mut best: Option<VertexHit<F>> = None;

        for &index in &self.indices {
            let v = self.vertices[index];
            if v == cone.tip || !cone.contains(v) {
                continue;
            }
            let distance = v.distance(cone.tip);
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(VertexHit { index, distance });
            }
        }

        best
    }

    /// Finds the portal of `portals` nearest to the cone's tip among those
    /// the cone admits.
    pub fn find_closest_portal(
        &self,
        cone: &Cone<F>,
        portals: &[Portal<F>],
    ) -> DecomposeResult<Option<PortalHit<F>>> {
        let mut best: Option<PortalHit<F>> = None;

        for (id, portal) in portals.iter().enumerate() {
            let a = self.vertices[portal.start_index];
            let b = portal.end_point;
            if !cone.admits_segment(a, b)? {
                continue;
            }

            if let Some((point, distance)) = cone.closest_point_on_segment(a, b)? {
                if best.map_or(true, |hit| distance < hit.distance) {
                    best = Some(PortalHit {
                        portal: PortalId(id),
                        point,
                        distance,
                    });
                }
            }
        }

        Ok(best)
    }

    /// Synthesizes one or two portals for every spike, in outline order.
    ///
    /// The mesh is not modified: portals ending on an edge carry only their
    /// `end_point` until [`Mesh::break_into_convex`] materializes them.
    pub fn synthesize_portals(&self, params: &DecomposeParams<F>) -> DecomposeResult<Vec<Portal<F>>> {
        let threshold = params.threshold_degrees;
        let mut portals = Vec::new();

        for spike in self.find_spikes(threshold) {
            let cone = self.anticone(&spike, threshold)?;
            let emitted = self.portals_for_spike(&spike, &cone, &portals, params.snap_tolerance)?;
            portals.extend(emitted);
        }

        Ok(portals)
    }

    /// Resolves the portals of a single spike against the portals emitted
    /// so far.
    pub(crate) fn portals_for_spike(
        &self,
        spike: &Spike,
        cone: &Cone<F>,
        existing: &[Portal<F>],
        snap_tolerance: F,
    ) -> DecomposeResult<Vec<Portal<F>>> {
        let tip = cone.tip;

        let Some(edge) = self.find_closest_edge(cone)? else {
            debug!("spike {} sees no edge inside its anticone", spike.index);
            return Ok(Vec::new());
        };
        let vertex = self.find_closest_vertex(cone);
        let portal_hit = self.find_closest_portal(cone, existing)?.map(|mut hit| {
            if hit.distance < snap_tolerance {
                hit.point.snap_to(tip);
                hit.distance = F::zero();
            }
            hit
        });

        let mut portal = Portal::new(spike.index, edge.point);
        // An edge hit exactly on one of the edge's vertices needs no new vertex.
        portal.end_index = [edge.edge.0, edge.edge.1]
            .into_iter()
            .find(|&i| self.vertices[i] == edge.point);
        let mut second = None;
        let mut closest = edge.distance;

        if let Some(hit) = vertex.filter(|hit| hit.distance <= closest) {
            closest = hit.distance;
            portal.end_index = Some(hit.index);
            portal.end_point = self.vertices[hit.index];
        }

        if let Some(hit) = portal_hit.filter(|hit| hit.distance < closest) {
            let other = existing[hit.portal.index()];
            let to_start = (Some(other.start_index), self.vertices[other.start_index]);
            let to_end = (other.end_index, other.end_point);

            if hit.point == to_start.1 {
                (portal.end_index, portal.end_point) = to_start;
            } else if hit.point == to_end.1 {
                (portal.end_index, portal.end_point) = to_end;
            } else {
                match (cone.contains(to_start.1), cone.contains(to_end.1)) {
                    (true, true) => {
                        let nearer = if tip.distance(to_start.1) <= tip.distance(to_end.1) {
                            to_start
                        } else {
                            to_end
                        };
                        (portal.end_index, portal.end_point) = nearer;
                    }
                    (true, false) => (portal.end_index, portal.end_point) = to_start,
                    (false, true) => (portal.end_index, portal.end_point) = to_end,
                    (false, false) => {
                        (portal.end_index, portal.end_point) = to_start;
                        let mut towards_end = Portal::new(spike.index, to_end.1);
                        towards_end.end_index = to_end.0;
                        towards_end.parent = Some(hit.portal);
                        second = Some(towards_end);
                    }
                }
            }
            portal.parent = Some(hit.portal);
        }

        let mut emitted = Vec::with_capacity(2);
        for candidate in std::iter::once(portal).chain(second) {
            if candidate.end_point == tip {
                debug!("discarding zero-length portal at spike {}", spike.index);
                continue;
            }
            debug!(
                "portal from {} to {:?} (end index {:?}, parent {:?})",
                candidate.start_index,
                (candidate.end_point.x.to_f64(), candidate.end_point.y.to_f64()),
                candidate.end_index,
                candidate.parent.map(PortalId::index),
            );
            emitted.push(candidate);
        }

        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::l_shape;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64) -> Vec2<f64> {
        Vec2::new(x, y)
    }

    const L_SPIKE: Spike = Spike {
        prev: 2,
        index: 3,
        next: 4,
    };

    fn l_cone() -> Cone<f64> {
        Cone::new(v(2.0, 1.0), v(2.0, 2.0), v(1.0, 2.0))
    }

    /// L-shape outline with an extra off-outline vertex at index 6.
    fn l_shape_with(extra: Vec2<f64>) -> Mesh<f64> {
        let mut vertices = l_shape().vertices().to_vec();
        vertices.push(extra);
        Mesh::new(vertices, vec![0, 1, 2, 3, 4, 5]).unwrap()
    }

    fn resolve(mesh: &Mesh<f64>, existing: &[Portal<f64>]) -> Vec<Portal<f64>> {
        mesh.portals_for_spike(&L_SPIKE, &l_cone(), existing, 1e-6)
            .unwrap()
    }

    #[test]
    fn test_closest_edge_first_wins_ties() {
        let mesh = l_shape();
        let hit = mesh.find_closest_edge(&l_cone()).unwrap().unwrap();
        // Edge (5, 0) is hit at (0, 2) at the same distance; (0, 1) comes first.
        assert_eq!(hit.edge, (0, 1));
        assert_eq!(hit.point, v(2.0, 0.0));
        assert_eq!(hit.distance, 2.0);
    }

    #[test]
    fn test_closest_vertex() {
        let mesh = l_shape();
        let hit = mesh.find_closest_vertex(&l_cone()).unwrap();
        assert_eq!(hit.index, 0);
        assert_relative_eq!(hit.distance, 8.0_f64.sqrt(), epsilon = 1e-12);

        let narrow = Cone::new(v(3.0, 1.0), v(2.0, 2.0), v(3.0, 3.0));
        assert!(mesh.find_closest_vertex(&narrow).is_none());
    }

    #[test]
    fn test_closest_portal() {
        let mesh = l_shape_with(v(3.0, 0.0));
        let far = Portal::new(1, v(4.0, 2.0));
        let near = Portal::new(6, v(0.0, 3.0));
        let hit = mesh
            .find_closest_portal(&l_cone(), &[far, near])
            .unwrap()
            .unwrap();
        assert_eq!(hit.portal, PortalId(1));
        assert_relative_eq!(hit.point.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(hit.point.y, 1.5, epsilon = 1e-12);

        assert!(mesh.find_closest_portal(&l_cone(), &[]).unwrap().is_none());
    }

    #[test]
    fn test_synthesize_l_shape() {
        let mesh = l_shape();
        let portals = mesh.synthesize_portals(&DecomposeParams::default()).unwrap();
        assert_eq!(portals, vec![Portal::new(3, v(2.0, 0.0))]);
        assert!(!portals[0].is_resolved());
    }

    #[test]
    fn test_synthesize_convex_is_empty() {
        let square = Mesh::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        assert!(square
            .synthesize_portals(&DecomposeParams::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_edge_hit_on_vertex_reuses_it() {
        // (2, 0) is an outline vertex lying on the cone's left ray.
        let mesh: Mesh<f64> = Mesh::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ])
        .unwrap();
        let portals = mesh.synthesize_portals(&DecomposeParams::default()).unwrap();
        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].start_index, 4);
        assert_eq!(portals[0].end_index, Some(1));
        assert_eq!(portals[0].end_point, v(2.0, 0.0));
    }

    #[test]
    fn test_vertex_wins_tie_and_shared_diagonal_is_discarded() {
        // Two reflex corners facing each other: (2, 2) reaches (1, 1), and
        // the portal from (1, 1) back along the same diagonal has zero length.
        let mesh: Mesh<f64> = Mesh::from_coords(&[
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (-3.0, 4.0),
            (-3.0, 1.0),
            (1.0, 1.0),
            (1.0, -3.0),
            (4.0, -3.0),
        ])
        .unwrap();
        assert_eq!(mesh.find_spikes(0.0).len(), 2);

        let portals = mesh.synthesize_portals(&DecomposeParams::default()).unwrap();
        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].start_index, 1);
        assert_eq!(portals[0].end_index, Some(5));
        assert_eq!(portals[0].end_point, v(1.0, 1.0));
        assert_eq!(portals[0].parent, None);
    }

    #[test]
    fn test_portal_interior_hit_splits_in_two() {
        // Neither end of (3, 0) -> (0, 3) is inside the cone.
        let mesh = l_shape_with(v(3.0, 0.0));
        let existing = [Portal::new(6, v(0.0, 3.0))];
        let portals = resolve(&mesh, &existing);

        assert_eq!(portals.len(), 2);
        assert_eq!(portals[0].end_index, Some(6));
        assert_eq!(portals[0].end_point, v(3.0, 0.0));
        assert_eq!(portals[0].parent, Some(PortalId(0)));
        assert_eq!(portals[1].start_index, 3);
        assert_eq!(portals[1].end_index, None);
        assert_eq!(portals[1].end_point, v(0.0, 3.0));
        assert_eq!(portals[1].parent, Some(PortalId(0)));
    }

    #[test]
    fn test_portal_interior_hit_only_start_inside() {
        let mesh = l_shape();
        let existing = [Portal::new(0, v(3.0, 1.0))];
        let portals = resolve(&mesh, &existing);

        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].end_index, Some(0));
        assert_eq!(portals[0].end_point, v(0.0, 0.0));
        assert_eq!(portals[0].parent, Some(PortalId(0)));
    }

    #[test]
    fn test_portal_interior_hit_both_inside_prefers_start() {
        // Both ends are equally far from the tip.
        let mesh = l_shape_with(v(0.0, 1.5));
        let mut other = Portal::new(6, v(1.5, 0.0));
        other.end_index = Some(1);
        let portals = resolve(&mesh, &[other]);

        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].end_index, Some(6));
        assert_eq!(portals[0].end_point, v(0.0, 1.5));
    }

    #[test]
    fn test_portal_end_hit_reuses_unresolved_end() {
        // The nearest point of (0, 0) -> (1, 1) is its end.
        let mesh = l_shape();
        let existing = [Portal::new(0, v(1.0, 1.0))];
        let portals = resolve(&mesh, &existing);

        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].end_index, None);
        assert_eq!(portals[0].end_point, v(1.0, 1.0));
        assert_eq!(portals[0].parent, Some(PortalId(0)));
    }

    #[test]
    fn test_portal_start_hit_reuses_start() {
        let mesh = l_shape_with(v(1.0, 1.0));
        let existing = [Portal::new(6, v(0.0, 0.0))];
        let portals = resolve(&mesh, &existing);

        assert_eq!(portals.len(), 1);
        assert_eq!(portals[0].end_index, Some(6));
        assert_eq!(portals[0].end_point, v(1.0, 1.0));
        assert_eq!(portals[0].parent, Some(PortalId(0)));
    }

    #[test]
    fn test_farther_portal_loses_to_edge() {
        let mesh = l_shape();
        // Nearest point (0.5, 0.5) of this portal is farther than the edge hit.
        let existing = [Portal::new(0, v(0.5, 0.5))];
        let portals = resolve(&mesh, &existing);
        assert_eq!(portals, vec![Portal::new(3, v(2.0, 0.0))]);
    }
}
