//! Endpoint materialization and the splitting worklist.

use std::collections::VecDeque;

use super::{DecomposeParams, Mesh, Portal};
use crate::error::{DecomposeError, DecomposeResult};
use crate::polygon::{check_convex, plus_wrap, split_index_buffer};
use crate::predicates::where_segment_crosses_ray;
use crate::primitives::Vec2;
use log::{debug, trace};
use num_traits::Float;

/// Observer of the geometry produced while decomposing, for debug
/// rendering.
///
/// Output only: nothing it does can influence the decomposition. Both
/// methods default to no-ops, and `()` implements the trait with them.
pub trait DecomposeTrace<F> {
    /// Called once per synthesized portal with its start and target points.
    fn portal(&mut self, _start: Vec2<F>, _end: Vec2<F>) {}

    /// Called once per synthesized portal with its target point, before the
    /// target is materialized.
    fn endpoint(&mut self, _point: Vec2<F>) {}
}

impl<F> DecomposeTrace<F> for () {}

/// Nearest outline crossing of a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<F> {
    pub point: Vec2<F>,
    /// The crossed edge as `(from, to)` vertex indices in outline order.
    pub edge: (usize, usize),
    pub distance: F,
}

type Split = (Vec<usize>, Vec<usize>, (usize, usize));

impl<F: Float> Mesh<F> {
    /// Casts a ray from `from` through `through` and returns the nearest
    /// outline edge it crosses.
    ///
    /// Edges with an endpoint at `from` are ignored, so a ray cast from an
    /// outline vertex does not hit its own edges. The first edge wins ties.
    pub fn trace_ray(&self, from: Vec2<F>, through: Vec2<F>) -> DecomposeResult<Option<RayHit<F>>> {
        let n = self.indices.len();
        let mut best: Option<RayHit<F>> = None;

        for pos in 0..n {
            let edge = (self.indices[pos], self.indices[plus_wrap(pos, n)]);
            let a = self.vertices[edge.0];
            let b = self.vertices[edge.1];
            if a == from || b == from {
                continue;
            }

            if let Some(point) = where_segment_crosses_ray(a, b, from, through)? {
                let distance = from.distance(point);
                if best.map_or(true, |hit| distance < hit.distance) {
                    best = Some(RayHit {
                        point,
                        edge,
                        distance,
                    });
                }
            }
        }

        Ok(best)
    }

    /// Appends `vertex` to the vertex buffer and inserts it into the outline
    /// between the two indices of `edge`. Returns the new vertex index.
    ///
    /// `edge` must join two consecutive outline positions, in either order;
    /// the pair formed by the last and first positions counts as
    /// consecutive.
    pub fn add_vertex_to_outline(&mut self, vertex: Vec2<F>, edge: (usize, usize)) -> DecomposeResult<usize> {
        let invalid = || DecomposeError::InvalidEdge {
            a: edge.0,
            b: edge.1,
        };
        let position = |index: usize| self.indices.iter().position(|&i| i == index);

        let pos_a = position(edge.0).ok_or_else(invalid)?;
        let pos_b = position(edge.1).ok_or_else(invalid)?;
        let (lo, hi) = (pos_a.min(pos_b), pos_a.max(pos_b));
        let n = self.indices.len();

        let insert_at = match hi - lo {
            1 => hi,
            gap if lo == 0 && gap + 1 == n => n,
            _ => return Err(invalid()),
        };

        let index = self.vertices.len();
        self.vertices.push(vertex);
        self.indices.insert(insert_at, index);
        Ok(index)
    }

    /// Decomposes the outline into convex pieces.
    ///
    /// Portals are synthesized for every spike, their targets are inserted
    /// into the outline where needed, and the outline is then split along
    /// them, breadth first, until no portal applies. A finished piece that
    /// still turns clockwise somewhere is decomposed again on its own. The
    /// results replace [`pieces`](Mesh::pieces) and
    /// [`portals`](Mesh::portals); the outline keeps the inserted vertices.
    ///
    /// Returns the portals synthesized for the outline with their final
    /// state. Diagonals added while re-decomposing a piece are only listed
    /// in [`portals`](Mesh::portals). On error the mesh is left as far as
    /// decomposition got.
    pub fn break_into_convex<T: DecomposeTrace<F>>(
        &mut self,
        params: &DecomposeParams<F>,
        tracer: &mut T,
    ) -> DecomposeResult<Vec<Portal<F>>> {
        self.pieces.clear();
        self.portals.clear();

        let portals = self.split_along_portals(params, tracer)?;
        self.refine_pieces(params, tracer)?;

        debug!(
            "decomposed {} outline vertices into {} pieces along {} of {} portals",
            self.indices.len(),
            self.pieces.len(),
            self.portals.len(),
            portals.len()
        );
        Ok(portals)
    }

    /// Decomposes with the given spike threshold and default parameters.
    pub fn decompose(&mut self, threshold_degrees: F) -> DecomposeResult<Vec<Portal<F>>> {
        let params = DecomposeParams::default().with_threshold(threshold_degrees);
        self.break_into_convex(&params, &mut ())
    }

    /// Synthesizes and materializes portals, then drains the splitting
    /// worklist into `pieces` and `portals`.
    fn split_along_portals<T: DecomposeTrace<F>>(
        &mut self,
        params: &DecomposeParams<F>,
        tracer: &mut T,
    ) -> DecomposeResult<Vec<Portal<F>>> {
        let mut portals = self.synthesize_portals(params)?;
        for portal in &portals {
            tracer.portal(self.vertices[portal.start_index], portal.end_point);
        }

        self.materialize_endpoints(&mut portals, tracer)?;

        let mut queue = VecDeque::from([self.indices.clone()]);
        while let Some(piece) = queue.pop_front() {
            match Self::break_in_two(&piece, &mut portals)? {
                Some((first, second, diagonal)) => {
                    trace!(
                        "split {} indices along {:?} into {} and {}",
                        piece.len(),
                        diagonal,
                        first.len(),
                        second.len()
                    );
                    queue.push_back(first);
                    queue.push_back(second);
                    self.portals.push(diagonal);
                }
                None => self.pieces.push(piece),
            }
        }

        Ok(portals)
    }

    /// Decomposes again every finished piece that fails the convexity check.
    ///
    /// A spike whose portal collapses onto an earlier diagonal keeps its
    /// reflex corner. Such a piece becomes a mesh of its own over a copy of
    /// the vertex buffer; its sub-pieces replace it and are checked in turn.
    /// A piece with no spike left at the threshold is kept as it is. Every
    /// pass resolves a reflex corner, so the outline length bounds the
    /// number of passes.
    fn refine_pieces<T: DecomposeTrace<F>>(
        &mut self,
        params: &DecomposeParams<F>,
        tracer: &mut T,
    ) -> DecomposeResult<()> {
        let mut budget = self.indices.len();
        let mut pending: VecDeque<Vec<usize>> = std::mem::take(&mut self.pieces).into();

        while let Some(piece) = pending.pop_front() {
            if budget == 0 || check_convex(&self.vertices, &piece) {
                self.pieces.push(piece);
                continue;
            }
            budget -= 1;

            let mut sub = Mesh::new(self.vertices.clone(), piece.clone())?;
            sub.split_along_portals(params, tracer)?;
            if sub.portals.is_empty() {
                debug!("non-convex piece of {} indices has no spike to split", piece.len());
                self.pieces.push(piece);
                continue;
            }

            debug!(
                "re-decomposed non-convex piece of {} indices into {} pieces",
                piece.len(),
                sub.pieces.len()
            );
            let first_new = self.vertices.len();
            self.splice_outline(&sub.indices, first_new);
            self.vertices = sub.vertices;
            self.portals.extend(sub.portals);
            pending.extend(sub.pieces);
        }

        Ok(())
    }

    /// Copies into the outline the vertices `piece` gained on outline edges.
    ///
    /// Indices from `first_new` on are new. A run of them between two
    /// indices that are consecutive on the outline is inserted there.
    fn splice_outline(&mut self, piece: &[usize], first_new: usize) {
        let n = piece.len();
        let m = self.indices.len();
        let mut spliced = Vec::with_capacity(m);

        for pos in 0..m {
            let from = self.indices[pos];
            let to = self.indices[plus_wrap(pos, m)];
            spliced.push(from);

            let Some(start) = piece.iter().position(|&i| i == from) else {
                continue;
            };
            let run: Vec<usize> = (1..n)
                .map(|k| piece[(start + k) % n])
                .take_while(|&i| i >= first_new)
                .collect();
            if !run.is_empty() && piece[(start + run.len() + 1) % n] == to {
                spliced.extend(run);
            }
        }

        self.indices = spliced;
    }

    /// Gives every portal a concrete end vertex where possible.
    ///
    /// Portals without a parent get their target inserted on the outline
    /// edge their ray crosses first. Portals with a parent then inherit the
    /// parent's end index. A portal whose ray crosses nothing stays
    /// unresolved, and so do its children.
    pub(crate) fn materialize_endpoints<T: DecomposeTrace<F>>(
        &mut self,
        portals: &mut [Portal<F>],
        tracer: &mut T,
    ) -> DecomposeResult<()> {
        for portal in portals.iter_mut() {
            tracer.endpoint(portal.end_point);
            if portal.is_resolved() || portal.parent.is_some() {
                continue;
            }

            let start = self.vertices[portal.start_index];
            let Some(hit) = self.trace_ray(start, portal.end_point)? else {
                debug!(
                    "portal from {} crosses no outline edge, dropping it",
                    portal.start_index
                );
                continue;
            };

            let index = self.add_vertex_to_outline(portal.end_point, hit.edge)?;
            debug!("inserted vertex {} on edge {:?}", index, hit.edge);
            portal.end_index = Some(index);
        }

        for pos in 0..portals.len() {
            let Some(parent) = portals[pos].parent else {
                continue;
            };
            if portals[pos].end_index.is_none() {
                portals[pos].end_index = portals.get(parent.index()).and_then(|p| p.end_index);
            }
        }

        Ok(())
    }

    /// Splits `piece` along the first unused portal with both ends in it.
    ///
    /// A portal whose split leaves a side with fewer than three indices is
    /// an edge of the piece and is passed over.
    fn break_in_two(piece: &[usize], portals: &mut [Portal<F>]) -> DecomposeResult<Option<Split>> {
        for portal in portals.iter_mut() {
            if portal.created {
                continue;
            }
            let start = portal.start_index;
            let Some(end) = portal.end_index else {
                continue;
            };
            if start == end || !piece.contains(&start) || !piece.contains(&end) {
                continue;
            }

            let (first, second) = split_index_buffer(piece, start, end)?;
            if first.len() < 3 || second.len() < 3 {
                continue;
            }

            portal.created = true;
            return Ok(Some((first, second, (start, end))));
        }

        Ok(None)
    }
}
