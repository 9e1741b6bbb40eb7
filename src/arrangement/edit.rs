//! Low-level topology surgery.
//!
//! These edits keep every half-edge invariant intact but make no geometric
//! decisions of their own: callers guarantee that a new edge crosses nothing
//! and that an isolated vertex is placed in the face that contains it.

use std::collections::HashSet;
use std::f64::consts::TAU;

use tracing::trace;

use crate::error::{Result, TopologyError};
use crate::math::polygon_2d::{point_in_polygon, signed_area_2d};
use crate::math::{Point2, Vector2};

use super::{Arrangement, FaceData, FaceId, HalfEdgeData, HalfEdgeId, VertexData, VertexId};

impl Arrangement {
    /// Creates a vertex with no edges inside `face`.
    pub(crate) fn add_isolated_vertex(&mut self, point: Point2, face: FaceId) -> Result<VertexId> {
        let v = self.vertices.insert(VertexData::new(point));
        self.face_mut(face)?.isolated.push(v);
        trace!(?v, x = point.x, y = point.y, "isolated vertex");
        Ok(v)
    }

    /// Splits the edge of `e` at `point`, returning the new middle vertex.
    ///
    /// `e` keeps its source and now ends at the new vertex; its twin keeps
    /// its source and also ends there. Two new half-edges cover the
    /// remaining halves.
    pub(crate) fn split_edge(&mut self, e: HalfEdgeId, point: Point2) -> Result<VertexId> {
        let et = self.half_edge(e)?.twin;
        let e_data = self.half_edge(e)?.clone();
        let et_data = self.half_edge(et)?.clone();

        let m = self.vertices.insert(VertexData::new(point));

        // e2: m -> old target of e, on e's face.
        let e2 = self.half_edges.insert(HalfEdgeData {
            source: m,
            twin: et,
            next: e_data.next,
            prev: e,
            face: e_data.face,
        });
        // et2: m -> source of e, on the twin's face.
        let et2 = self.half_edges.insert(HalfEdgeData {
            source: m,
            twin: e,
            next: et_data.next,
            prev: et,
            face: et_data.face,
        });

        // At a dead end `e.next == et`, which makes `et.prev = e2` as required.
        self.half_edge_mut(e_data.next)?.prev = e2;
        self.half_edge_mut(et_data.next)?.prev = et2;

        let e_mut = self.half_edge_mut(e)?;
        e_mut.next = e2;
        e_mut.twin = et2;
        let et_mut = self.half_edge_mut(et)?;
        et_mut.next = et2;
        et_mut.twin = e2;

        self.vertex_mut(m)?.incident = Some(e2);
        trace!(?e, ?m, "split edge");
        Ok(m)
    }

    /// Joins `u` and `v` with a new edge, returning the half-edge `u → v`.
    ///
    /// The segment `u`–`v` must not cross any existing edge or pass through
    /// another vertex. Faces are updated: joining two boundary cycles merges
    /// them, joining a cycle to itself splits its face in two.
    ///
    /// Fails with `TopologyError::InvalidTopology` before anything is
    /// allocated if the endpoints do not share a face.
    pub(crate) fn connect(&mut self, u: VertexId, v: VertexId) -> Result<HalfEdgeId> {
        if u == v {
            return Err(TopologyError::InvalidTopology("edge would be a self-loop".into()).into());
        }
        let pu = self.vertex(u)?.point;
        let pv = self.vertex(v)?.point;

        let pred_u = match self.vertex(u)?.incident {
            Some(_) => Some(self.wedge_predecessor(u, &(pv - pu))?),
            None => None,
        };
        let pred_v = match self.vertex(v)?.incident {
            Some(_) => Some(self.wedge_predecessor(v, &(pu - pv))?),
            None => None,
        };

        let face = match (pred_u, pred_v) {
            (Some(p), _) | (None, Some(p)) => self.half_edge(p)?.face,
            (None, None) => self
                .isolated_face_of(u)
                .or_else(|| self.isolated_face_of(v))
                .unwrap_or(self.unbounded),
        };
        if let (Some(_), Some(b)) = (pred_u, pred_v) {
            if self.half_edge(b)?.face != face {
                return Err(TopologyError::InvalidTopology(
                    "edge endpoints lie on different faces".into(),
                )
                .into());
            }
        }

        let same_cycle = match (pred_u, pred_v) {
            (Some(a), Some(b)) => self.cycle(a)?.contains(&b),
            _ => false,
        };

        let h = self.half_edges.insert(HalfEdgeData {
            source: u,
            twin: HalfEdgeId::default(),
            next: HalfEdgeId::default(),
            prev: HalfEdgeId::default(),
            face,
        });
        let t = self.half_edges.insert(HalfEdgeData {
            source: v,
            twin: h,
            next: HalfEdgeId::default(),
            prev: HalfEdgeId::default(),
            face,
        });
        self.half_edge_mut(h)?.twin = t;

        match (pred_u, pred_v) {
            (None, None) => {
                self.link(h, t)?;
                self.link(t, h)?;
                self.face_mut(face)?.holes.push(h);
            }
            (Some(a), None) => {
                let na = self.half_edge(a)?.next;
                self.link(a, h)?;
                self.link(h, t)?;
                self.link(t, na)?;
            }
            (None, Some(b)) => {
                let nb = self.half_edge(b)?.next;
                self.link(b, t)?;
                self.link(t, h)?;
                self.link(h, nb)?;
            }
            (Some(a), Some(b)) => {
                let na = self.half_edge(a)?.next;
                let nb = self.half_edge(b)?.next;
                self.link(a, h)?;
                self.link(h, nb)?;
                self.link(b, t)?;
                self.link(t, na)?;
            }
        }

        for (vertex, out) in [(u, h), (v, t)] {
            if self.vertex(vertex)?.incident.is_some() {
                continue;
            }
            if let Some(home) = self.isolated_face_of(vertex) {
                self.face_mut(home)?.isolated.retain(|&iso| iso != vertex);
            }
            self.vertex_mut(vertex)?.incident = Some(out);
        }

        match (pred_u, pred_v) {
            (Some(_), Some(_)) if same_cycle => self.split_face(face, h, t)?,
            (Some(_), Some(_)) => self.merge_hole_records(face, h)?,
            _ => {}
        }

        trace!(?h, ?u, ?v, "connected");
        Ok(h)
    }

    /// Sets `a.next = b` and `b.prev = a`.
    fn link(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> Result<()> {
        self.half_edge_mut(a)?.next = b;
        self.half_edge_mut(b)?.prev = a;
        Ok(())
    }

    /// Returns the incoming half-edge at `v` after which a new edge leaving
    /// `v` in direction `dir` must be linked.
    ///
    /// The new edge is placed directly clockwise of the first existing
    /// outgoing edge found turning counter-clockwise from `dir`. Equal
    /// angles resolve to the earliest-created half-edge.
    fn wedge_predecessor(&self, v: VertexId, dir: &Vector2) -> Result<HalfEdgeId> {
        let base = dir.y.atan2(dir.x);
        let mut best: Option<(f64, HalfEdgeId)> = None;
        for out in self.outgoing(v)? {
            let d = self.segment(out)?.b - self.vertex(v)?.point;
            let mut delta = (d.y.atan2(d.x) - base).rem_euclid(TAU);
            if delta <= 0.0 {
                delta = TAU;
            }
            let better = match best {
                None => true,
                Some((best_delta, best_id)) => {
                    delta < best_delta || (delta <= best_delta && out < best_id)
                }
            };
            if better {
                best = Some((delta, out));
            }
        }
        let (_, ccw_neighbor) = best.ok_or_else(|| {
            TopologyError::InvalidTopology("vertex has no outgoing half-edges".into())
        })?;
        Ok(self.half_edge(ccw_neighbor)?.twin)
    }

    /// Drops redundant hole records after `h` joined two cycles of `face`.
    fn merge_hole_records(&mut self, face: FaceId, h: HalfEdgeId) -> Result<()> {
        let merged: HashSet<HalfEdgeId> = self.cycle(h)?.into_iter().collect();
        let f = self.face_mut(face)?;
        let on_outer = f.outer.is_some_and(|o| merged.contains(&o));
        f.holes.retain(|hole| !merged.contains(hole));
        if !on_outer {
            f.holes.push(h);
        }
        trace!(?face, "merged boundary cycles");
        Ok(())
    }

    /// Splits `face` after the new twin pair `h`/`t` closed one of its cycles.
    ///
    /// If the closed cycle was the face's outer boundary, `t`'s side becomes
    /// the new face. Otherwise the cycle was a hole boundary: the
    /// counter-clockwise side becomes a new bounded face and the other side
    /// stays a hole of `face`. Holes and isolated vertices are then handed
    /// to whichever face contains them.
    fn split_face(&mut self, face: FaceId, h: HalfEdgeId, t: HalfEdgeId) -> Result<()> {
        let cycle_h = self.cycle(h)?;
        let cycle_t = self.cycle(t)?;
        let outer = self.face(face)?.outer;
        let was_outer = outer.is_some_and(|o| cycle_h.contains(&o) || cycle_t.contains(&o));

        let (new_cycle, keep) = if was_outer {
            (cycle_t, h)
        } else {
            let area_h = signed_area_2d(&self.cycle_points(h)?);
            let area_t = signed_area_2d(&self.cycle_points(t)?);
            if area_h > area_t {
                (cycle_h, t)
            } else {
                (cycle_t, h)
            }
        };

        let new_face = self.faces.insert(FaceData::bounded(new_cycle[0]));
        for &he in &new_cycle {
            self.half_edge_mut(he)?.face = new_face;
        }

        let new_set: HashSet<HalfEdgeId> = new_cycle.iter().copied().collect();
        {
            let keep_cycle: HashSet<HalfEdgeId> = self.cycle(keep)?.into_iter().collect();
            let f = self.face_mut(face)?;
            if was_outer {
                f.outer = Some(keep);
            } else {
                f.holes
                    .retain(|hole| !new_set.contains(hole) && !keep_cycle.contains(hole));
                f.holes.push(keep);
            }
        }

        let boundary = self.cycle_points(new_cycle[0])?;
        let holes = self.face(face)?.holes.clone();
        let mut moved_holes = Vec::new();
        for hole in holes {
            if hole == keep {
                continue;
            }
            let probe = self.vertex(self.half_edge(hole)?.source)?.point;
            if point_in_polygon(&probe, &boundary) {
                moved_holes.push(hole);
            }
        }
        let isolated = self.face(face)?.isolated.clone();
        let mut moved_isolated = Vec::new();
        for v in isolated {
            if point_in_polygon(&self.vertex(v)?.point, &boundary) {
                moved_isolated.push(v);
            }
        }

        for &hole in &moved_holes {
            for he in self.cycle(hole)? {
                self.half_edge_mut(he)?.face = new_face;
            }
        }
        {
            let f = self.face_mut(face)?;
            f.holes.retain(|hole| !moved_holes.contains(hole));
            f.isolated.retain(|v| !moved_isolated.contains(v));
        }
        {
            let g = self.face_mut(new_face)?;
            g.holes = moved_holes;
            g.isolated = moved_isolated;
        }

        trace!(?face, ?new_face, "split face");
        Ok(())
    }
}
