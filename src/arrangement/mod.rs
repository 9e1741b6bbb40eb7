//! Half-edge (DCEL) representation of a planar subdivision.
//!
//! All entities live in arenas owned by [`Arrangement`] and reference each
//! other through typed ids, so the cyclic `twin`/`next`/`prev` links never
//! become ownership cycles. Entities are never removed; only insertion
//! operations (see [`crate::operations::insert`]) mutate the structure.

mod edit;
pub mod face;
pub mod half_edge;
pub mod vertex;

pub use face::{FaceData, FaceId};
pub use half_edge::{HalfEdgeData, HalfEdgeId};
pub use vertex::{VertexData, VertexId};

use slotmap::SlotMap;

use crate::error::{Result, TopologyError};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, Segment2};

/// Parameters controlling topological snapping.
#[derive(Debug, Clone, Copy)]
pub struct ArrangementParams {
    /// Points closer than this are merged into one vertex, and points closer
    /// than this to an edge split that edge.
    pub tolerance: f64,
}

impl Default for ArrangementParams {
    fn default() -> Self {
        Self { tolerance: 1e-8 }
    }
}

/// A planar subdivision induced by inserted points and segments.
#[derive(Debug)]
pub struct Arrangement {
    params: ArrangementParams,
    vertices: SlotMap<VertexId, VertexData>,
    half_edges: SlotMap<HalfEdgeId, HalfEdgeData>,
    faces: SlotMap<FaceId, FaceData>,
    unbounded: FaceId,
}

impl Default for Arrangement {
    fn default() -> Self {
        Self::new()
    }
}

impl Arrangement {
    /// Creates an empty arrangement consisting of the unbounded face only.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(ArrangementParams::default())
    }

    /// Creates an empty arrangement with custom snapping parameters.
    #[must_use]
    pub fn with_params(params: ArrangementParams) -> Self {
        let mut faces = SlotMap::with_key();
        let unbounded = faces.insert(FaceData::unbounded());
        Self {
            params,
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            faces,
            unbounded,
        }
    }

    /// Discards all content, returning to the freshly created state.
    pub fn clear(&mut self) {
        *self = Self::with_params(self.params);
    }

    /// Returns the snapping parameters.
    #[must_use]
    pub fn params(&self) -> &ArrangementParams {
        &self.params
    }

    /// Returns the snapping tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.params.tolerance
    }

    // --- Counts ---

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges (twin pairs of half-edges).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Number of half-edges.
    #[must_use]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of faces, including the unbounded face.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if no vertex has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // --- Entity access ---

    /// Returns the unbounded face.
    #[must_use]
    pub fn unbounded_face(&self) -> FaceId {
        self.unbounded
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the arrangement.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()).into())
    }

    /// Returns a reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the arrangement.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdgeData> {
        self.half_edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()).into())
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the arrangement.
    pub fn face(&self, id: FaceId) -> Result<&FaceData> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()).into())
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()).into())
    }

    fn half_edge_mut(&mut self, id: HalfEdgeId) -> Result<&mut HalfEdgeData> {
        self.half_edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()).into())
    }

    fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()).into())
    }

    // --- Iteration ---

    /// Iterates over all vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Iterates over all half-edges in creation order.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdgeData)> {
        self.half_edges.iter()
    }

    /// Iterates over all faces in creation order. The unbounded face comes first.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    /// Iterates over one half-edge per edge (the first created of each pair).
    pub fn edges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.half_edges
            .iter()
            .filter(|(id, he)| *id < he.twin)
            .map(|(id, _)| id)
    }

    /// Returns all vertex positions in creation order.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.vertices.values().map(|v| v.point).collect()
    }

    // --- Derived navigation ---

    /// Returns the vertex a half-edge points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge or its twin is missing.
    pub fn target(&self, id: HalfEdgeId) -> Result<VertexId> {
        let twin = self.half_edge(id)?.twin;
        Ok(self.half_edge(twin)?.source)
    }

    /// Returns the geometric segment of a half-edge, from source to target.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge or its endpoints are missing.
    pub fn segment(&self, id: HalfEdgeId) -> Result<Segment2> {
        let source = self.half_edge(id)?.source;
        let target = self.target(id)?;
        Ok(Segment2::new(
            self.vertex(source)?.point,
            self.vertex(target)?.point,
        ))
    }

    /// Collects the boundary cycle that starts at `start`, following `next`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` if the cycle does not close
    /// within the number of existing half-edges.
    pub fn cycle(&self, start: HalfEdgeId) -> Result<Vec<HalfEdgeId>> {
        let limit = self.half_edges.len();
        let mut cycle = Vec::new();
        let mut current = start;
        loop {
            cycle.push(current);
            current = self.half_edge(current)?.next;
            if current == start {
                return Ok(cycle);
            }
            if cycle.len() > limit {
                return Err(
                    TopologyError::InvalidTopology("boundary cycle does not close".into()).into(),
                );
            }
        }
    }

    /// Returns the source points of the boundary cycle starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cycle is broken.
    pub fn cycle_points(&self, start: HalfEdgeId) -> Result<Vec<Point2>> {
        self.cycle(start)?
            .into_iter()
            .map(|he| Ok(self.vertex(self.half_edge(he)?.source)?.point))
            .collect()
    }

    /// Returns the half-edges leaving `v`, walking clockwise from its
    /// incident half-edge. Empty for isolated vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is missing or its fan is broken.
    pub fn outgoing(&self, v: VertexId) -> Result<Vec<HalfEdgeId>> {
        let Some(start) = self.vertex(v)?.incident else {
            return Ok(Vec::new());
        };
        let limit = self.half_edges.len();
        let mut fan = Vec::new();
        let mut current = start;
        loop {
            fan.push(current);
            current = self.half_edge(self.half_edge(current)?.twin)?.next;
            if current == start {
                return Ok(fan);
            }
            if fan.len() > limit {
                return Err(
                    TopologyError::InvalidTopology("vertex fan does not close".into()).into(),
                );
            }
        }
    }

    /// Returns the outer and hole boundary cycles of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or a cycle is broken.
    pub fn face_boundary(&self, id: FaceId) -> Result<Vec<Vec<HalfEdgeId>>> {
        let face = self.face(id)?;
        face.outer
            .iter()
            .chain(face.holes.iter())
            .map(|&start| self.cycle(start))
            .collect()
    }

    /// Returns the area enclosed by a face's outer boundary, or `None` for
    /// the unbounded face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or its boundary is broken.
    pub fn outer_area(&self, id: FaceId) -> Result<Option<f64>> {
        match self.face(id)?.outer {
            Some(outer) => Ok(Some(signed_area_2d(&self.cycle_points(outer)?))),
            None => Ok(None),
        }
    }

    /// Returns `true` if an edge already joins `u` and `v`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is missing.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> Result<bool> {
        for he in self.outgoing(u)? {
            if self.target(he)? == v {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Finds the face whose isolated-vertex list holds `v`.
    fn isolated_face_of(&self, v: VertexId) -> Option<FaceId> {
        self.faces
            .iter()
            .find(|(_, f)| f.isolated.contains(&v))
            .map(|(id, _)| id)
    }
}
