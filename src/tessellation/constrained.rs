use spade::handles::FixedVertexHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::warn;

use crate::error::{Result, TessellationError};
use crate::math::{ensure_finite, Point2};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// An incrementally built constrained Delaunay triangulation.
///
/// Vertex indices are stable: the `n`-th distinct inserted point keeps
/// index `n`. Inserting a point equal to an existing one returns the
/// existing index.
#[derive(Default)]
pub struct ConstrainedTriangulation {
    cdt: Cdt,
}

impl std::fmt::Debug for ConstrainedTriangulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstrainedTriangulation")
            .field("vertices", &self.vertex_count())
            .field("triangles", &self.triangle_count())
            .field("constraints", &self.constraint_count())
            .finish()
    }
}

impl ConstrainedTriangulation {
    /// Creates an empty triangulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a point and returns its vertex index.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates and
    /// `TessellationError::Failed` if the triangulation rejects the point.
    pub fn insert_point(&mut self, p: &Point2) -> Result<usize> {
        Ok(self.insert_handle(p)?.index())
    }

    fn insert_handle(&mut self, p: &Point2) -> Result<FixedVertexHandle> {
        ensure_finite(p)?;
        self.cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| {
                TessellationError::Failed(format!("CDT insert: {e}")).into()
            })
    }

    /// Inserts both endpoints and the constraint edge between them.
    ///
    /// Coincident endpoints insert a single point. A constraint that would
    /// cross an existing constraint is skipped and `false` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint cannot be inserted.
    pub fn insert_constraint(&mut self, a: &Point2, b: &Point2) -> Result<bool> {
        let from = self.insert_handle(a)?;
        let to = self.insert_handle(b)?;
        if from == to {
            return Ok(true);
        }
        if !self.cdt.can_add_constraint(from, to) {
            warn!(?a, ?b, "skipping constraint that crosses an existing one");
            return Ok(false);
        }
        self.cdt.add_constraint(from, to);
        Ok(true)
    }

    /// Vertex positions, indexed by vertex index.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.cdt
            .vertices()
            .map(|v| {
                let p = v.position();
                Point2::new(p.x, p.y)
            })
            .collect()
    }

    /// Triangles as counter-clockwise vertex index triples.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.cdt
            .inner_faces()
            .map(|face| face.vertices().map(|v| v.fix().index() as u32))
            .collect()
    }

    /// Flat triangle index buffer, three entries per triangle.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.triangles().into_iter().flatten().collect()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.cdt.num_vertices()
    }

    /// Length of the flat index buffer.
    #[must_use]
    pub fn indice_count(&self) -> usize {
        self.triangle_count() * 3
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.cdt.num_inner_faces()
    }

    /// Number of constraint edges.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.cdt.num_constraints()
    }
}
