use std::collections::HashMap;

use tracing::debug;

use crate::contour::ContourSet;
use crate::error::{GeometryError, Result};
use crate::field::ScalarField;
use crate::math::Point2;

use super::{ConstrainedTriangulation, TriangleMesh2};

/// Triangulates the region enclosed by a contour.
///
/// Every contour segment becomes a constraint. A triangle is kept when the
/// field is negative at its centroid.
pub struct FillContour<'a, F: ScalarField + ?Sized> {
    contour: &'a ContourSet,
    field: &'a F,
    bounds: Option<(Point2, Point2)>,
}

impl<'a, F: ScalarField + ?Sized> FillContour<'a, F> {
    /// Creates a new `FillContour` operation.
    #[must_use]
    pub fn new(contour: &'a ContourSet, field: &'a F) -> Self {
        Self {
            contour,
            field,
            bounds: None,
        }
    }

    /// Adds the corners of `min..max` as extra sites, so regions touching
    /// the sampling domain are covered up to its edge.
    #[must_use]
    pub fn with_bounds(mut self, min: Point2, max: Point2) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Executes the fill, returning the interior triangles with compacted
    /// vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the bounds enclose no area, or
    /// an error if a contour vertex cannot be triangulated.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh2> {
        let mut ct = ConstrainedTriangulation::new();
        if let Some((min, max)) = self.bounds {
            if !(min.x < max.x && min.y < max.y) {
                return Err(GeometryError::Degenerate("fill bounds enclose no area".into()).into());
            }
            for corner in [
                min,
                Point2::new(max.x, min.y),
                max,
                Point2::new(min.x, max.y),
            ] {
                ct.insert_point(&corner)?;
            }
        }
        let mut skipped = 0usize;
        for seg in self.contour.segments() {
            if !ct.insert_constraint(&seg.a, &seg.b)? {
                skipped += 1;
            }
        }

        let points = ct.points();
        let mut mesh = TriangleMesh2::default();
        let mut vertex_map: HashMap<u32, u32> = HashMap::new();

        for tri in ct.triangles() {
            let [a, b, c] = tri.map(|i| points[i as usize]);
            let centroid = Point2::from((a.coords + b.coords + c.coords) / 3.0);
            if self.field.evaluate(&centroid) >= 0.0 {
                continue;
            }
            let mut tri_indices = [0u32; 3];
            for (slot, &idx) in tri_indices.iter_mut().zip(tri.iter()) {
                *slot = *vertex_map.entry(idx).or_insert_with(|| {
                    mesh.vertices.push(points[idx as usize]);
                    (mesh.vertices.len() - 1) as u32
                });
            }
            mesh.indices.push(tri_indices);
        }

        debug!(
            constraints = ct.constraint_count(),
            skipped,
            triangles = mesh.triangle_count(),
            vertices = mesh.vertices.len(),
            "contour fill complete"
        );
        Ok(mesh)
    }
}
