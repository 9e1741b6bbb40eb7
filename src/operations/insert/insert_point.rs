use tracing::debug;

use crate::arrangement::{Arrangement, VertexId};
use crate::error::Result;
use crate::math::{ensure_finite, Point2};
use crate::operations::query::{containing_face, nearest_edge, nearest_vertex};

/// Inserts a single point into an arrangement.
///
/// A point within tolerance of an existing vertex reuses that vertex. A
/// point within tolerance of an edge splits the edge. Anything else becomes
/// an isolated vertex of the face containing it.
pub struct InsertPoint {
    point: Point2,
}

impl InsertPoint {
    /// Creates a new `InsertPoint` operation.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the operation, returning the vertex at the point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates.
    pub fn execute(&self, arrangement: &mut Arrangement) -> Result<VertexId> {
        ensure_finite(&self.point)?;
        let before = arrangement.vertex_count();
        let v = insert_vertex(arrangement, self.point)?;
        debug!(
            x = self.point.x,
            y = self.point.y,
            created = arrangement.vertex_count() > before,
            "insert point"
        );
        Ok(v)
    }
}

/// Snaps `p` to the arrangement, creating a vertex only when needed.
pub(crate) fn insert_vertex(arrangement: &mut Arrangement, p: Point2) -> Result<VertexId> {
    let tol = arrangement.tolerance();

    if let Some((v, dist)) = nearest_vertex(arrangement, &p)? {
        if dist <= tol {
            return Ok(v);
        }
    }

    if let Some((e, dist)) = nearest_edge(arrangement, &p)? {
        if dist <= tol {
            return arrangement.split_edge(e, p);
        }
    }

    let face = containing_face(arrangement, &p)?;
    arrangement.add_isolated_vertex(p, face)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::insert::InsertPolygon;
    use crate::operations::insert::InsertSegment;
    use crate::operations::query::IsValid;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn isolated_point_in_unbounded_face() {
        let mut arr = Arrangement::new();
        let v = InsertPoint::new(p(1.0, 2.0)).execute(&mut arr).unwrap();
        assert_eq!(arr.vertex_count(), 1);
        assert!(arr.vertex(v).unwrap().is_isolated());
        assert_eq!(arr.face(arr.unbounded_face()).unwrap().isolated, vec![v]);
    }

    #[test]
    fn duplicate_point_is_deduplicated() {
        let mut arr = Arrangement::new();
        let a = InsertPoint::new(p(1.0, 2.0)).execute(&mut arr).unwrap();
        let b = InsertPoint::new(p(1.0, 2.0 + 1e-12)).execute(&mut arr).unwrap();
        assert_eq!(a, b);
        assert_eq!(arr.vertex_count(), 1);
    }

    #[test]
    fn point_on_edge_splits_it() {
        let mut arr = Arrangement::new();
        InsertSegment::new(p(0.0, 0.0), p(4.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        InsertPoint::new(p(1.0, 0.0)).execute(&mut arr).unwrap();
        assert_eq!(arr.vertex_count(), 3);
        assert_eq!(arr.edge_count(), 2);
        assert_eq!(arr.face_count(), 1);
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn point_inside_box_lands_in_inner_face() {
        let mut arr = Arrangement::new();
        let corners = vec![p(-5.0, -5.0), p(5.0, -5.0), p(5.0, 5.0), p(-5.0, 5.0)];
        InsertPolygon::new(corners).execute(&mut arr).unwrap();
        let v = InsertPoint::new(p(0.0, 0.0)).execute(&mut arr).unwrap();

        let (inner, data) = arr.faces().find(|(_, f)| !f.unbounded).unwrap();
        assert_eq!(data.isolated, vec![v]);
        assert_ne!(inner, arr.unbounded_face());
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn nan_point_rejected() {
        let mut arr = Arrangement::new();
        assert!(InsertPoint::new(p(f64::NAN, 0.0)).execute(&mut arr).is_err());
        assert_eq!(arr.vertex_count(), 0);
    }
}
