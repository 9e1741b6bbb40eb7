use tracing::debug;

use crate::arrangement::{Arrangement, VertexId};
use crate::error::Result;
use crate::math::{ensure_finite, Point2};

use super::{insert_vertex, InsertMode, InsertSegment};

/// Inserts a closed polygon into an arrangement.
///
/// Equivalent to inserting each side in order, with the last point joined
/// back to the first. Self-intersecting outlines are fine: every crossing
/// becomes a vertex.
pub struct InsertPolygon {
    points: Vec<Point2>,
    mode: InsertMode,
}

impl InsertPolygon {
    /// Creates a new `InsertPolygon` operation that splits at intersections.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points,
            mode: InsertMode::Incremental,
        }
    }

    /// Sets the insertion mode.
    #[must_use]
    pub fn with_mode(mut self, mode: InsertMode) -> Self {
        self.mode = mode;
        self
    }

    /// Executes the operation, returning the boundary vertices in order
    /// (including vertices created at crossings).
    ///
    /// Repeated consecutive points are collapsed first. One distinct point
    /// inserts a point; two insert a single segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates.
    pub fn execute(&self, arrangement: &mut Arrangement) -> Result<Vec<VertexId>> {
        for p in &self.points {
            ensure_finite(p)?;
        }

        let tol = arrangement.tolerance();
        let mut ring: Vec<Point2> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if ring.last().is_none_or(|last| (p - last).norm() > tol) {
                ring.push(p);
            }
        }
        while ring.len() > 1 && (ring[ring.len() - 1] - ring[0]).norm() <= tol {
            ring.pop();
        }

        let boundary = match ring.len() {
            0 => Vec::new(),
            1 => vec![insert_vertex(arrangement, ring[0])?],
            2 => InsertSegment::new(ring[0], ring[1])
                .with_mode(self.mode)
                .execute(arrangement)?,
            n => {
                let mut boundary = Vec::new();
                for i in 0..n {
                    let chain = InsertSegment::new(ring[i], ring[(i + 1) % n])
                        .with_mode(self.mode)
                        .execute(arrangement)?;
                    boundary.extend(chain.iter().take(chain.len().saturating_sub(1)));
                }
                boundary
            }
        };

        debug!(
            corners = ring.len(),
            boundary = boundary.len(),
            faces = arrangement.face_count(),
            "insert polygon"
        );
        Ok(boundary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::box_polygon;
    use crate::operations::query::IsValid;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        box_polygon(p(x0, y0), p(x1, y1))
    }

    #[test]
    fn box_has_four_vertices_four_edges_two_faces() {
        let mut arr = Arrangement::new();
        InsertPolygon::new(rect(-5.0, -5.0, 5.0, 5.0))
            .with_mode(InsertMode::NonIntersecting)
            .execute(&mut arr)
            .unwrap();
        assert_eq!(arr.vertex_count(), 4);
        assert_eq!(arr.edge_count(), 4);
        assert_eq!(arr.face_count(), 2);
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn clockwise_input_gives_same_faces() {
        let mut arr = Arrangement::new();
        let mut pts = rect(0.0, 0.0, 2.0, 1.0);
        pts.reverse();
        InsertPolygon::new(pts).execute(&mut arr).unwrap();
        assert_eq!(arr.face_count(), 2);
        let (inner, _) = arr.faces().find(|(_, f)| !f.unbounded).unwrap();
        let area = arr.outer_area(inner).unwrap().unwrap();
        assert!((area - 2.0).abs() < 1e-12, "area={area}");
    }

    #[test]
    fn closing_duplicate_point_is_ignored() {
        let mut arr = Arrangement::new();
        let mut pts = rect(0.0, 0.0, 1.0, 1.0);
        pts.push(pts[0]);
        let boundary = InsertPolygon::new(pts).execute(&mut arr).unwrap();
        assert_eq!(boundary.len(), 4);
        assert_eq!(arr.edge_count(), 4);
    }

    #[test]
    fn bowtie_gets_a_crossing_vertex() {
        let mut arr = Arrangement::new();
        let pts = vec![p(0.0, 0.0), p(2.0, 2.0), p(2.0, 0.0), p(0.0, 2.0)];
        InsertPolygon::new(pts).execute(&mut arr).unwrap();
        assert_eq!(arr.vertex_count(), 5);
        assert_eq!(arr.edge_count(), 6);
        assert_eq!(arr.face_count(), 3);
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn overlapping_boxes_subdivide() {
        let mut arr = Arrangement::new();
        InsertPolygon::new(rect(0.0, 0.0, 2.0, 2.0))
            .execute(&mut arr)
            .unwrap();
        InsertPolygon::new(rect(1.0, 1.0, 3.0, 3.0))
            .execute(&mut arr)
            .unwrap();
        // 8 corners + 2 crossings; 4 + 4 sides, each crossed side split once.
        assert_eq!(arr.vertex_count(), 10);
        assert_eq!(arr.edge_count(), 12);
        assert_eq!(arr.face_count(), 4);
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn nested_box_is_a_hole_then_inner_face() {
        let mut arr = Arrangement::new();
        InsertPolygon::new(rect(-5.0, -5.0, 5.0, 5.0))
            .execute(&mut arr)
            .unwrap();
        InsertPolygon::new(rect(-1.0, -1.0, 1.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(arr.face_count(), 3);

        // The ring face between the boxes has one hole.
        let ring = arr
            .faces()
            .find(|(id, f)| {
                !f.unbounded && (arr.outer_area(*id).unwrap().unwrap() - 100.0).abs() < 1e-9
            })
            .map(|(id, _)| id)
            .unwrap();
        assert_eq!(arr.face(ring).unwrap().holes.len(), 1);
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn outer_box_drawn_last_captures_inner_box() {
        let mut arr = Arrangement::new();
        InsertPolygon::new(rect(-1.0, -1.0, 1.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        InsertPolygon::new(rect(-5.0, -5.0, 5.0, 5.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(arr.face_count(), 3);
        let unbounded = arr.face(arr.unbounded_face()).unwrap();
        assert_eq!(unbounded.holes.len(), 1);
        assert!(IsValid::new().check(&arr).is_ok());
    }
}
