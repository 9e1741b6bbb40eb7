use tracing::debug;

use crate::arrangement::{Arrangement, VertexId};
use crate::error::Result;
use crate::math::distance_2d::project_onto_segment;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{ensure_finite, Point2, Segment2};

use super::{insert_vertex, InsertMode};

/// Inserts a line segment into an arrangement.
///
/// Every crossing with an existing edge and every existing vertex lying on
/// the segment becomes a vertex of the inserted chain, so the result is
/// always a valid planar subdivision. Sub-segments that already exist as
/// edges are left alone, which makes repeated insertion a no-op.
pub struct InsertSegment {
    a: Point2,
    b: Point2,
    mode: InsertMode,
}

impl InsertSegment {
    /// Creates a new `InsertSegment` operation that splits at intersections.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            a,
            b,
            mode: InsertMode::Incremental,
        }
    }

    /// Creates an `InsertSegment` operation for a segment known not to
    /// cross any existing edge.
    #[must_use]
    pub fn non_intersecting(a: Point2, b: Point2) -> Self {
        Self {
            a,
            b,
            mode: InsertMode::NonIntersecting,
        }
    }

    /// Sets the insertion mode.
    #[must_use]
    pub fn with_mode(mut self, mode: InsertMode) -> Self {
        self.mode = mode;
        self
    }

    /// Executes the operation, returning the vertices along the segment from
    /// `a` to `b`.
    ///
    /// A zero-length segment inserts a single point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN or infinite coordinates.
    pub fn execute(&self, arrangement: &mut Arrangement) -> Result<Vec<VertexId>> {
        ensure_finite(&self.a)?;
        ensure_finite(&self.b)?;

        let tol = arrangement.tolerance();
        let segment = Segment2::new(self.a, self.b);
        if segment.is_degenerate(tol) {
            return Ok(vec![insert_vertex(arrangement, self.a)?]);
        }

        let stops = self.collect_stops(arrangement, &segment)?;

        let (v0, e0, f0) = (
            arrangement.vertex_count(),
            arrangement.edge_count(),
            arrangement.face_count(),
        );

        let mut chain: Vec<VertexId> = Vec::with_capacity(stops.len());
        for (_, point) in stops {
            let v = insert_vertex(arrangement, point)?;
            if chain.last() != Some(&v) {
                chain.push(v);
            }
        }

        for pair in chain.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            if u != v && !arrangement.has_edge(u, v)? {
                arrangement.connect(u, v)?;
            }
        }

        debug!(
            vertices = arrangement.vertex_count() - v0,
            edges = arrangement.edge_count() - e0,
            faces = arrangement.face_count() - f0,
            "insert segment"
        );
        Ok(chain)
    }

    /// Returns the parameters and points where the segment must be cut,
    /// sorted from `a` to `b`.
    fn collect_stops(
        &self,
        arrangement: &Arrangement,
        segment: &Segment2,
    ) -> Result<Vec<(f64, Point2)>> {
        let tol = arrangement.tolerance();
        let mut stops = vec![(0.0, self.a), (1.0, self.b)];

        for (_, vertex) in arrangement.vertices() {
            if segment.distance(&vertex.point) <= tol {
                let t = project_onto_segment(&vertex.point, &self.a, &self.b);
                stops.push((t, vertex.point));
            }
        }

        if self.mode == InsertMode::Incremental {
            for e in arrangement.edges() {
                let edge = arrangement.segment(e)?;
                if let Some((point, t, _)) =
                    segment_segment_intersect_2d(&self.a, &self.b, &edge.a, &edge.b)
                {
                    stops.push((t, point));
                }
            }
        }

        stops.sort_by(|x, y| x.0.total_cmp(&y.0));
        Ok(stops)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{PlanisError, TopologyError};
    use crate::math::polygon_2d::box_polygon;
    use crate::operations::insert::InsertPolygon;
    use crate::operations::query::IsValid;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn counts(arr: &Arrangement) -> (usize, usize, usize) {
        (arr.vertex_count(), arr.edge_count(), arr.face_count())
    }

    #[test]
    fn single_segment() {
        let mut arr = Arrangement::new();
        let chain = InsertSegment::new(p(0.0, 0.0), p(1.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(counts(&arr), (2, 1, 1));
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn zero_length_segment_is_a_point() {
        let mut arr = Arrangement::new();
        let chain = InsertSegment::new(p(2.0, 2.0), p(2.0, 2.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(counts(&arr), (1, 0, 1));
    }

    #[test]
    fn crossing_segments_meet_at_new_vertex() {
        let mut arr = Arrangement::new();
        InsertSegment::new(p(-1.0, 0.0), p(1.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        let chain = InsertSegment::new(p(0.0, -1.0), p(0.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(counts(&arr), (5, 4, 1));
        let mid = arr.vertex(chain[1]).unwrap().point;
        assert!(mid.coords.norm() < 1e-12);
        assert_eq!(arr.outgoing(chain[1]).unwrap().len(), 4);
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn repeated_insertion_is_idempotent() {
        let mut arr = Arrangement::new();
        InsertSegment::new(p(0.0, 0.0), p(3.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(1.0, -1.0), p(1.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        let before = counts(&arr);
        InsertSegment::new(p(0.0, 0.0), p(3.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(3.0, 0.0), p(0.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(counts(&arr), before);
    }

    #[test]
    fn collinear_overlap_reuses_edges() {
        let mut arr = Arrangement::new();
        InsertSegment::new(p(0.0, 0.0), p(2.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(1.0, 0.0), p(3.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        // 0 -- 1 -- 2 -- 3
        assert_eq!(counts(&arr), (4, 3, 1));
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn segment_through_existing_vertex_passes_through_it() {
        let mut arr = Arrangement::new();
        let v = crate::operations::insert::InsertPoint::new(p(1.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        let chain = InsertSegment::new(p(0.0, 0.0), p(2.0, 2.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[1], v);
        assert_eq!(counts(&arr), (3, 2, 1));
    }

    #[test]
    fn triangle_from_segments_closes_a_face() {
        let mut arr = Arrangement::new();
        InsertSegment::new(p(0.0, 0.0), p(4.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(4.0, 0.0), p(0.0, 3.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(0.0, 3.0), p(0.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        assert_eq!(counts(&arr), (3, 3, 2));
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn non_intersecting_mode_skips_crossings() {
        let mut arr = Arrangement::new();
        InsertSegment::non_intersecting(p(0.0, 0.0), p(1.0, 0.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(0.0, 1.0), p(1.0, 1.0))
            .with_mode(InsertMode::NonIntersecting)
            .execute(&mut arr)
            .unwrap();
        assert_eq!(counts(&arr), (4, 2, 1));
        assert!(IsValid::new().check(&arr).is_ok());
    }

    #[test]
    fn non_intersecting_link_across_faces_is_rejected() {
        let mut arr = Arrangement::new();
        InsertPolygon::new(box_polygon(p(-5.0, -5.0), p(5.0, 5.0)))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(1.0, 1.0), p(2.0, 1.0))
            .execute(&mut arr)
            .unwrap();
        InsertSegment::new(p(9.0, 8.0), p(9.0, 9.0))
            .execute(&mut arr)
            .unwrap();
        let before = counts(&arr);

        let result = InsertSegment::non_intersecting(p(2.0, 1.0), p(9.0, 8.0)).execute(&mut arr);
        assert!(matches!(
            result,
            Err(PlanisError::Topology(TopologyError::InvalidTopology(_)))
        ));
        assert_eq!(counts(&arr), before);
        assert!(IsValid::new().check(&arr).is_ok());
    }
}
