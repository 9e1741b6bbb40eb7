use crate::arrangement::{Arrangement, VertexId};
use crate::error::Result;
use crate::math::Point2;

/// Finds the vertex nearest to a query point.
///
/// No distance threshold is applied; callers decide whether the returned
/// candidate is close enough.
pub struct LocateVertex {
    point: Point2,
}

impl LocateVertex {
    /// Creates a new `LocateVertex` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query, returning the nearest vertex and its distance, or
    /// `None` if the arrangement has no vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrangement is structurally broken.
    pub fn execute(&self, arrangement: &Arrangement) -> Result<Option<(VertexId, f64)>> {
        nearest_vertex(arrangement, &self.point)
    }
}

/// Linear scan for the closest vertex. Ties go to the earliest created.
pub(crate) fn nearest_vertex(
    arrangement: &Arrangement,
    p: &Point2,
) -> Result<Option<(VertexId, f64)>> {
    let mut best: Option<(VertexId, f64)> = None;
    for (id, vertex) in arrangement.vertices() {
        let dist = (vertex.point - p).norm();
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((id, dist));
        }
    }
    Ok(best)
}
