use crate::arrangement::{Arrangement, HalfEdgeId};
use crate::error::Result;
use crate::math::{cross_2d, Point2};

/// Finds the edge nearest to a query point.
///
/// Of the two half-edges of that edge, the one with the query point on its
/// left (its face side) is returned. No distance threshold is applied.
pub struct LocateEdge {
    point: Point2,
}

impl LocateEdge {
    /// Creates a new `LocateEdge` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query, returning the half-edge and the point-to-segment
    /// distance, or `None` if the arrangement has no edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrangement is structurally broken.
    pub fn execute(&self, arrangement: &Arrangement) -> Result<Option<(HalfEdgeId, f64)>> {
        let Some((e, dist)) = nearest_edge(arrangement, &self.point)? else {
            return Ok(None);
        };
        let seg = arrangement.segment(e)?;
        let side = cross_2d(&(seg.b - seg.a), &(self.point - seg.a));
        if side < 0.0 {
            Ok(Some((arrangement.half_edge(e)?.twin, dist)))
        } else {
            Ok(Some((e, dist)))
        }
    }
}

/// Linear scan over edges for the smallest point-to-segment distance.
/// Ties go to the earliest created edge.
pub(crate) fn nearest_edge(
    arrangement: &Arrangement,
    p: &Point2,
) -> Result<Option<(HalfEdgeId, f64)>> {
    let mut best: Option<(HalfEdgeId, f64)> = None;
    for e in arrangement.edges() {
        let dist = arrangement.segment(e)?.distance(p);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((e, dist));
        }
    }
    Ok(best)
}
