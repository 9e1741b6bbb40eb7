use crate::arrangement::{Arrangement, FaceId};
use crate::error::Result;
use crate::math::polygon_2d::{point_in_polygon, signed_area_2d};
use crate::math::Point2;

use super::nearest_edge;

/// Finds the face containing a query point.
pub struct LocateFace {
    point: Point2,
}

impl LocateFace {
    /// Creates a new `LocateFace` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query.
    ///
    /// Returns `None` when the point lies on an edge (within the arrangement
    /// tolerance), since it then borders more than one face. Points outside
    /// every bounded face locate the unbounded face.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrangement is structurally broken.
    pub fn execute(&self, arrangement: &Arrangement) -> Result<Option<FaceId>> {
        if let Some((_, dist)) = nearest_edge(arrangement, &self.point)? {
            if dist <= arrangement.tolerance() {
                return Ok(None);
            }
        }
        containing_face(arrangement, &self.point).map(Some)
    }
}

/// Returns the smallest bounded face whose outer boundary contains `p`, or
/// the unbounded face.
///
/// Faces nested in holes always enclose less area than the face owning the
/// hole, so the smallest enclosing outer boundary is the face itself.
pub(crate) fn containing_face(arrangement: &Arrangement, p: &Point2) -> Result<FaceId> {
    let mut best: Option<(f64, FaceId)> = None;
    for (id, face) in arrangement.faces() {
        let Some(outer) = face.outer else {
            continue;
        };
        let boundary = arrangement.cycle_points(outer)?;
        if !point_in_polygon(p, &boundary) {
            continue;
        }
        let area = signed_area_2d(&boundary).abs();
        if best.is_none_or(|(a, _)| area < a) {
            best = Some((area, id));
        }
    }
    Ok(best.map_or(arrangement.unbounded_face(), |(_, id)| id))
}
