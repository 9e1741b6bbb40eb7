use crate::math::Point2;

use super::half_edge::HalfEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the arrangement.
    pub struct VertexId;
}

/// Data associated with an arrangement vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The position of the vertex.
    pub point: Point2,
    /// Any half-edge leaving this vertex. `None` while the vertex is isolated.
    pub incident: Option<HalfEdgeId>,
}

impl VertexData {
    /// Creates a new isolated vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            incident: None,
        }
    }

    /// Returns `true` if no edge touches this vertex.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.incident.is_none()
    }
}
