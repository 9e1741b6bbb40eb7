use super::face::FaceId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a half-edge in the arrangement.
    pub struct HalfEdgeId;
}

/// Data associated with a directed half-edge.
///
/// The incident face lies to the left of the half-edge, so the outer
/// boundary of a bounded face runs counter-clockwise and a hole boundary
/// runs clockwise.
#[derive(Debug, Clone)]
pub struct HalfEdgeData {
    /// Vertex this half-edge leaves from.
    pub source: VertexId,
    /// The oppositely directed half-edge of the same edge.
    pub twin: HalfEdgeId,
    /// Next half-edge along the face boundary.
    pub next: HalfEdgeId,
    /// Previous half-edge along the face boundary.
    pub prev: HalfEdgeId,
    /// Face to the left.
    pub face: FaceId,
}
