use super::half_edge::HalfEdgeId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the arrangement.
    pub struct FaceId;
}

/// Data associated with a face of the planar subdivision.
///
/// A bounded face has one outer boundary cycle and any number of hole
/// cycles. The unbounded face has no outer cycle.
#[derive(Debug, Clone, Default)]
pub struct FaceData {
    /// A half-edge on the outer boundary cycle (`None` for the unbounded face).
    pub outer: Option<HalfEdgeId>,
    /// One half-edge per inner boundary cycle.
    pub holes: Vec<HalfEdgeId>,
    /// Vertices without edges lying in the face interior.
    pub isolated: Vec<VertexId>,
    /// `true` only for the single unbounded face.
    pub unbounded: bool,
}

impl FaceData {
    /// Creates the unbounded face.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            unbounded: true,
            ..Self::default()
        }
    }

    /// Creates a bounded face whose outer cycle contains `outer`.
    #[must_use]
    pub fn bounded(outer: HalfEdgeId) -> Self {
        Self {
            outer: Some(outer),
            ..Self::default()
        }
    }
}
