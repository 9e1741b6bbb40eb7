mod insert_point;
mod insert_polygon;
mod insert_segment;

pub use insert_point::InsertPoint;
pub use insert_polygon::InsertPolygon;
pub use insert_segment::InsertSegment;

pub(crate) use insert_point::insert_vertex;

/// How a curve is inserted into the arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Compute intersections with every existing edge and split at each.
    #[default]
    Incremental,
    /// The caller guarantees the curve crosses no existing edge, so the
    /// intersection scan is skipped. Vertices are still snapped and reused.
    NonIntersecting,
}
