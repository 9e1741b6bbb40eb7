use crate::arrangement::{Arrangement, FaceId, HalfEdgeId, VertexId};
use crate::error::Result;
use crate::math::Point2;
use crate::operations::query::{LocateEdge, LocateFace, LocateVertex};

/// Parameters for click picking.
#[derive(Debug, Clone, Copy)]
pub struct SelectionParams {
    /// Vertices and edges farther than this from the click are not picked.
    pub snap_distance: f64,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self { snap_distance: 0.2 }
    }
}

/// Which kind of entity a pick looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Nearest vertex.
    Vertex,
    /// Nearest half-edge, on the side of the click.
    Edge,
    /// Face under the click.
    Face,
}

/// The currently selected entity. At most one entity is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A vertex.
    Vertex(VertexId),
    /// A half-edge.
    Edge(HalfEdgeId),
    /// A face.
    Face(FaceId),
}

impl Selection {
    /// Picks an entity of `kind` at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrangement is structurally broken.
    pub fn pick(
        arrangement: &Arrangement,
        kind: SelectionKind,
        point: Point2,
        params: &SelectionParams,
    ) -> Result<Self> {
        let selection = match kind {
            SelectionKind::Vertex => LocateVertex::new(point)
                .execute(arrangement)?
                .filter(|&(_, d)| d < params.snap_distance)
                .map_or(Self::None, |(v, _)| Self::Vertex(v)),
            SelectionKind::Edge => LocateEdge::new(point)
                .execute(arrangement)?
                .filter(|&(_, d)| d < params.snap_distance)
                .map_or(Self::None, |(e, _)| Self::Edge(e)),
            SelectionKind::Face => LocateFace::new(point)
                .execute(arrangement)?
                .map_or(Self::None, Self::Face),
        };
        Ok(selection)
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::box_polygon;
    use crate::operations::insert::InsertPolygon;

    fn boxed() -> Arrangement {
        let mut arr = Arrangement::new();
        InsertPolygon::new(box_polygon(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0)))
            .execute(&mut arr)
            .unwrap();
        arr
    }

    #[test]
    fn vertex_pick_respects_snap_distance() {
        let arr = boxed();
        let params = SelectionParams::default();
        let near =
            Selection::pick(&arr, SelectionKind::Vertex, Point2::new(4.9, 4.9), &params).unwrap();
        assert!(matches!(near, Selection::Vertex(_)));
        let far =
            Selection::pick(&arr, SelectionKind::Vertex, Point2::new(4.5, 4.5), &params).unwrap();
        assert!(far.is_none());
    }

    #[test]
    fn edge_pick_returns_inner_half_edge() {
        let arr = boxed();
        let params = SelectionParams::default();
        let Selection::Edge(e) =
            Selection::pick(&arr, SelectionKind::Edge, Point2::new(0.0, 4.9), &params).unwrap()
        else {
            panic!("expected an edge");
        };
        assert_ne!(arr.half_edge(e).unwrap().face, arr.unbounded_face());
        let miss =
            Selection::pick(&arr, SelectionKind::Edge, Point2::new(0.0, 0.0), &params).unwrap();
        assert_eq!(miss, Selection::None);
    }

    #[test]
    fn face_pick_includes_unbounded_but_not_edges() {
        let arr = boxed();
        let params = SelectionParams::default();
        let outside =
            Selection::pick(&arr, SelectionKind::Face, Point2::new(9.0, 0.0), &params).unwrap();
        assert_eq!(outside, Selection::Face(arr.unbounded_face()));
        let on_edge =
            Selection::pick(&arr, SelectionKind::Face, Point2::new(5.0, 0.0), &params).unwrap();
        assert!(on_edge.is_none());
    }
}
