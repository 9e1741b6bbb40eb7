//! Iso-contour extraction from scalar fields.

mod marching_squares;

pub use marching_squares::MarchingSquares;

use crate::math::{Point2, Segment2, Vector2};

/// An indexed set of contour segments.
///
/// Every consecutive pair in `indices` forms one segment, oriented so the
/// inside of the contoured region lies to its left. Vertices on a shared
/// grid edge are stored once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSet {
    /// Crossing points.
    pub vertices: Vec<Point2>,
    /// Segment endpoints, two per segment.
    pub indices: Vec<u32>,
}

impl ContourSet {
    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Returns `true` if no segment was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over the segments as geometric pairs.
    ///
    /// Pairs naming a vertex past the end of `vertices` are skipped.
    pub fn segments(&self) -> impl Iterator<Item = Segment2> + '_ {
        self.indices.chunks_exact(2).filter_map(|pair| {
            let a = self.vertices.get(pair[0] as usize)?;
            let b = self.vertices.get(pair[1] as usize)?;
            Some(Segment2::new(*a, *b))
        })
    }

    /// Returns a copy with every vertex shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
            indices: self.indices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> ContourSet {
        ContourSet {
            vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            indices: vec![0, 1, 1, 2, 2, 3, 3, 0],
        }
    }

    #[test]
    fn segments_follow_index_pairs() {
        let set = square();
        assert_eq!(set.segment_count(), 4);
        let segs: Vec<_> = set.segments().collect();
        assert_eq!(segs[1], Segment2::new(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)));
        assert_eq!(segs[3].b, Point2::new(0.0, 0.0));
    }

    #[test]
    fn translation_keeps_topology() {
        let set = square().translated(&Vector2::new(-10.0, 2.5));
        assert_eq!(set.indices, square().indices);
        assert_relative_eq!(set.vertices[2].x, -9.0);
        assert_relative_eq!(set.vertices[2].y, 3.5);
    }

    #[test]
    fn out_of_range_pairs_are_skipped() {
        let mut set = square();
        set.indices.extend([2, 9, 7, 0]);
        assert_eq!(set.segment_count(), 6);
        assert_eq!(set.segments().count(), 4);
    }

    #[test]
    fn default_is_empty() {
        let set = ContourSet::default();
        assert!(set.is_empty());
        assert_eq!(set.segments().count(), 0);
    }
}
