//! Triangulation of contoured regions and drawing helpers.

mod constrained;
mod contour_fill;
mod edge_glyphs;

pub use constrained::ConstrainedTriangulation;
pub use contour_fill::FillContour;
pub use edge_glyphs::{HalfEdgeGlyph, HalfEdgeGlyphs};

use crate::math::{cross_2d, Point2};

/// Parameters for turning half-edges into drawable arrows.
#[derive(Debug, Clone, Copy)]
pub struct GlyphParams {
    /// Half-edges shorter than this are skipped; longer ones are trimmed by
    /// this amount at both ends.
    pub min_length: f64,
    /// Sideways shift along the clockwise perpendicular.
    pub offset: f64,
    /// Length of the arrow head stroke.
    pub arrow_length: f64,
}

impl Default for GlyphParams {
    fn default() -> Self {
        Self {
            min_length: 0.5,
            offset: 0.2,
            arrow_length: 0.5,
        }
    }
}

/// A planar triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh2 {
    /// Vertex positions.
    pub vertices: Vec<Point2>,
    /// Triangle indices, counter-clockwise.
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh2 {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Total area covered by the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|&[a, b, c]| {
                let a = self.vertices[a as usize];
                let b = self.vertices[b as usize];
                let c = self.vertices[c as usize];
                0.5 * cross_2d(&(b - a), &(c - a))
            })
            .sum()
    }
}
