use crate::arrangement::{Arrangement, HalfEdgeId};
use crate::error::{Result, TessellationError};
use crate::math::Segment2;

use super::GlyphParams;

/// A drawable arrow for one half-edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdgeGlyph {
    /// The half-edge this glyph depicts.
    pub half_edge: HalfEdgeId,
    /// Trimmed and offset copy of the half-edge.
    pub shaft: Segment2,
    /// Head stroke starting at the shaft's start point.
    pub head: Segment2,
}

/// Builds arrow glyphs so both half-edges of an edge can be told apart when
/// drawn. Each shaft is pushed to the right of its half-edge, away from the
/// face it bounds.
pub struct HalfEdgeGlyphs {
    params: GlyphParams,
}

impl HalfEdgeGlyphs {
    /// Creates a new `HalfEdgeGlyphs` operation.
    #[must_use]
    pub fn new(params: GlyphParams) -> Self {
        Self { params }
    }

    /// Executes the operation over every half-edge in creation order.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` unless `min_length` is
    /// positive and the other lengths are finite, or an error if the
    /// arrangement is structurally broken.
    pub fn execute(&self, arrangement: &Arrangement) -> Result<Vec<HalfEdgeGlyph>> {
        let GlyphParams {
            min_length,
            offset,
            arrow_length,
        } = self.params;
        if !(min_length > 0.0
            && min_length.is_finite()
            && offset.is_finite()
            && arrow_length.is_finite())
        {
            return Err(TessellationError::InvalidParameters(format!("{:?}", self.params)).into());
        }
        let mut glyphs = Vec::with_capacity(arrangement.half_edge_count());
        for (id, _) in arrangement.half_edges() {
            let seg = arrangement.segment(id)?;
            if seg.length() < min_length {
                continue;
            }
            let tangent = seg.direction()?;
            let normal = seg.perpendicular_cw()?;

            let shaft = Segment2::new(
                seg.a + tangent * min_length,
                seg.b - tangent * min_length,
            )
            .translated(&(normal * offset));

            let head_dir = (tangent + normal).normalize();
            let head = Segment2::new(shaft.a, shaft.a + head_dir * arrow_length);

            glyphs.push(HalfEdgeGlyph {
                half_edge: id,
                shaft,
                head,
            });
        }
        Ok(glyphs)
    }
}

impl Default for HalfEdgeGlyphs {
    fn default() -> Self {
        Self::new(GlyphParams::default())
    }
}
