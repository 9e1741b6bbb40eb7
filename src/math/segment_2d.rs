use crate::error::{GeometryError, Result};

use super::distance_2d::point_to_segment_dist;
use super::{Point2, Vector2, TOLERANCE};

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    /// Start point.
    pub a: Point2,
    /// End point.
    pub b: Point2,
}

impl Segment2 {
    /// Creates a segment from `a` to `b`.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }

    /// Returns `true` if the segment is shorter than `tolerance`.
    #[must_use]
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.length() <= tolerance
    }

    /// Returns the unit direction from `a` to `b`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the segment has zero length.
    pub fn direction(&self) -> Result<Vector2> {
        let d = self.b - self.a;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    /// Returns the unit direction rotated 90° clockwise.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the segment has zero length.
    pub fn perpendicular_cw(&self) -> Result<Vector2> {
        let d = self.direction()?;
        Ok(Vector2::new(d.y, -d.x))
    }

    /// Returns the minimum distance from `p` to the segment.
    #[must_use]
    pub fn distance(&self, p: &Point2) -> f64 {
        point_to_segment_dist(p, &self.a, &self.b)
    }

    /// Returns the midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.a, &self.b)
    }

    /// Returns the segment shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self::new(self.a + offset, self.b + offset)
    }
}
