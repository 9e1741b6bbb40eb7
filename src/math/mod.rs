pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod segment_2d;

pub use segment_2d::Segment2;

use crate::error::{GeometryError, Result};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rejects points with NaN or infinite coordinates.
///
/// # Errors
///
/// Returns `GeometryError::NonFinite` if either coordinate is not finite.
pub fn ensure_finite(p: &Point2) -> Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { x: p.x, y: p.y }.into())
    }
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
