use super::{cross_2d, Point2, TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel and collinear segments return `None`; callers that care about
/// collinear overlap detect it through endpoint-on-segment tests instead.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    // Parallel threshold is relative to both segment lengths.
    let cross = cross_2d(&da, &db);
    if cross.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }

    let d = b0 - a0;
    let t = cross_2d(&d, &db) / cross;
    let u = cross_2d(&d, &da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}
