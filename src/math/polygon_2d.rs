use super::Point2;

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. Edges traversed
/// once in each direction cancel out, so boundary cycles with dangling
/// edges still report the area they enclose.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Crossing-number point-in-polygon test.
///
/// Uses the half-open rule on `y` so a ray through a vertex is counted once.
/// Points exactly on the boundary may report either side; callers that need
/// a definite answer test edge distance first.
#[must_use]
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pj.x + (p.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns the axis-aligned box corners of `[min, max]` in counter-clockwise
/// order, starting at `min`.
#[must_use]
pub fn box_polygon(min: Point2, max: Point2) -> Vec<Point2> {
    vec![
        min,
        Point2::new(max.x, min.y),
        max,
        Point2::new(min.x, max.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Vec<Point2> {
        box_polygon(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
    }

    #[test]
    fn signed_area_ccw_square() {
        assert_abs_diff_eq!(signed_area_2d(&square()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert_abs_diff_eq!(signed_area_2d(&pts), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_area_degenerate() {
        assert_abs_diff_eq!(signed_area_2d(&[Point2::new(0.0, 0.0)]), 0.0);
        assert_abs_diff_eq!(signed_area_2d(&[]), 0.0);
    }

    #[test]
    fn signed_area_ignores_doubled_antenna() {
        // Square with a spike walked out and back along y = 0.5.
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.5),
            Point2::new(2.0, 0.5),
            Point2::new(1.0, 0.5),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_abs_diff_eq!(signed_area_2d(&pts), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inside_and_outside() {
        let sq = square();
        assert!(point_in_polygon(&Point2::new(0.5, 0.5), &sq));
        assert!(!point_in_polygon(&Point2::new(1.5, 0.5), &sq));
        assert!(!point_in_polygon(&Point2::new(0.5, -0.1), &sq));
    }

    #[test]
    fn ray_through_vertex_counted_once() {
        let diamond = vec![
            Point2::new(0.0, -1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        ];
        assert!(point_in_polygon(&Point2::new(0.0, 0.0), &diamond));
        assert!(!point_in_polygon(&Point2::new(-2.0, 0.0), &diamond));
    }
}
