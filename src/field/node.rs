use crate::math::{Point2, Vector2};

/// A node in a 2D constructive-solid-geometry tree.
///
/// Composite nodes own their children, so a tree is always acyclic and can
/// be shared read-only across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldNode {
    /// Axis-aligned box spanning `min`..`max`.
    Box { min: Point2, max: Point2 },
    /// Disc of `radius` around `center`.
    Circle { center: Point2, radius: f64 },
    /// Union of two shapes.
    Union(Box<FieldNode>, Box<FieldNode>),
    /// First shape minus the second.
    Subtraction(Box<FieldNode>, Box<FieldNode>),
    /// Overlap of two shapes.
    Intersection(Box<FieldNode>, Box<FieldNode>),
}

impl FieldNode {
    /// Creates a box node. Corners may be given in any order.
    #[must_use]
    pub fn rect(a: Point2, b: Point2) -> Self {
        Self::Box {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a circle node.
    #[must_use]
    pub fn circle(center: Point2, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    /// Creates the union of `a` and `b`.
    #[must_use]
    pub fn union(a: FieldNode, b: FieldNode) -> Self {
        Self::Union(Box::new(a), Box::new(b))
    }

    /// Creates `a` minus `b`.
    #[must_use]
    pub fn subtract(a: FieldNode, b: FieldNode) -> Self {
        Self::Subtraction(Box::new(a), Box::new(b))
    }

    /// Creates the intersection of `a` and `b`.
    #[must_use]
    pub fn intersect(a: FieldNode, b: FieldNode) -> Self {
        Self::Intersection(Box::new(a), Box::new(b))
    }

    /// Evaluates the signed field at `p`.
    #[must_use]
    pub fn evaluate(&self, p: &Point2) -> f64 {
        match self {
            FieldNode::Box { min, max } => {
                let center = nalgebra::center(min, max);
                let half = (max - min) * 0.5;
                let d = (p - center).abs() - half;
                let outside = Vector2::new(d.x.max(0.0), d.y.max(0.0)).norm();
                let inside = d.x.max(d.y).min(0.0);
                outside + inside
            }
            FieldNode::Circle { center, radius } => (p - center).norm() - radius,
            FieldNode::Union(a, b) => a.evaluate(p).min(b.evaluate(p)),
            FieldNode::Subtraction(a, b) => a.evaluate(p).max(-b.evaluate(p)),
            FieldNode::Intersection(a, b) => a.evaluate(p).max(b.evaluate(p)),
        }
    }

    /// Number of primitive leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            FieldNode::Box { .. } | FieldNode::Circle { .. } => 1,
            FieldNode::Union(a, b)
            | FieldNode::Subtraction(a, b)
            | FieldNode::Intersection(a, b) => {
                a.leaf_count() + b.leaf_count()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ScalarField;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn circle_distance() {
        let c = FieldNode::circle(p(1.0, 1.0), 2.0);
        assert_abs_diff_eq!(c.evaluate(&p(1.0, 1.0)), -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.evaluate(&p(4.0, 5.0)), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.evaluate(&p(3.0, 1.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn box_distance_inside_edge_corner() {
        let b = FieldNode::rect(p(-1.0, -1.0), p(1.0, 1.0));
        // Center: distance to nearest side is 1.
        assert_abs_diff_eq!(b.evaluate(&p(0.0, 0.0)), -1.0, epsilon = 1e-12);
        // Beside a face.
        assert_abs_diff_eq!(b.evaluate(&p(3.0, 0.0)), 2.0, epsilon = 1e-12);
        // Diagonal from a corner.
        assert_abs_diff_eq!(b.evaluate(&p(4.0, 5.0)), 5.0, epsilon = 1e-12);
        // On the boundary.
        assert_abs_diff_eq!(b.evaluate(&p(1.0, 0.5)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rect_normalizes_corners() {
        let a = FieldNode::rect(p(4.0, 4.0), p(2.0, 2.0));
        assert_eq!(
            a,
            FieldNode::Box {
                min: p(2.0, 2.0),
                max: p(4.0, 4.0)
            }
        );
    }

    #[test]
    fn union_is_exact_min() {
        let circle = FieldNode::circle(p(0.0, 0.0), 1.0);
        let rect = FieldNode::rect(p(2.0, 2.0), p(4.0, 4.0));
        let union = FieldNode::union(circle.clone(), rect.clone());

        assert!(union.evaluate(&p(0.0, 0.0)) < 0.0);
        assert!(union.evaluate(&p(10.0, 10.0)) > 0.0);
        for q in [p(0.0, 0.0), p(3.0, 3.0), p(1.5, 1.5), p(-7.0, 2.5), p(10.0, 10.0)] {
            let expected = circle.evaluate(&q).min(rect.evaluate(&q));
            assert_eq!(union.evaluate(&q).to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn subtraction_carves_hole() {
        let outer = FieldNode::circle(p(0.0, 0.0), 5.0);
        let hole = FieldNode::circle(p(0.0, 0.0), 2.0);
        let ring = FieldNode::subtract(outer, hole);
        assert!(ring.evaluate(&p(0.0, 0.0)) > 0.0);
        assert!(ring.evaluate(&p(3.5, 0.0)) < 0.0);
        assert!(ring.evaluate(&p(6.0, 0.0)) > 0.0);
    }

    #[test]
    fn intersection_keeps_overlap() {
        let a = FieldNode::rect(p(0.0, 0.0), p(2.0, 2.0));
        let b = FieldNode::rect(p(1.0, 1.0), p(3.0, 3.0));
        let both = FieldNode::intersect(a, b);
        assert!(both.evaluate(&p(1.5, 1.5)) < 0.0);
        assert!(both.evaluate(&p(0.5, 0.5)) > 0.0);
        assert_eq!(both.leaf_count(), 2);
    }

    #[test]
    fn closures_are_fields() {
        let f = |q: &Point2| q.x - 1.0;
        assert_abs_diff_eq!(ScalarField::evaluate(&f, &p(3.0, 0.0)), 2.0);
    }
}
