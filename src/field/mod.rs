//! Implicit 2D scalar fields built from a CSG tree of primitive shapes.
//!
//! Sign convention: negative inside, zero on the boundary, positive outside.

mod node;

pub use node::FieldNode;

use crate::math::Point2;

/// A scalar function over the plane.
pub trait ScalarField {
    /// Evaluates the field at `p`.
    fn evaluate(&self, p: &Point2) -> f64;
}

impl<F> ScalarField for F
where
    F: Fn(&Point2) -> f64,
{
    fn evaluate(&self, p: &Point2) -> f64 {
        self(p)
    }
}

impl ScalarField for FieldNode {
    fn evaluate(&self, p: &Point2) -> f64 {
        FieldNode::evaluate(self, p)
    }
}
