use std::collections::HashMap;

use tracing::debug;

use crate::field::ScalarField;
use crate::math::{Point2, Segment2};

use super::ContourSet;

/// Extracts the zero iso-contour of a scalar field on a regular grid.
///
/// Samples sit at grid coordinates `(i, j)` for `0 <= i < nx`, `0 <= j < ny`
/// unless [`with_bounds`](Self::with_bounds) maps the lattice onto a world
/// rectangle.
#[derive(Debug, Clone, Copy)]
pub struct MarchingSquares {
    nx: usize,
    ny: usize,
    bounds: Option<(Point2, Point2)>,
}

/// Orientation of a grid edge. Horizontal edges join `(i, j)` to
/// `(i + 1, j)`, vertical ones join `(i, j)` to `(i, j + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Axis {
    Horizontal,
    Vertical,
}

type EdgeKey = (Axis, usize, usize);

/// Cell edges: 0 bottom, 1 right, 2 top, 3 left. Each pair runs from the
/// edge where the boundary leaves the inside to the edge where it enters,
/// so the inside is on the left.
const CASES: [&[(u8, u8)]; 16] = [
    &[],
    &[(0, 3)],
    &[(1, 0)],
    &[(1, 3)],
    &[(2, 1)],
    &[], // saddle
    &[(2, 0)],
    &[(2, 3)],
    &[(3, 2)],
    &[(0, 2)],
    &[], // saddle
    &[(1, 2)],
    &[(3, 1)],
    &[(0, 1)],
    &[(3, 0)],
    &[],
];

const SADDLE_5_JOINED: &[(u8, u8)] = &[(0, 1), (2, 3)];
const SADDLE_5_SPLIT: &[(u8, u8)] = &[(0, 3), (2, 1)];
const SADDLE_10_JOINED: &[(u8, u8)] = &[(3, 0), (1, 2)];
const SADDLE_10_SPLIT: &[(u8, u8)] = &[(1, 0), (3, 2)];

impl MarchingSquares {
    /// Creates a grid of `nx` by `ny` samples.
    #[must_use]
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny, bounds: None }
    }

    /// Spreads the samples evenly over the rectangle `min..max`.
    #[must_use]
    pub fn with_bounds(mut self, min: Point2, max: Point2) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// World position of sample `(i, j)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_point(&self, i: usize, j: usize) -> Point2 {
        match self.bounds {
            Some((min, max)) => {
                let sx = (max.x - min.x) / (self.nx.max(2) - 1) as f64;
                let sy = (max.y - min.y) / (self.ny.max(2) - 1) as f64;
                Point2::new(min.x + i as f64 * sx, min.y + j as f64 * sy)
            }
            None => Point2::new(i as f64, j as f64),
        }
    }

    /// Samples `field` and emits the contour segments of its zero level.
    ///
    /// A corner is inside when its value is strictly negative. Ambiguous
    /// cells are resolved by sampling the cell center.
    pub fn generate<F>(&self, field: &F) -> ContourSet
    where
        F: ScalarField + ?Sized,
    {
        if self.nx < 2 || self.ny < 2 {
            return ContourSet::default();
        }

        let mut values = Vec::with_capacity(self.nx * self.ny);
        for j in 0..self.ny {
            for i in 0..self.nx {
                values.push(field.evaluate(&self.sample_point(i, j)));
            }
        }

        let mut builder = ContourBuilder {
            grid: self,
            values: &values,
            lookup: HashMap::new(),
            set: ContourSet::default(),
        };

        for j in 0..self.ny - 1 {
            for i in 0..self.nx - 1 {
                let corners = [
                    builder.value(i, j),
                    builder.value(i + 1, j),
                    builder.value(i + 1, j + 1),
                    builder.value(i, j + 1),
                ];
                let case = corners
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| **v < 0.0)
                    .fold(0usize, |acc, (bit, _)| acc | (1 << bit));

                let segments = match case {
                    5 | 10 => {
                        let center =
                            Segment2::new(self.sample_point(i, j), self.sample_point(i + 1, j + 1))
                                .midpoint();
                        let joined = field.evaluate(&center) < 0.0;
                        match (case, joined) {
                            (5, true) => SADDLE_5_JOINED,
                            (5, false) => SADDLE_5_SPLIT,
                            (_, true) => SADDLE_10_JOINED,
                            (_, false) => SADDLE_10_SPLIT,
                        }
                    }
                    _ => CASES[case],
                };

                for &(from, to) in segments {
                    let a = builder.crossing(cell_edge(i, j, from));
                    let b = builder.crossing(cell_edge(i, j, to));
                    builder.set.indices.push(a);
                    builder.set.indices.push(b);
                }
            }
        }

        let set = builder.set;
        debug!(
            nx = self.nx,
            ny = self.ny,
            vertices = set.vertices.len(),
            segments = set.segment_count(),
            "marching squares complete"
        );
        set
    }
}

/// Maps a local cell edge to its global grid edge.
fn cell_edge(i: usize, j: usize, edge: u8) -> EdgeKey {
    match edge {
        0 => (Axis::Horizontal, i, j),
        1 => (Axis::Vertical, i + 1, j),
        2 => (Axis::Horizontal, i, j + 1),
        _ => (Axis::Vertical, i, j),
    }
}

struct ContourBuilder<'a> {
    grid: &'a MarchingSquares,
    values: &'a [f64],
    lookup: HashMap<EdgeKey, u32>,
    set: ContourSet,
}

impl ContourBuilder<'_> {
    fn value(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.grid.nx + i]
    }

    /// Returns the vertex index of the zero crossing on a grid edge,
    /// creating it on first use. Interpolation always runs from the lower
    /// grid index so neighbouring cells agree bit for bit.
    #[allow(clippy::cast_possible_truncation)]
    fn crossing(&mut self, key: EdgeKey) -> u32 {
        if let Some(&idx) = self.lookup.get(&key) {
            return idx;
        }
        let (axis, i, j) = key;
        let (i1, j1) = match axis {
            Axis::Horizontal => (i + 1, j),
            Axis::Vertical => (i, j + 1),
        };
        let f0 = self.value(i, j);
        let f1 = self.value(i1, j1);
        let p0 = self.grid.sample_point(i, j);
        let p1 = self.grid.sample_point(i1, j1);
        // One end is strictly negative and the other is not, so f0 != f1.
        let t = f0 / (f0 - f1);
        let point = p0 + (p1 - p0) * t;

        let idx = self.set.vertices.len() as u32;
        self.set.vertices.push(point);
        self.lookup.insert(key, idx);
        idx
    }
}
