use thiserror::Error;

/// Top-level error type for the Planis kernel.
#[derive(Debug, Error)]
pub enum PlanisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the arrangement's half-edge structure.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to triangulation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`PlanisError`].
pub type Result<T> = std::result::Result<T, PlanisError>;
