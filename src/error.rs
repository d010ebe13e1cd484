use thiserror::Error;

/// Top-level error type for the wall geometry engine.
#[derive(Debug, Error)]
pub enum GeowallError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
///
/// These signal malformed input shapes (programmer errors), never degenerate
/// but well-typed geometry, which the engine absorbs silently.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to profile triangulation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`GeowallError`].
pub type Result<T> = std::result::Result<T, GeowallError>;
