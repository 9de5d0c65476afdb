use thiserror::Error;

/// Top-level error type for grind spline generation.
#[derive(Debug, Error)]
pub enum GrindError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised when tunable parameters are out of their valid range.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{parameter} must be a positive finite number, got {value}")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to spline and collider operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`GrindError`].
pub type Result<T> = std::result::Result<T, GrindError>;
