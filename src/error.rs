//! Error types for beam construction and analysis

use crate::types::units::UnitError;

/// Error returned when a beam, load or diagram cannot be built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BeamError {
    #[error("Invalid span [{x0}, {x1}]: the beam length must be positive")]
    InvalidSpan { x0: f64, x1: f64 },

    #[error("{what} at x = {coord} lies outside the beam span [{x0}, {x1}]")]
    OutOfBounds {
        what: String,
        coord: f64,
        x0: f64,
        x1: f64,
    },

    #[error("Invalid load interval [{left}, {right}]: left must be smaller than right")]
    InvalidInterval { left: f64, right: f64 },

    #[error("Unrecognized load type: {0}")]
    InvalidLoadType(String),

    #[error("Fixed and rolling supports coincide at x = {0}; rotation cannot be equilibrated")]
    DegenerateSupports(f64),

    #[error("Invalid intensity expression: {0}")]
    InvalidExpression(String),

    #[error("Unit conversion error: {0}")]
    Unit(#[from] UnitError),
}

pub type BeamResult<T> = Result<T, BeamError>;
