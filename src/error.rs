//! Error types shared by every hydrologic routine.
//!
//! Validation happens before any numerical work starts, so a caller either
//! receives a complete result or one of these errors; never a partial series.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HydroError>;

/// Rejected input: the call was aborted before computing anything.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Unit system other than `si` or `m`.
    #[error("Unknown unit system '{0}', expected 'si' or 'm'")]
    UnknownUnitSystem(String),

    /// Unrecognized method, distribution or branch selector.
    #[error("Unknown {kind} '{value}'")]
    UnknownMethod { kind: &'static str, value: String },

    /// Peak-rate factor with no entry in the gamma shape table.
    #[error("Unsupported peak rate factor {0}, expected one of 101, 238, 349, 433, 484, 504, 566")]
    UnsupportedPeakRateFactor(u32),

    /// Two inputs that must line up have different lengths.
    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Matrix/vector shapes do not form a square system.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Matrix rows of differing length.
    #[error("Row {row} has {actual} entries, expected {expected}")]
    JaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// NaN or infinite Thiessen polygon area.
    #[error("Area at index {index} is not a finite number")]
    NonNumericArea { index: usize },

    /// Scalar parameter outside its admissible range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ValidationError {
    /// Create an invalid-parameter error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Errors produced by hydrologic computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydroError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Elimination hit a pivot too small to divide by; the system is degenerate.
    #[error("Singular matrix: pivot {pivot:.3e} in column {column} is below tolerance")]
    SingularMatrix { column: usize, pivot: f64 },

    /// Documented operation with no implementation.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Iteration failed to converge or produced a non-finite value.
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

impl HydroError {
    /// Shorthand for an invalid-parameter validation error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation(ValidationError::invalid(name, reason))
    }

    /// Whether this error came from input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Check that a scalar is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HydroError::invalid(name, format!("must be positive, got {value}")))
    }
}

/// Check that a scalar is finite and non-negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HydroError::invalid(
            name,
            format!("must be non-negative, got {value}"),
        ))
    }
}
