//! Error types for the loancalc library.
//!
//! Errors are raised where they are detected and never retried internally.
//! The variants follow four families: domain validation of inputs, unknown
//! configuration discriminators, bracketing preconditions, and numerical
//! failures of the root finders.

use loancalc_math::MathError;
use thiserror::Error;

/// A specialized Result type for loancalc operations.
pub type LoanResult<T> = Result<T, LoanError>;

/// The main error type for loancalc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// An input violates its domain (principal, rate, return days, ...).
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// The offending input.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A discriminator string does not name a known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant {
        /// What was being selected (schedule type, IRR strategy, ...).
        kind: String,
        /// The unrecognised value.
        value: String,
    },

    /// A solver precondition does not hold (e.g. no sign change in a bracket).
    #[error("Precondition failed: {reason}")]
    PreconditionFailed {
        /// Description of the failed precondition.
        reason: String,
    },

    /// Numerical solver failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Other numerical failure (zero derivative, singular Jacobian, NaN).
    #[error("Numerical error: {reason}")]
    Numerical {
        /// Description of the failure.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("Configuration error: {field}: {message}")]
    Config {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },
}

impl LoanError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown variant error.
    #[must_use]
    pub fn unknown_variant(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Creates a precondition error.
    #[must_use]
    pub fn precondition_failed(reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            reason: reason.into(),
        }
    }

    /// Creates a numerical error.
    #[must_use]
    pub fn numerical(reason: impl Into<String>) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for LoanError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidBracket { .. } | MathError::InvalidInterval { .. } => {
                LoanError::PreconditionFailed {
                    reason: err.to_string(),
                }
            }
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => LoanError::ConvergenceFailed {
                iterations,
                residual,
            },
            other => LoanError::numerical(other.to_string()),
        }
    }
}
