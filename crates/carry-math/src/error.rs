//! Error types for the math crate.

use thiserror::Error;

/// A specialized Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors produced by numerical routines.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// A bracketing solver was given endpoints that do not straddle a root.
    #[error("invalid bracket [{a}, {b}]: f(a)={fa}, f(b)={fb} have the same sign")]
    InvalidBracket {
        /// Lower endpoint.
        a: f64,
        /// Upper endpoint.
        b: f64,
        /// Function value at the lower endpoint.
        fa: f64,
        /// Function value at the upper endpoint.
        fb: f64,
    },

    /// The iteration budget was exhausted without convergence.
    #[error("convergence failed after {iterations} iterations (residual: {residual})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Magnitude of the final residual.
        residual: f64,
    },

    /// A derivative was too close to zero for a Newton step.
    #[error("derivative too small for Newton step: {value}")]
    DerivativeTooSmall {
        /// The offending derivative value.
        value: f64,
    },
}

impl MathError {
    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }
}
