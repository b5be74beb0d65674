//! Error types for the valuation engine.

use thiserror::Error;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur during valuation.
#[derive(Error, Debug)]
pub enum PricingError {
    /// A precondition on the inputs is violated.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the violated precondition.
        reason: String,
    },

    /// An iterative solver exhausted every fallback without finding a root.
    #[error("no convergence after trying {methods}")]
    NoConvergence {
        /// The solver methods attempted, in order.
        methods: String,
    },

    /// Instrument construction or cash flow generation failed.
    #[error("bond error: {0}")]
    Bond(#[from] carry_bonds::BondError),

    /// Curve construction or lookup failed.
    #[error("curve error: {0}")]
    Curve(#[from] carry_curves::CurveError),

    /// A numerical routine failed.
    #[error("math error: {0}")]
    Math(#[from] carry_math::MathError),
}

impl PricingError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a no-convergence error listing the attempted methods.
    #[must_use]
    pub fn no_convergence(methods: impl Into<String>) -> Self {
        Self::NoConvergence {
            methods: methods.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PricingError::no_convergence("newton-raphson, bisection, brent");
        assert!(err.to_string().contains("bisection"));
    }
}
