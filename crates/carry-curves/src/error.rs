//! Error types for curve construction and lookup.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve construction.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Curve was constructed with no points.
    #[error("curve must contain at least one point")]
    Empty,

    /// Maturities are not strictly increasing.
    #[error("curve maturities must be strictly increasing (found {previous} then {current})")]
    NonIncreasingMaturities {
        /// The earlier maturity.
        previous: Decimal,
        /// The offending maturity.
        current: Decimal,
    },

    /// A maturity is zero or negative.
    #[error("curve maturity must be positive: {maturity}")]
    InvalidMaturity {
        /// The offending maturity.
        maturity: Decimal,
    },

    /// A rate is at or below -100%.
    #[error("curve rate must exceed -1: {rate} at maturity {maturity}")]
    InvalidRate {
        /// The offending rate.
        rate: Decimal,
        /// The maturity at which it occurs.
        maturity: Decimal,
    },

    /// Requested shift tenor is not a curve pillar.
    #[error("no curve pillar at maturity {maturity}")]
    UnknownPillar {
        /// The requested maturity.
        maturity: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        let err = CurveError::InvalidRate {
            rate: dec!(-1.5),
            maturity: dec!(5),
        };
        assert!(err.to_string().contains("-1.5"));
    }
}
