//! Error types for the bond instrument model.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur constructing instruments or generating cash flows.
#[derive(Error, Debug, Clone)]
pub enum BondError {
    /// The bond specification violates an invariant.
    #[error("invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what is invalid.
        reason: String,
    },

    /// A call/put schedule or conversion terms entry is invalid.
    #[error("invalid option terms: {reason}")]
    InvalidOptionTerms {
        /// Description of what is invalid.
        reason: String,
    },

    /// Date arithmetic failed while building a schedule.
    #[error("schedule date error: {0}")]
    DateError(#[from] carry_core::CarryError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates an invalid option terms error.
    #[must_use]
    pub fn invalid_option_terms(reason: impl Into<String>) -> Self {
        Self::InvalidOptionTerms {
            reason: reason.into(),
        }
    }
}
