//! Error types shared across the Carry workspace.

use thiserror::Error;

/// A specialized Result type for Carry operations.
pub type CarryResult<T> = Result<T, CarryError>;

/// The main error type for core Carry operations.
#[derive(Error, Debug, Clone)]
pub enum CarryError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A caller-supplied value violates a precondition.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the violated precondition.
        reason: String,
    },

    /// Day count calculation error.
    #[error("Day count error: {reason}")]
    DayCountError {
        /// Description of the error.
        reason: String,
    },
}

impl CarryError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
