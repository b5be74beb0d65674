//! # Carry Core
//!
//! Core types and abstractions for the Carry fixed income valuation engine.
//!
//! This crate provides the foundational building blocks used throughout Carry:
//!
//! - **Types**: Domain-specific types like [`types::Date`], [`types::CashFlow`],
//!   and [`types::Frequency`]
//! - **Day Count Conventions**: Industry-standard day count fraction calculations
//! - **Errors**: The shared [`CarryError`] type
//!
//! ## Design Philosophy
//!
//! - **Decimal arithmetic**: All monetary and rate quantities use
//!   `rust_decimal::Decimal`, never native binary floating point, so iterative
//!   solvers do not accumulate representation drift
//! - **Immutable values**: Bonds, curves, and cash flows are value objects;
//!   transformations produce new instances
//!
//! ## Example
//!
//! ```rust
//! use carry_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let settlement = Date::from_ymd(2025, 1, 15).unwrap();
//! let coupon_date = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let dc = DayCountConvention::Thirty360US.to_day_count();
//! assert_eq!(dc.year_fraction(settlement, coupon_date), dec!(0.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::doc_markdown)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CarryError, CarryResult};
    pub use crate::types::{CashFlow, CashFlowType, Date, Frequency};
}

// Re-export commonly used types at crate root
pub use error::{CarryError, CarryResult};
pub use types::{CashFlow, CashFlowType, Date, Frequency};
