//! # Carry Bonds
//!
//! Bond instrument model for the Carry fixed income valuation engine.
//!
//! This crate provides:
//!
//! - **Instruments**: the immutable [`Bond`] value object and its tagged
//!   variants with embedded features ([`CallableBond`], [`PutableBond`],
//!   [`ConvertibleBond`], unified under [`BondInstrument`])
//! - **Cash Flows**: schedule generation ([`CashFlowGenerator`]) and
//!   accrued interest
//! - **Ratings**: the [`CreditRating`] scale with notch arithmetic
//!
//! ## Example
//!
//! ```rust
//! use carry_bonds::prelude::*;
//! use carry_core::types::{Date, Frequency};
//! use rust_decimal_macros::dec;
//!
//! let bond = BondBuilder::new()
//!     .issue_date(Date::from_ymd(2025, 6, 15).unwrap())
//!     .maturity_date(Date::from_ymd(2035, 6, 15).unwrap())
//!     .face_value(dec!(1000))
//!     .coupon_rate(dec!(0.05))
//!     .frequency(Frequency::Annual)
//!     .build()
//!     .unwrap();
//!
//! let settlement = Date::from_ymd(2025, 6, 15).unwrap();
//! let flows = CashFlowGenerator::generate(&bond, settlement).unwrap();
//! assert_eq!(flows.len(), 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod options;
pub mod rating;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::CashFlowGenerator;
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{
        Bond, BondBuilder, BondInstrument, CallableBond, ConvertibleBond, PutableBond,
    };
    pub use crate::options::{CallEntry, CallSchedule, ConversionTerms, PutEntry, PutSchedule};
    pub use crate::rating::CreditRating;
}

pub use cashflows::CashFlowGenerator;
pub use error::{BondError, BondResult};
pub use instruments::{
    Bond, BondBuilder, BondInstrument, CallableBond, ConvertibleBond, PutableBond,
};
pub use options::{CallEntry, CallSchedule, ConversionTerms, PutEntry, PutSchedule};
pub use rating::CreditRating;
