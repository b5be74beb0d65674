//! # Carry Pricing
//!
//! Valuation engine for the Carry fixed income library.
//!
//! This crate provides:
//!
//! - **Discounting**: flat-rate and term-structure present value,
//!   accrued interest, clean/dirty price conversion, opt-in memoization
//!   ([`pricer`])
//! - **Yield solving**: yield to maturity, yield to call, yield to worst
//!   with a Newton/bisection/Brent fallback chain ([`yields`])
//! - **Arbitrage-free valuation**: binomial short-rate lattice
//!   ([`lattice`]) and Vasicek Monte Carlo simulation ([`monte_carlo`])
//! - **Spread analysis**: option-adjusted spread and OAS duration
//!   ([`oas`])
//! - **Secondary valuers**: convertible bond decomposition
//!   ([`convertible`]) and matrix pricing from comparables ([`matrix`])
//! - **Risk measures**: duration and convexity ([`risk`])
//!
//! Every operation is a pure function of its inputs: nothing here holds
//! state across calls, and concurrent valuations never contend.
//!
//! ## Example
//!
//! ```rust
//! use carry_bonds::prelude::*;
//! use carry_core::types::{Date, Frequency};
//! use carry_pricing::prelude::*;
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
//! let price = present_value(&bond, dec!(0.05), settlement).unwrap();
//! let solved = yield_to_maturity(&bond, price, settlement).unwrap();
//! assert!((solved.rate - dec!(0.05)).abs() < dec!(0.000001));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod convertible;
pub mod error;
pub mod lattice;
pub mod matrix;
pub mod monte_carlo;
pub mod oas;
pub mod pricer;
pub mod risk;
pub mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convertible::{convertible_bond_value, ConvertibleValue};
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::lattice::{binomial_tree_value, DEFAULT_LATTICE_STEPS};
    pub use crate::matrix::{matrix_price, Comparable};
    pub use crate::monte_carlo::{monte_carlo_value, MonteCarloConfig, MonteCarloResult};
    pub use crate::oas::{calculate_oas, oas_duration, DEFAULT_OAS_STEPS};
    pub use crate::pricer::{
        accrued_interest, clean_price, current_yield, dirty_price, present_value,
        present_value_with_curve, PvCache,
    };
    pub use crate::risk::{
        convexity, macaulay_duration, modified_duration, price_change_estimate,
    };
    pub use crate::yields::{
        yield_to_call, yield_to_maturity, yield_to_worst, SolveMethod, YieldResult,
    };
}

pub use convertible::{convertible_bond_value, ConvertibleValue};
pub use error::{PricingError, PricingResult};
pub use lattice::{binomial_tree_value, DEFAULT_LATTICE_STEPS};
pub use matrix::{matrix_price, Comparable};
pub use monte_carlo::{monte_carlo_value, MonteCarloConfig, MonteCarloResult};
pub use oas::{calculate_oas, oas_duration, DEFAULT_OAS_STEPS};
pub use pricer::{
    accrued_interest, clean_price, current_yield, dirty_price, present_value,
    present_value_with_curve, PvCache,
};
pub use risk::{convexity, macaulay_duration, modified_duration, price_change_estimate};
pub use yields::{yield_to_call, yield_to_maturity, yield_to_worst, SolveMethod, YieldResult};
