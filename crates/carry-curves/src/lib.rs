//! # Carry Curves
//!
//! Spot rate curves for the Carry fixed income valuation engine.
//!
//! A [`SpotCurve`] maps maturities (in years) to annualized spot rates.
//! Curves are immutable: shifting a curve produces a new instance, so a
//! spread solver can probe many shifted copies without coordination.
//!
//! ## Example
//!
//! ```rust
//! use carry_curves::SpotCurve;
//! use rust_decimal_macros::dec;
//!
//! let curve = SpotCurve::new(vec![
//!     (dec!(1), dec!(0.03)),
//!     (dec!(5), dec!(0.035)),
//!     (dec!(10), dec!(0.04)),
//! ])
//! .unwrap();
//!
//! // Linear interpolation between pillars
//! assert_eq!(curve.rate(dec!(3)), dec!(0.0325));
//!
//! // Parallel shift returns a new curve
//! let shifted = curve.shift_parallel(dec!(0.005));
//! assert_eq!(shifted.rate(dec!(1)), dec!(0.035));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod spot;

pub use error::{CurveError, CurveResult};
pub use spot::{CurvePoint, SpotCurve};
