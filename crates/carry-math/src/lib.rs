//! # Carry Math
//!
//! Root-finding algorithms for the Carry fixed income valuation engine.
//!
//! Solvers operate on `f64`: domain code converts from `Decimal` at the
//! call site, runs the iteration in native floats for speed, and converts
//! the root back. The spread and yield solvers in `carry-pricing` chain
//! these primitives (Newton-Raphson first, bracketing methods as
//! fallbacks) to guarantee termination.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

pub use error::{MathError, MathResult};
pub use solvers::{
    bisection, brent, newton_raphson, newton_raphson_numerical, SolverConfig, SolverResult,
};
