//! Core domain types.

mod cashflow;
mod date;
mod frequency;

pub use cashflow::{CashFlow, CashFlowType};
pub use date::Date;
pub use frequency::Frequency;
