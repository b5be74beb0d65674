//! Day count conventions for fixed income calculations.
//!
//! Day count conventions determine how a calendar span converts into a
//! fraction of a year, which drives both accrued interest and the
//! time-to-payment exponents used when discounting cash flows.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed - UK Gilts, AUD/NZD
//! - [`ActActIsda`]: Actual/Actual ISDA - year-based split
//! - [`Thirty360US`]: 30/360 US - US corporate, agency, municipal bonds
//! - [`Thirty360E`]: 30E/360 - Eurobond convention
//!
//! # Usage
//!
//! ```rust
//! use carry_core::daycounts::{DayCount, Act360};
//! use carry_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! assert_eq!(days, 181);
//! ```

mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed, ActActIsda};
pub use thirty360::{Thirty360E, Thirty360US};

use crate::types::Date;
use rust_decimal::Decimal;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates as a
///   `Decimal` (negative when `end < start`)
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; for 30/360
    /// conventions it uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of all supported day count conventions.
///
/// Provides runtime selection of a convention and conversion to a boxed
/// trait object.
///
/// # Example
///
/// ```rust
/// use carry_core::daycounts::DayCountConvention;
/// use carry_core::types::Date;
///
/// let dc = DayCountConvention::Thirty360US.to_day_count();
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 7, 1).unwrap();
/// let yf = dc.year_fraction(start, end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360 - money market instruments
    Act360,

    /// Actual/365 Fixed - UK Gilts, AUD/NZD markets
    Act365Fixed,

    /// Actual/Actual ISDA - year-based calculation
    ActActIsda,

    /// 30/360 US (Bond Basis) - US corporate, agency, municipal bonds
    #[default]
    Thirty360US,

    /// 30E/360 (Eurobond Basis) - Eurobonds, European corporates
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::Thirty360US => Box::new(Thirty360US),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::Thirty360US => "30/360 US",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_day_count_names_match() {
        for convention in DayCountConvention::all() {
            assert_eq!(convention.to_day_count().name(), convention.name());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DayCountConvention::Act360.to_string(), "ACT/360");
        assert_eq!(DayCountConvention::Thirty360US.to_string(), "30/360 US");
    }
}
