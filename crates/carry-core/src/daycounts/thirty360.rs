//! 30/360-family day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30/360 US (Bond Basis) day count convention.
///
/// Assumes 30-day months and a 360-day year, with the US adjustment rules:
/// if the start day is 31 it becomes 30, and if the end day is 31 while the
/// (adjusted) start day is 30 the end day also becomes 30.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}

/// 30E/360 (Eurobond Basis) day count convention.
///
/// As 30/360 but both start and end days of 31 are unconditionally
/// treated as 30.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day()).min(30);
        let d2 = i64::from(end.day()).min(30);

        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_thirty360_us_half_year() {
        let yf = Thirty360US.year_fraction(date(2025, 1, 15), date(2025, 7, 15));
        assert_eq!(yf, dec!(0.5));
    }

    #[test]
    fn test_thirty360_us_month_end_rule() {
        // Jan 31 -> Jul 31: d1 adjusted to 30, then d2 adjusted to 30
        let days = Thirty360US.day_count(date(2025, 1, 31), date(2025, 7, 31));
        assert_eq!(days, 180);
    }

    #[test]
    fn test_thirty360_us_end_31_start_15() {
        // End day 31 stays when start day is not 30/31
        let days = Thirty360US.day_count(date(2025, 1, 15), date(2025, 7, 31));
        assert_eq!(days, 196);
    }

    #[test]
    fn test_thirty360e_both_clamped() {
        let days = Thirty360E.day_count(date(2025, 1, 15), date(2025, 7, 31));
        assert_eq!(days, 195);
    }

    #[test]
    fn test_ten_year_span() {
        let yf = Thirty360US.year_fraction(date(2025, 6, 15), date(2035, 6, 15));
        assert_eq!(yf, dec!(10));
    }
}
