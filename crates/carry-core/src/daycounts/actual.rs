//! ACT-family day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// Year fraction = actual days / 360. The standard money market convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed day count convention.
///
/// Year fraction = actual days / 365, regardless of leap years.
#[derive(Debug, Clone, Copy, Default)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual ISDA day count convention.
///
/// Splits the span at year boundaries; days falling in a leap year divide
/// by 366, days in a common year by 365.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start == end {
            return Decimal::ZERO;
        }
        if end < start {
            return -self.year_fraction(end, start);
        }

        let mut fraction = Decimal::ZERO;
        let mut cursor = start;

        while cursor.year() < end.year() {
            // Days remaining in the cursor's year, over that year's basis
            let year_end = Date::from_ymd(cursor.year() + 1, 1, 1)
                .expect("January 1st is always a valid date");
            let days = cursor.days_between(&year_end);
            fraction += Decimal::from(days) / Decimal::from(cursor.days_in_year());
            cursor = year_end;
        }

        let days = cursor.days_between(&end);
        fraction += Decimal::from(days) / Decimal::from(cursor.days_in_year());
        fraction
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
