//! Cash flow schedule generation and accrued interest.
//!
//! Coupon dates are generated backwards from maturity in whole-period
//! steps, so the stub (if any) sits at the front of the schedule. Only
//! flows strictly after the settlement date are returned.

use rust_decimal::Decimal;

use carry_core::types::{CashFlow, Date};

use crate::error::{BondError, BondResult};
use crate::instruments::Bond;

/// Generates cash flow schedules for bonds.
pub struct CashFlowGenerator;

impl CashFlowGenerator {
    /// Generates the remaining cash flows of `bond` as seen from
    /// `settlement`, in ascending date order.
    ///
    /// The final flow combines the last coupon with the redemption of
    /// face value. Zero-coupon bonds produce a single principal flow at
    /// maturity.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` if `settlement` is on or after
    /// the maturity date.
    pub fn generate(bond: &Bond, settlement: Date) -> BondResult<Vec<CashFlow>> {
        if settlement >= bond.maturity_date() {
            return Err(BondError::invalid_spec(format!(
                "settlement {} is on or after maturity {}",
                settlement,
                bond.maturity_date()
            )));
        }

        if bond.is_zero_coupon() {
            return Ok(vec![CashFlow::principal(
                bond.maturity_date(),
                bond.face_value(),
            )]);
        }

        let coupon = bond.coupon_per_period();
        let dates = Self::coupon_dates(bond)?;
        let mut flows = Vec::with_capacity(dates.len());
        let last = dates.len() - 1;
        for (i, &date) in dates.iter().enumerate() {
            if date <= settlement {
                continue;
            }
            if i == last {
                flows.push(CashFlow::redemption(date, coupon + bond.face_value()));
            } else {
                flows.push(CashFlow::coupon(date, coupon));
            }
        }
        Ok(flows)
    }

    /// Returns every coupon date of `bond` from issue to maturity
    /// inclusive, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns `BondError::DateError` if rolling a date by a whole
    /// number of periods overflows the calendar.
    pub fn coupon_dates(bond: &Bond) -> BondResult<Vec<Date>> {
        if bond.frequency().is_zero() {
            return Ok(vec![bond.maturity_date()]);
        }
        let step = bond.frequency().months_per_period() as i32;
        let mut dates = Vec::new();
        let mut periods_back = 0_i32;
        loop {
            let date = bond.maturity_date().add_months(-periods_back * step)?;
            if date <= bond.issue_date() {
                break;
            }
            dates.push(date);
            periods_back += 1;
        }
        dates.reverse();
        Ok(dates)
    }

    /// Computes the interest accrued from the last coupon date up to
    /// `settlement`, pro-rated by the bond's day count convention.
    ///
    /// Returns zero for zero-coupon bonds, on coupon dates, and before
    /// the first accrual period begins.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` if `settlement` is on or after
    /// maturity.
    pub fn accrued_interest(bond: &Bond, settlement: Date) -> BondResult<Decimal> {
        if settlement >= bond.maturity_date() {
            return Err(BondError::invalid_spec(format!(
                "settlement {} is on or after maturity {}",
                settlement,
                bond.maturity_date()
            )));
        }
        if bond.is_zero_coupon() {
            return Ok(Decimal::ZERO);
        }

        let dates = Self::coupon_dates(bond)?;
        let next = match dates.iter().find(|&&d| d > settlement) {
            Some(&d) => d,
            None => return Ok(Decimal::ZERO),
        };
        let period_start = dates
            .iter()
            .rev()
            .find(|&&d| d <= settlement)
            .copied()
            .unwrap_or(bond.issue_date());
        if settlement <= period_start {
            return Ok(Decimal::ZERO);
        }

        let convention = bond.day_count().to_day_count();
        let accrued_days = convention.day_count(period_start, settlement);
        let period_days = convention.day_count(period_start, next);
        if period_days <= 0 {
            return Ok(Decimal::ZERO);
        }

        Ok(bond.coupon_per_period() * Decimal::from(accrued_days) / Decimal::from(period_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::BondBuilder;
    use carry_core::daycounts::DayCountConvention;
    use carry_core::types::{CashFlowType, Frequency};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn annual_bond() -> Bond {
        BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2030, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0.05))
            .frequency(Frequency::Annual)
            .build()
            .unwrap()
    }

    #[test]
    fn test_annual_schedule() {
        let bond = annual_bond();
        let flows = CashFlowGenerator::generate(&bond, date(2025, 6, 15)).unwrap();
        assert_eq!(flows.len(), 5);
        assert_eq!(flows[0].date(), date(2026, 6, 15));
        assert_eq!(flows[0].amount(), dec!(50));
        assert_eq!(flows[0].cf_type(), CashFlowType::Coupon);
        assert_eq!(flows[4].date(), date(2030, 6, 15));
        assert_eq!(flows[4].amount(), dec!(1050));
        assert_eq!(flows[4].cf_type(), CashFlowType::CouponAndPrincipal);
    }

    #[test]
    fn test_semi_annual_schedule() {
        let bond = BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2027, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0.06))
            .frequency(Frequency::SemiAnnual)
            .build()
            .unwrap();
        let flows = CashFlowGenerator::generate(&bond, date(2025, 6, 15)).unwrap();
        assert_eq!(flows.len(), 4);
        assert_eq!(flows[0].date(), date(2025, 12, 15));
        assert_eq!(flows[0].amount(), dec!(30));
        assert_eq!(flows[3].amount(), dec!(1030));
    }

    #[test]
    fn test_settlement_mid_life_drops_past_flows() {
        let bond = annual_bond();
        let flows = CashFlowGenerator::generate(&bond, date(2027, 1, 1)).unwrap();
        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0].date(), date(2027, 6, 15));
    }

    #[test]
    fn test_settlement_on_coupon_date_excludes_it() {
        let bond = annual_bond();
        let flows = CashFlowGenerator::generate(&bond, date(2027, 6, 15)).unwrap();
        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0].date(), date(2028, 6, 15));
    }

    #[test]
    fn test_zero_coupon_single_flow() {
        let bond = BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2030, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0))
            .frequency(Frequency::Zero)
            .build()
            .unwrap();
        let flows = CashFlowGenerator::generate(&bond, date(2025, 6, 15)).unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].amount(), dec!(1000));
        assert_eq!(flows[0].cf_type(), CashFlowType::Principal);
    }

    #[test]
    fn test_settlement_after_maturity_rejected() {
        let bond = annual_bond();
        assert!(CashFlowGenerator::generate(&bond, date(2030, 6, 15)).is_err());
        assert!(CashFlowGenerator::generate(&bond, date(2031, 1, 1)).is_err());
    }

    #[test]
    fn test_accrued_zero_on_coupon_date() {
        let bond = annual_bond();
        let accrued = CashFlowGenerator::accrued_interest(&bond, date(2027, 6, 15)).unwrap();
        assert_eq!(accrued, dec!(0));
    }

    #[test]
    fn test_accrued_half_period_thirty_360() {
        let bond = BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2030, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0.06))
            .frequency(Frequency::SemiAnnual)
            .day_count(DayCountConvention::Thirty360US)
            .build()
            .unwrap();
        // Half of a semi-annual period under 30/360: 90 of 180 days.
        let accrued = CashFlowGenerator::accrued_interest(&bond, date(2025, 9, 15)).unwrap();
        assert_eq!(accrued, dec!(15));
    }

    #[test]
    fn test_accrued_zero_coupon() {
        let bond = BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2030, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0))
            .frequency(Frequency::Zero)
            .build()
            .unwrap();
        let accrued = CashFlowGenerator::accrued_interest(&bond, date(2026, 6, 15)).unwrap();
        assert_eq!(accrued, dec!(0));
    }
}
