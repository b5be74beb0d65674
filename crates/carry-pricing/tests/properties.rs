//! Property-based tests over the discounting and yield-solving core.

use carry_bonds::prelude::*;
use carry_core::types::{Date, Frequency};
use carry_pricing::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn bond_with(coupon_bp: u32, years: i32) -> Bond {
    BondBuilder::new()
        .issue_date(date(2025, 6, 15))
        .maturity_date(date(2025 + years, 6, 15))
        .face_value(dec!(1000))
        .coupon_rate(Decimal::new(i64::from(coupon_bp), 4))
        .frequency(Frequency::Annual)
        .build()
        .unwrap()
}

proptest! {
    /// Solving the yield of a price produced at a known rate recovers
    /// that rate.
    #[test]
    fn ytm_inverts_present_value(
        rate_bp in 50u32..2000,
        coupon_bp in 0u32..1000,
        years in 2i32..15,
    ) {
        let bond = bond_with(coupon_bp, years);
        let settlement = date(2025, 6, 15);
        let rate = Decimal::new(i64::from(rate_bp), 4);

        let price = present_value(&bond, rate, settlement).unwrap();
        let solved = yield_to_maturity(&bond, price, settlement).unwrap();
        prop_assert!(
            (solved.rate - rate).abs() < dec!(0.000001),
            "rate {rate} solved {}", solved.rate
        );
    }

    /// Present value is strictly decreasing in the discount rate.
    #[test]
    fn pv_strictly_decreasing_in_rate(
        rate_bp in 50u32..1900,
        coupon_bp in 0u32..1000,
        years in 2i32..15,
    ) {
        let bond = bond_with(coupon_bp, years);
        let settlement = date(2025, 6, 15);
        let lower = Decimal::new(i64::from(rate_bp), 4);
        let higher = lower + dec!(0.005);

        let pv_lower = present_value(&bond, lower, settlement).unwrap();
        let pv_higher = present_value(&bond, higher, settlement).unwrap();
        prop_assert!(pv_lower > pv_higher);
    }

    /// A bond whose coupon equals the discount rate prices at face.
    #[test]
    fn par_bond_property(coupon_bp in 100u32..1500, years in 2i32..15) {
        let bond = bond_with(coupon_bp, years);
        let rate = Decimal::new(i64::from(coupon_bp), 4);

        let pv = present_value(&bond, rate, date(2025, 6, 15)).unwrap();
        prop_assert!((pv - dec!(1000)).abs() < dec!(0.01), "pv = {pv}");
    }

    /// Yield to worst includes YTM as a candidate, so it never exceeds it.
    #[test]
    fn ytw_bounded_by_ytm(
        coupon_bp in 100u32..1000,
        price_offset in 0u32..400,
        call_premium in 0u32..50,
    ) {
        let bond = bond_with(coupon_bp, 10);
        let settlement = date(2025, 6, 15);
        let schedule = CallSchedule::new(vec![CallEntry::new(
            date(2030, 6, 15),
            dec!(1000) + Decimal::from(call_premium),
        )]).unwrap();
        let callable = CallableBond::new(bond.clone(), schedule).unwrap();
        let price = dec!(800) + Decimal::from(price_offset);

        let ytw = yield_to_worst(&callable, price, settlement).unwrap();
        let ytm = yield_to_maturity(&bond, price, settlement).unwrap();
        prop_assert!(ytw.rate <= ytm.rate + dec!(0.000001));
    }

    /// Accrued interest stays within one full coupon period's payment.
    #[test]
    fn accrued_bounded_by_coupon(coupon_bp in 100u32..1000, month in 7u32..12) {
        let bond = bond_with(coupon_bp, 10);
        let settlement = date(2025, month, 15);

        let accrued = accrued_interest(&bond, settlement).unwrap();
        prop_assert!(accrued >= dec!(0));
        prop_assert!(accrued <= bond.annual_coupon());
    }
}
