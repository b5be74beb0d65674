//! Option-adjusted spread solving.
//!
//! The OAS of an instrument is the constant parallel shift of the
//! benchmark curve that reconciles the model value with an observed
//! market price. Instruments with embedded redemption options are
//! valued on the binomial lattice; plain bonds use direct curve
//! discounting. The objective is monotone decreasing in the spread, so
//! a plain bisection over a fixed bracket is sufficient; the bracket is
//! widened once before giving up.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use carry_bonds::BondInstrument;
use carry_core::types::Date;
use carry_curves::SpotCurve;

use crate::error::{PricingError, PricingResult};
use crate::lattice::binomial_tree_value;
use crate::pricer::present_value_with_curve;

/// Default lattice layers used when solving OAS for optioned bonds.
pub const DEFAULT_OAS_STEPS: u32 = 100;

/// Primary spread bracket: +/- 500bp.
const PRIMARY_BRACKET: (Decimal, Decimal) = (dec!(-0.05), dec!(0.05));
/// Widened spread bracket: +/- 1000bp.
const WIDE_BRACKET: (Decimal, Decimal) = (dec!(-0.10), dec!(0.10));
/// Convergence tolerance on the pricing residual.
const OAS_TOLERANCE: Decimal = dec!(0.000001);
/// Bisection iteration cap; the bracket halves each round.
const MAX_ITERATIONS: u32 = 200;

/// One basis point.
const BASIS_POINT: Decimal = dec!(0.0001);

fn model_value(
    instrument: &BondInstrument,
    curve: &SpotCurve,
    volatility: Decimal,
    steps: u32,
    settlement: Date,
) -> PricingResult<Decimal> {
    if instrument.has_embedded_option() {
        binomial_tree_value(instrument, curve, volatility, steps, settlement)
    } else {
        present_value_with_curve(instrument.bond(), curve, settlement)
    }
}

/// Solves for the constant parallel curve spread at which the model
/// value equals `market_price`.
///
/// # Errors
///
/// Returns `InvalidInput` if `market_price` is not strictly positive,
/// and `NoConvergence` if no root is bracketed within +/- 1000bp.
pub fn calculate_oas(
    instrument: &BondInstrument,
    market_price: Decimal,
    curve: &SpotCurve,
    volatility: Decimal,
    steps: u32,
    settlement: Date,
) -> PricingResult<Decimal> {
    if market_price <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "market price must be positive: {market_price}"
        )));
    }

    let residual = |spread: Decimal| -> PricingResult<Decimal> {
        let shifted = curve.shift_parallel(spread);
        Ok(model_value(instrument, &shifted, volatility, steps, settlement)? - market_price)
    };

    for (lo, hi) in [PRIMARY_BRACKET, WIDE_BRACKET] {
        let f_lo = residual(lo)?;
        let f_hi = residual(hi)?;
        if f_lo == Decimal::ZERO {
            return Ok(lo);
        }
        if f_hi == Decimal::ZERO {
            return Ok(hi);
        }
        if (f_lo > Decimal::ZERO) == (f_hi > Decimal::ZERO) {
            tracing::debug!(%lo, %hi, %f_lo, %f_hi, "oas bracket does not straddle a root");
            continue;
        }
        return bisect(&residual, lo, hi, f_lo);
    }

    Err(PricingError::no_convergence(
        "bisection[-500bp, +500bp], bisection[-1000bp, +1000bp]",
    ))
}

fn bisect<F>(residual: &F, mut lo: Decimal, mut hi: Decimal, mut f_lo: Decimal) -> PricingResult<Decimal>
where
    F: Fn(Decimal) -> PricingResult<Decimal>,
{
    let two = dec!(2);
    for _ in 0..MAX_ITERATIONS {
        let mid = (lo + hi) / two;
        let f_mid = residual(mid)?;
        if f_mid.abs() < OAS_TOLERANCE || (hi - lo) / two < OAS_TOLERANCE * BASIS_POINT {
            return Ok(mid);
        }
        if (f_mid > Decimal::ZERO) == (f_lo > Decimal::ZERO) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    // The bracket halves every round, so 200 iterations shrink any
    // starting bracket far below tolerance.
    let mid = (lo + hi) / two;
    Ok(mid)
}

/// Computes the sensitivity of OAS to a parallel curve shift.
///
/// Bumps the curve by one basis point each way and returns the central
/// difference `-(OAS(+1bp) - OAS(-1bp)) / 2bp`.
///
/// # Errors
///
/// Same as [`calculate_oas`].
pub fn oas_duration(
    instrument: &BondInstrument,
    market_price: Decimal,
    curve: &SpotCurve,
    volatility: Decimal,
    steps: u32,
    settlement: Date,
) -> PricingResult<Decimal> {
    let up = calculate_oas(
        instrument,
        market_price,
        &curve.shift_parallel(BASIS_POINT),
        volatility,
        steps,
        settlement,
    )?;
    let down = calculate_oas(
        instrument,
        market_price,
        &curve.shift_parallel(-BASIS_POINT),
        volatility,
        steps,
        settlement,
    )?;
    Ok(-(up - down) / (dec!(2) * BASIS_POINT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carry_bonds::{BondBuilder, CallEntry, CallSchedule, CallableBond};
    use carry_core::types::Frequency;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn five_year_five_pct() -> BondInstrument {
        BondInstrument::from(
            BondBuilder::new()
                .issue_date(date(2025, 6, 15))
                .maturity_date(date(2030, 6, 15))
                .face_value(dec!(1000))
                .coupon_rate(dec!(0.05))
                .frequency(Frequency::Annual)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_oas_round_trip_straight_bond() {
        let instrument = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.04)).unwrap();

        // Price the bond off the curve shifted by a known 100bp spread,
        // then recover that spread from the price.
        let spread = dec!(0.01);
        let price = present_value_with_curve(
            instrument.bond(),
            &curve.shift_parallel(spread),
            settlement,
        )
        .unwrap();
        let oas =
            calculate_oas(&instrument, price, &curve, dec!(0.10), 50, settlement).unwrap();
        assert!((oas - spread).abs() < dec!(0.0001), "oas = {oas}");
    }

    #[test]
    fn test_oas_round_trip_callable() {
        let bond = BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2030, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0.05))
            .frequency(Frequency::Annual)
            .build()
            .unwrap();
        let schedule =
            CallSchedule::new(vec![CallEntry::new(date(2028, 6, 15), dec!(1000))]).unwrap();
        let instrument = BondInstrument::Callable(CallableBond::new(bond, schedule).unwrap());
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.04)).unwrap();
        let vol = dec!(0.10);

        let spread = dec!(0.0050);
        let price =
            binomial_tree_value(&instrument, &curve.shift_parallel(spread), vol, 50, settlement)
                .unwrap();
        let oas = calculate_oas(&instrument, price, &curve, vol, 50, settlement).unwrap();
        assert!((oas - spread).abs() < dec!(0.0005), "oas = {oas}");
    }

    #[test]
    fn test_unbracketable_price_fails() {
        let instrument = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.04)).unwrap();

        // No spread within +/- 1000bp reconciles a near-zero price.
        let result = calculate_oas(&instrument, dec!(1), &curve, dec!(0.10), 50, settlement);
        assert!(matches!(result, Err(PricingError::NoConvergence { .. })));
    }

    #[test]
    fn test_nonpositive_market_price_rejected() {
        let instrument = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.04)).unwrap();
        assert!(calculate_oas(&instrument, dec!(0), &curve, dec!(0.10), 50, settlement).is_err());
    }

    #[test]
    fn test_oas_duration_positive_for_straight_bond() {
        let instrument = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.04)).unwrap();

        let price = present_value_with_curve(instrument.bond(), &curve, settlement).unwrap();
        let duration =
            oas_duration(&instrument, price, &curve, dec!(0.10), 50, settlement).unwrap();

        // A curve shifted up needs a lower spread to hit the same price,
        // so OAS falls as rates rise and the negated slope is positive.
        assert!(duration > dec!(0), "duration = {duration}");
        assert!(duration < dec!(10));
    }
}
