//! Interest-rate risk measures: duration and convexity.

use rust_decimal::Decimal;

use carry_bonds::Bond;
use carry_core::types::Date;

use crate::error::PricingResult;
use crate::pricer::{discount, flow_times, present_value};

/// Computes the Macaulay duration: the present-value-weighted average
/// time to each cash flow, in years.
///
/// Returns zero when the price denominator is zero.
///
/// # Errors
///
/// Returns `InvalidInput` if `yield_rate <= -1` or the settlement date
/// is on or after maturity.
pub fn macaulay_duration(
    bond: &Bond,
    yield_rate: Decimal,
    settlement: Date,
) -> PricingResult<Decimal> {
    let price = present_value(bond, yield_rate, settlement)?;
    if price == Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let mut weighted = Decimal::ZERO;
    for (years, amount) in flow_times(bond, settlement)? {
        weighted += years * discount(amount, yield_rate, years)?;
    }
    Ok(weighted / price)
}

/// Computes the modified duration: Macaulay duration divided by
/// `1 + y/m`, where `m` is the compounding frequency.
///
/// # Errors
///
/// Same as [`macaulay_duration`].
pub fn modified_duration(
    bond: &Bond,
    yield_rate: Decimal,
    settlement: Date,
) -> PricingResult<Decimal> {
    let macaulay = macaulay_duration(bond, yield_rate, settlement)?;
    let periods = bond.frequency().periods_per_year().max(1);
    Ok(macaulay / (Decimal::ONE + yield_rate / Decimal::from(periods)))
}

/// Computes the convexity of the price-yield relationship,
/// `sum(cf * t * (t + 1) / (1 + y)^(t + 2)) / price`.
///
/// Returns zero when the price denominator is zero.
///
/// # Errors
///
/// Same as [`macaulay_duration`].
pub fn convexity(bond: &Bond, yield_rate: Decimal, settlement: Date) -> PricingResult<Decimal> {
    let price = present_value(bond, yield_rate, settlement)?;
    if price == Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let two = Decimal::from(2);
    let mut total = Decimal::ZERO;
    for (years, amount) in flow_times(bond, settlement)? {
        let weight = years * (years + Decimal::ONE);
        total += discount(amount * weight, yield_rate, years + two)?;
    }
    Ok(total / price)
}

/// Estimates the price change for a yield move of `delta_y`, using the
/// second-order expansion
/// `dP = P * (-D_mod * dy + 0.5 * C * dy^2)`.
///
/// # Errors
///
/// Returns `InvalidInput` if `yield_rate <= -1` or the settlement date
/// is on or after maturity.
pub fn price_change_estimate(
    bond: &Bond,
    yield_rate: Decimal,
    delta_y: Decimal,
    settlement: Date,
) -> PricingResult<Decimal> {
    let price = present_value(bond, yield_rate, settlement)?;
    let duration = modified_duration(bond, yield_rate, settlement)?;
    let convexity = convexity(bond, yield_rate, settlement)?;

    let half = Decimal::new(5, 1);
    Ok(price * (-duration * delta_y + half * convexity * delta_y * delta_y))
}
