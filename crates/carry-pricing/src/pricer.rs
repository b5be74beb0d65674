//! Present value, accrued interest, and price conversions.
//!
//! All discounting here stays in `Decimal` end to end; iterative solvers
//! elsewhere in the crate bridge to `f64` and convert back at the
//! boundary. Discount factors use annual compounding, `(1 + r)^-t`, with
//! `t` measured by the bond's day count convention.

use std::collections::HashMap;

use rust_decimal::{Decimal, MathematicalOps};

use carry_bonds::{Bond, CashFlowGenerator};
use carry_core::types::Date;
use carry_curves::SpotCurve;

use crate::error::{PricingError, PricingResult};

/// Returns `(time_in_years, amount)` for each remaining cash flow of
/// `bond`, measured from `settlement` under the bond's day count.
pub(crate) fn flow_times(bond: &Bond, settlement: Date) -> PricingResult<Vec<(Decimal, Decimal)>> {
    let convention = bond.day_count().to_day_count();
    let flows = CashFlowGenerator::generate(bond, settlement)?;
    Ok(flows
        .iter()
        .map(|cf| (convention.year_fraction(settlement, cf.date()), cf.amount()))
        .collect())
}

fn ensure_valid_rate(rate: Decimal) -> PricingResult<()> {
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(PricingError::invalid_input(format!(
            "discount rate must exceed -100%: {rate}"
        )));
    }
    Ok(())
}

pub(crate) fn discount(amount: Decimal, rate: Decimal, years: Decimal) -> PricingResult<Decimal> {
    let factor = (Decimal::ONE + rate).checked_powd(years).ok_or_else(|| {
        PricingError::invalid_input(format!(
            "discount factor overflow at rate {rate}, t = {years}"
        ))
    })?;
    Ok(amount / factor)
}

/// Discounts every remaining cash flow of `bond` at a single flat rate.
///
/// # Errors
///
/// Returns `InvalidInput` if `discount_rate <= -1` or the settlement
/// date is on or after maturity.
pub fn present_value(
    bond: &Bond,
    discount_rate: Decimal,
    settlement: Date,
) -> PricingResult<Decimal> {
    ensure_valid_rate(discount_rate)?;
    let mut total = Decimal::ZERO;
    for (years, amount) in flow_times(bond, settlement)? {
        total += discount(amount, discount_rate, years)?;
    }
    Ok(total)
}

/// Discounts each cash flow at the curve's spot rate for its own
/// maturity (term-structure discounting).
///
/// # Errors
///
/// Returns `InvalidInput` if a curve rate at a flow's maturity is at or
/// below -100% (possible after extreme parallel shifts).
pub fn present_value_with_curve(
    bond: &Bond,
    curve: &SpotCurve,
    settlement: Date,
) -> PricingResult<Decimal> {
    let mut total = Decimal::ZERO;
    for (years, amount) in flow_times(bond, settlement)? {
        let rate = curve.rate(years);
        ensure_valid_rate(rate)?;
        total += discount(amount, rate, years)?;
    }
    Ok(total)
}

/// Computes `annual_coupon / price`.
///
/// Returns zero for zero-coupon bonds, which pay no coupon to relate to
/// the price.
///
/// # Errors
///
/// Returns `InvalidInput` if `price` is not strictly positive.
pub fn current_yield(bond: &Bond, price: Decimal) -> PricingResult<Decimal> {
    if price <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "price must be positive: {price}"
        )));
    }
    if bond.is_zero_coupon() {
        return Ok(Decimal::ZERO);
    }
    Ok(bond.annual_coupon() / price)
}

/// Computes the coupon interest accrued since the last coupon date.
pub fn accrued_interest(bond: &Bond, settlement: Date) -> PricingResult<Decimal> {
    Ok(CashFlowGenerator::accrued_interest(bond, settlement)?)
}

/// Converts a dirty (invoice) price to a clean (quoted) price.
///
/// # Errors
///
/// Returns `InvalidInput` if `dirty_price` is not strictly positive.
pub fn clean_price(bond: &Bond, dirty_price: Decimal, settlement: Date) -> PricingResult<Decimal> {
    if dirty_price <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "price must be positive: {dirty_price}"
        )));
    }
    Ok(dirty_price - accrued_interest(bond, settlement)?)
}

/// Converts a clean (quoted) price to a dirty (invoice) price.
///
/// # Errors
///
/// Returns `InvalidInput` if `clean_price` is not strictly positive.
pub fn dirty_price(bond: &Bond, clean_price: Decimal, settlement: Date) -> PricingResult<Decimal> {
    if clean_price <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "price must be positive: {clean_price}"
        )));
    }
    Ok(clean_price + accrued_interest(bond, settlement)?)
}

/// Opt-in memoization of flat-rate present values.
///
/// Keyed by `(bond, rate, settlement)`; the caller owns the cache and
/// its lifetime, so repeated revaluation loops (matrix pricing, scenario
/// grids) can reuse results without any hidden process-wide state.
#[derive(Debug, Default)]
pub struct PvCache {
    entries: HashMap<(Bond, Decimal, Date), Decimal>,
}

impl PvCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached present value, computing and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Same as [`present_value`].
    pub fn present_value(
        &mut self,
        bond: &Bond,
        discount_rate: Decimal,
        settlement: Date,
    ) -> PricingResult<Decimal> {
        let key = (bond.clone(), discount_rate, settlement);
        if let Some(&value) = self.entries.get(&key) {
            return Ok(value);
        }
        let value = present_value(bond, discount_rate, settlement)?;
        self.entries.insert(key, value);
        Ok(value)
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
