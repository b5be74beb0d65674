//! Matrix pricing: estimating a price from comparable bonds.
//!
//! Each comparable contributes its yield to maturity, adjusted linearly
//! for the maturity gap and the credit-rating gap against the target.
//! The target is then repriced at the weighted average adjusted yield.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use carry_bonds::Bond;
use carry_core::types::Date;

use crate::error::{PricingError, PricingResult};
use crate::pricer::present_value;
use crate::yields::yield_to_maturity;

/// Yield adjustment per year of maturity gap: 5bp.
const MATURITY_ADJUSTMENT_PER_YEAR: Decimal = dec!(0.0005);
/// Yield adjustment per credit-rating notch: 25bp.
const RATING_ADJUSTMENT_PER_NOTCH: Decimal = dec!(0.0025);

/// A comparable bond with its observed market price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparable {
    /// The comparable bond.
    pub bond: Bond,
    /// Its observed market price.
    pub price: Decimal,
}

impl Comparable {
    /// Creates a comparable.
    #[must_use]
    pub fn new(bond: Bond, price: Decimal) -> Self {
        Self { bond, price }
    }
}

/// Estimates the price of `target` from comparable bonds.
///
/// With `weights` unset, comparables are weighted equally. A longer
/// target maturity or a lower target rating raises the blended yield.
/// Rating adjustments apply only when both the target and the
/// comparable carry a rating.
///
/// # Errors
///
/// Returns `InvalidInput` if `comparables` is empty, the weight list
/// length differs from the comparable list, a weight is negative, or
/// all weights are zero. Solver errors from a comparable's yield
/// propagate unchanged.
pub fn matrix_price(
    target: &Bond,
    comparables: &[Comparable],
    weights: Option<&[Decimal]>,
    settlement: Date,
) -> PricingResult<Decimal> {
    if comparables.is_empty() {
        return Err(PricingError::invalid_input(
            "at least one comparable is required",
        ));
    }
    if let Some(weights) = weights {
        if weights.len() != comparables.len() {
            return Err(PricingError::invalid_input(format!(
                "{} weights supplied for {} comparables",
                weights.len(),
                comparables.len()
            )));
        }
        if weights.iter().any(|w| *w < Decimal::ZERO) {
            return Err(PricingError::invalid_input("weights must not be negative"));
        }
    }

    let target_maturity = target.years_to_maturity(settlement);
    let mut weighted_yield = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for (index, comparable) in comparables.iter().enumerate() {
        let ytm = yield_to_maturity(&comparable.bond, comparable.price, settlement)?.rate;

        let maturity_gap = target_maturity - comparable.bond.years_to_maturity(settlement);
        let mut adjusted = ytm + maturity_gap * MATURITY_ADJUSTMENT_PER_YEAR;

        if let (Some(target_rating), Some(comparable_rating)) =
            (target.rating(), comparable.bond.rating())
        {
            let notches = Decimal::from(target_rating.notches_from(comparable_rating));
            adjusted += notches * RATING_ADJUSTMENT_PER_NOTCH;
        }

        let weight = weights.map_or(Decimal::ONE, |w| w[index]);
        weighted_yield += adjusted * weight;
        total_weight += weight;
    }

    if total_weight <= Decimal::ZERO {
        return Err(PricingError::invalid_input("weights must not all be zero"));
    }

    let blended = weighted_yield / total_weight;
    tracing::debug!(%blended, comparables = comparables.len(), "matrix pricing yield");
    present_value(target, blended, settlement)
}
