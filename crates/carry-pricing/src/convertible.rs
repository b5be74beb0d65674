//! Convertible bond valuation.
//!
//! Decomposes the instrument into a straight-bond value, a conversion
//! value, and a Black-Scholes value of the conversion right treated as
//! an equity call struck at the conversion price. The pieces combine as
//! `max(straight, conversion) + 0.1 * option`: a heuristic blend, kept
//! as-is rather than replaced with a no-arbitrage decomposition, so the
//! numbers stay comparable with the established methodology.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use carry_bonds::ConvertibleBond;
use carry_core::types::Date;
use carry_curves::SpotCurve;

use crate::error::{PricingError, PricingResult};
use crate::pricer::present_value_with_curve;
use crate::yields::{decimal_to_f64, f64_to_decimal};

/// Weight of the embedded option value in the blended total.
const OPTION_BLEND_WEIGHT: Decimal = dec!(0.1);

/// Component breakdown of a convertible bond valuation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConvertibleValue {
    /// Present value of the bond ignoring conversion.
    pub straight_value: Decimal,
    /// Conversion ratio times the current stock price.
    pub conversion_value: Decimal,
    /// Black-Scholes value of the conversion right.
    pub option_value: Decimal,
    /// Blended total: `max(straight, conversion) + 0.1 * option`.
    pub total: Decimal,
}

/// Values a convertible bond.
///
/// # Errors
///
/// Returns `InvalidInput` if `stock_price` is not strictly positive,
/// `stock_volatility` is negative, or `risk_free_rate <= -1`.
pub fn convertible_bond_value(
    convertible: &ConvertibleBond,
    curve: &SpotCurve,
    stock_price: Decimal,
    stock_volatility: Decimal,
    risk_free_rate: Decimal,
    settlement: Date,
) -> PricingResult<ConvertibleValue> {
    if stock_price <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "stock price must be positive: {stock_price}"
        )));
    }
    if stock_volatility < Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "stock volatility must not be negative: {stock_volatility}"
        )));
    }
    if risk_free_rate <= Decimal::NEGATIVE_ONE {
        return Err(PricingError::invalid_input(format!(
            "risk-free rate must exceed -100%: {risk_free_rate}"
        )));
    }

    let straight_value = present_value_with_curve(&convertible.bond, curve, settlement)?;
    let conversion_value = convertible.terms.ratio * stock_price;

    let option_per_share = black_scholes_call(
        decimal_to_f64(stock_price, "stock price")?,
        decimal_to_f64(convertible.terms.conversion_price, "conversion price")?,
        decimal_to_f64(risk_free_rate, "risk-free rate")?,
        decimal_to_f64(stock_volatility, "stock volatility")?,
        decimal_to_f64(convertible.bond.years_to_maturity(settlement), "maturity")?,
    )?;
    let option_value =
        convertible.terms.ratio * f64_to_decimal(option_per_share, "option value")?;

    let total = straight_value.max(conversion_value) + OPTION_BLEND_WEIGHT * option_value;

    Ok(ConvertibleValue {
        straight_value,
        conversion_value,
        option_value,
        total,
    })
}

/// Black-Scholes value of a European call.
///
/// Zero volatility or zero time to expiry collapse to the discounted
/// intrinsic value rather than failing.
fn black_scholes_call(
    spot: f64,
    strike: f64,
    rate: f64,
    sigma: f64,
    expiry: f64,
) -> PricingResult<f64> {
    if expiry <= 0.0 {
        return Ok((spot - strike).max(0.0));
    }
    let discounted_strike = strike * (-rate * expiry).exp();
    if sigma == 0.0 {
        return Ok((spot - discounted_strike).max(0.0));
    }

    let vol_sqrt_t = sigma * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * expiry) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| PricingError::invalid_input(format!("standard normal: {e}")))?;
    Ok(spot * normal.cdf(d1) - discounted_strike * normal.cdf(d2))
}
