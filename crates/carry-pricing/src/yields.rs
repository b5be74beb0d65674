//! Yield solving: yield to maturity, yield to call, yield to worst.
//!
//! The yield objective is solved in `f64` (see `carry-math`) and the root
//! converted back to `Decimal` at the boundary. Newton-Raphson with the
//! analytic derivative runs first; a fixed-bracket bisection and then
//! Brent's method pick up the pathological cases, so a solve fails only
//! when all three methods fail.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carry_bonds::{Bond, CallableBond};
use carry_core::types::Date;
use carry_math::{bisection, brent, newton_raphson, SolverConfig, SolverResult};

use crate::error::{PricingError, PricingResult};
use crate::pricer::flow_times;

/// Lower edge of the fallback yield bracket.
const BRACKET_LO: f64 = 0.001;
/// Upper edge of the fallback yield bracket (50% yield).
const BRACKET_HI: f64 = 0.50;
/// Solver tolerance on the pricing residual.
const YIELD_TOLERANCE: f64 = 1e-10;

/// Which solver produced a yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMethod {
    /// Newton-Raphson with the analytic price derivative.
    NewtonRaphson,
    /// Bisection over the fixed fallback bracket.
    Bisection,
    /// Brent's method over the fixed fallback bracket.
    Brent,
}

/// A solved yield with solver diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YieldResult {
    /// The solved yield as an annual decimal rate.
    pub rate: Decimal,
    /// Iterations used by the successful solver.
    pub iterations: u32,
    /// The solver that converged.
    pub method: SolveMethod,
}

pub(crate) fn decimal_to_f64(value: Decimal, what: &str) -> PricingResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| PricingError::invalid_input(format!("{what} is not representable: {value}")))
}

pub(crate) fn f64_to_decimal(value: f64, what: &str) -> PricingResult<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| PricingError::invalid_input(format!("{what} is not finite: {value}")))
}

/// Finds the flat discount rate at which the bond's present value equals
/// `price`.
///
/// Seeded from the coupon rate, or from the closed-form root
/// `(face/price)^(1/T) - 1` for zero-coupon bonds.
///
/// # Errors
///
/// Returns `InvalidInput` if `price` is not strictly positive, or
/// `NoConvergence` if Newton-Raphson, bisection, and Brent's method all
/// fail to find a root.
pub fn yield_to_maturity(
    bond: &Bond,
    price: Decimal,
    settlement: Date,
) -> PricingResult<YieldResult> {
    if price <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "price must be positive: {price}"
        )));
    }

    let mut pairs = Vec::new();
    for (years, amount) in flow_times(bond, settlement)? {
        pairs.push((
            decimal_to_f64(years, "year fraction")?,
            decimal_to_f64(amount, "cash flow")?,
        ));
    }
    let target = decimal_to_f64(price, "price")?;

    let f = |y: f64| {
        pairs
            .iter()
            .map(|&(t, amount)| amount / (1.0 + y).powf(t))
            .sum::<f64>()
            - target
    };
    let df = |y: f64| {
        pairs
            .iter()
            .map(|&(t, amount)| -t * amount / (1.0 + y).powf(t + 1.0))
            .sum::<f64>()
    };

    let seed = if bond.is_zero_coupon() {
        let face = decimal_to_f64(bond.face_value(), "face value")?;
        let horizon = pairs.last().map_or(1.0, |&(t, _)| t).max(f64::EPSILON);
        (face / target).powf(1.0 / horizon) - 1.0
    } else {
        decimal_to_f64(bond.coupon_rate(), "coupon rate")?
    };

    let config = SolverConfig::default().with_tolerance(YIELD_TOLERANCE);

    match newton_raphson(&f, &df, seed, &config) {
        Ok(solved) if solved.root > -1.0 => {
            return finish(solved, SolveMethod::NewtonRaphson);
        }
        Ok(solved) => {
            tracing::debug!(root = solved.root, "newton root below -100%, falling back");
        }
        Err(err) => {
            tracing::debug!(%err, "newton-raphson failed, falling back to bisection");
        }
    }

    match bisection(&f, BRACKET_LO, BRACKET_HI, &config) {
        Ok(solved) => return finish(solved, SolveMethod::Bisection),
        Err(err) => {
            tracing::debug!(%err, "bisection failed, falling back to brent");
        }
    }

    match brent(&f, BRACKET_LO, BRACKET_HI, &config) {
        Ok(solved) => finish(solved, SolveMethod::Brent),
        Err(_) => Err(PricingError::no_convergence(format!(
            "newton-raphson, bisection[{BRACKET_LO}, {BRACKET_HI}], brent[{BRACKET_LO}, {BRACKET_HI}]"
        ))),
    }
}

fn finish(solved: SolverResult, method: SolveMethod) -> PricingResult<YieldResult> {
    Ok(YieldResult {
        rate: f64_to_decimal(solved.root, "yield")?,
        iterations: solved.iterations,
        method,
    })
}

/// Computes the yield realized if the bond is called on `call_date` at
/// `call_price`.
///
/// Builds a synthetic bond maturing on the call date, redeeming at the
/// call price but with coupons still accruing on the original face, and
/// solves its yield to maturity.
///
/// # Errors
///
/// Same as [`yield_to_maturity`], plus `Bond` errors if the call date
/// cannot form a valid synthetic maturity.
pub fn yield_to_call(
    bond: &Bond,
    price: Decimal,
    call_date: Date,
    call_price: Decimal,
    settlement: Date,
) -> PricingResult<YieldResult> {
    let synthetic = bond.with_redemption(call_date, call_price)?;
    yield_to_maturity(&synthetic, price, settlement)
}

/// Computes the minimum of yield to maturity and every future yield to
/// call: the worst yield the holder can realize.
///
/// Call dates at or before `settlement` are ignored. With no future call
/// dates this reduces to yield to maturity.
///
/// # Errors
///
/// Same as [`yield_to_maturity`].
pub fn yield_to_worst(
    callable: &CallableBond,
    price: Decimal,
    settlement: Date,
) -> PricingResult<YieldResult> {
    let mut worst = yield_to_maturity(&callable.bond, price, settlement)?;
    for entry in callable.schedule.future_entries(settlement) {
        let candidate = yield_to_call(&callable.bond, price, entry.date, entry.price, settlement)?;
        if candidate.rate < worst.rate {
            worst = candidate;
        }
    }
    Ok(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricer::present_value;
    use carry_bonds::{BondBuilder, CallEntry, CallSchedule};
    use carry_core::types::Frequency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ten_year_five_pct() -> Bond {
        BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2035, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0.05))
            .frequency(Frequency::Annual)
            .build()
            .unwrap()
    }

    #[test]
    fn test_par_bond_ytm_equals_coupon() {
        let bond = ten_year_five_pct();
        let result = yield_to_maturity(&bond, dec!(1000), date(2025, 6, 15)).unwrap();
        assert!((result.rate - dec!(0.05)).abs() < dec!(0.000001), "{result:?}");
        assert_eq!(result.method, SolveMethod::NewtonRaphson);
    }

    #[test]
    fn test_discount_bond_yields_above_coupon() {
        let bond = ten_year_five_pct();
        let result = yield_to_maturity(&bond, dec!(950), date(2025, 6, 15)).unwrap();
        assert!(result.rate > dec!(0.05));
    }

    #[test]
    fn test_zero_coupon_closed_form() {
        let zero = BondBuilder::new()
            .issue_date(date(2025, 6, 15))
            .maturity_date(date(2030, 6, 15))
            .face_value(dec!(1000))
            .coupon_rate(dec!(0))
            .frequency(Frequency::Zero)
            .build()
            .unwrap();
        let result = yield_to_maturity(&zero, dec!(800), date(2025, 6, 15)).unwrap();
        // (1000/800)^(1/5) - 1 = 4.5640%
        assert!((result.rate - dec!(0.045640)).abs() < dec!(0.0001), "{result:?}");
    }

    #[test]
    fn test_round_trip_pv_ytm() {
        let bond = ten_year_five_pct();
        let settlement = date(2025, 6, 15);
        for rate in [dec!(0.02), dec!(0.05), dec!(0.09)] {
            let price = present_value(&bond, rate, settlement).unwrap();
            let solved = yield_to_maturity(&bond, price, settlement).unwrap();
            assert!((solved.rate - rate).abs() < dec!(0.000001), "rate {rate}");
        }
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        let bond = ten_year_five_pct();
        assert!(yield_to_maturity(&bond, dec!(0), date(2025, 6, 15)).is_err());
        assert!(yield_to_maturity(&bond, dec!(-10), date(2025, 6, 15)).is_err());
    }

    #[test]
    fn test_yield_to_call_uses_call_terms() {
        let bond = ten_year_five_pct();
        let settlement = date(2025, 6, 15);
        // Called at par after 5 of 10 years at a discount price: the
        // pull to par is twice as fast, so YTC > YTM.
        let ytc = yield_to_call(&bond, dec!(950), date(2030, 6, 15), dec!(1000), settlement)
            .unwrap();
        let ytm = yield_to_maturity(&bond, dec!(950), settlement).unwrap();
        assert!(ytc.rate > ytm.rate);
    }

    #[test]
    fn test_yield_to_worst_is_minimum() {
        let bond = ten_year_five_pct();
        let settlement = date(2025, 6, 15);
        let schedule = CallSchedule::new(vec![
            CallEntry::new(date(2028, 6, 15), dec!(1000)),
            CallEntry::new(date(2031, 6, 15), dec!(1000)),
        ])
        .unwrap();
        let callable = CallableBond::new(bond.clone(), schedule).unwrap();

        // Premium price: early call at par hurts the holder, YTW < YTM.
        let price = dec!(1080);
        let ytw = yield_to_worst(&callable, price, settlement).unwrap();
        let ytm = yield_to_maturity(&bond, price, settlement).unwrap();
        assert!(ytw.rate <= ytm.rate);
    }

    #[test]
    fn test_yield_result_serde_round_trip() {
        let bond = ten_year_five_pct();
        let result = yield_to_maturity(&bond, dec!(1000), date(2025, 6, 15)).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"method\":\"newton_raphson\""));
        let back: YieldResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rate, result.rate);
        assert_eq!(back.method, result.method);
    }

    #[test]
    fn test_yield_to_worst_no_future_calls() {
        let bond = ten_year_five_pct();
        let schedule =
            CallSchedule::new(vec![CallEntry::new(date(2028, 6, 15), dec!(1000))]).unwrap();
        let callable = CallableBond::new(bond.clone(), schedule).unwrap();

        // Settlement past the only call date: YTW degenerates to YTM.
        let settlement = date(2029, 1, 1);
        let ytw = yield_to_worst(&callable, dec!(980), settlement).unwrap();
        let ytm = yield_to_maturity(&bond, dec!(980), settlement).unwrap();
        assert_eq!(ytw.rate, ytm.rate);
    }
}
