//! Binomial short-rate lattice valuation.
//!
//! Builds a recombining lognormal tree seeded from the curve's short
//! rate and values the instrument by backward induction. Up/down
//! successor values are averaged with equal 50/50 weights: this is a
//! modeling simplification, not a calibrated risk-neutral lattice, and
//! derived quantities (tree prices, OAS) inherit that assumption.
//!
//! Trees and layer buffers are built per call and dropped on return;
//! nothing is shared between valuations.

use rust_decimal::Decimal;

use carry_bonds::{Bond, BondInstrument};
use carry_core::types::Date;
use carry_curves::SpotCurve;

use crate::error::{PricingError, PricingResult};
use crate::pricer::flow_times;
use crate::yields::{decimal_to_f64, f64_to_decimal};

/// Default number of time layers in the lattice.
pub const DEFAULT_LATTICE_STEPS: u32 = 100;

/// Per-layer exercise terms extracted from a call/put schedule.
struct ExerciseGrid {
    call: Vec<Option<f64>>,
    put: Vec<Option<f64>>,
}

fn layer_index(t: f64, dt: f64, steps: usize) -> usize {
    let idx = (t / dt).round();
    if idx < 0.0 {
        return 0;
    }
    (idx as usize).min(steps)
}

fn exercise_grid(
    instrument: &BondInstrument,
    bond: &Bond,
    settlement: Date,
    dt: f64,
    steps: usize,
) -> PricingResult<ExerciseGrid> {
    let mut grid = ExerciseGrid {
        call: vec![None; steps + 1],
        put: vec![None; steps + 1],
    };
    let convention = bond.day_count().to_day_count();

    match instrument {
        BondInstrument::Callable(callable) => {
            for entry in callable.schedule.future_entries(settlement) {
                let t = decimal_to_f64(
                    convention.year_fraction(settlement, entry.date),
                    "call date offset",
                )?;
                let price = decimal_to_f64(entry.price, "call price")?;
                grid.call[layer_index(t, dt, steps)] = Some(price);
            }
        }
        BondInstrument::Putable(putable) => {
            for entry in putable.schedule.future_entries(settlement) {
                let t = decimal_to_f64(
                    convention.year_fraction(settlement, entry.date),
                    "put date offset",
                )?;
                let price = decimal_to_f64(entry.price, "put price")?;
                grid.put[layer_index(t, dt, steps)] = Some(price);
            }
        }
        BondInstrument::Straight(_) | BondInstrument::Convertible(_) => {}
    }
    Ok(grid)
}

/// Values an instrument on a recombining binomial short-rate lattice.
///
/// Node rates follow `r0 * exp(sigma * sqrt(dt) * (ups - downs))` from
/// the curve's short rate `r0`. Each layer adds the cash flow due at
/// that time; call layers cap the continuation value at the call price,
/// put layers floor it at the put price.
///
/// # Errors
///
/// Returns `InvalidInput` if `volatility` or `steps` is not strictly
/// positive, or if the settlement date is on or after maturity.
pub fn binomial_tree_value(
    instrument: &BondInstrument,
    curve: &SpotCurve,
    volatility: Decimal,
    steps: u32,
    settlement: Date,
) -> PricingResult<Decimal> {
    if volatility <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "volatility must be positive: {volatility}"
        )));
    }
    if steps == 0 {
        return Err(PricingError::invalid_input("steps must be positive"));
    }

    let bond = instrument.bond();
    let mut layer_flows = vec![0.0_f64; steps as usize + 1];
    let mut horizon = 0.0_f64;
    let pairs = flow_times(bond, settlement)?;
    for &(years, _) in &pairs {
        horizon = horizon.max(decimal_to_f64(years, "year fraction")?);
    }
    let n = steps as usize;
    let dt = horizon / f64::from(steps);
    for (years, amount) in pairs {
        let t = decimal_to_f64(years, "year fraction")?;
        layer_flows[layer_index(t, dt, n)] += decimal_to_f64(amount, "cash flow")?;
    }

    let grid = exercise_grid(instrument, bond, settlement, dt, n)?;
    let r0 = decimal_to_f64(curve.short_rate(), "short rate")?;
    let sigma = decimal_to_f64(volatility, "volatility")?;
    let spread = sigma * dt.sqrt();

    // Terminal layer: the redemption flow, identical across states.
    let mut values = vec![layer_flows[n]; n + 1];

    for layer in (0..n).rev() {
        let mut next = vec![0.0_f64; layer + 1];
        for node in 0..=layer {
            // Net up moves at this node: node - (layer - node)
            let exponent = 2.0 * node as f64 - layer as f64;
            let rate = r0 * (spread * exponent).exp();
            let expected = 0.5 * (values[node] + values[node + 1]);
            let mut value = expected * (-rate * dt).exp();
            if let Some(call_price) = grid.call[layer] {
                value = value.min(call_price);
            }
            if let Some(put_price) = grid.put[layer] {
                value = value.max(put_price);
            }
            next[node] = value + layer_flows[layer];
        }
        values = next;
    }

    f64_to_decimal(values[0], "lattice value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricer::present_value_with_curve;
    use carry_bonds::{BondBuilder, CallEntry, CallSchedule, CallableBond, PutEntry, PutSchedule, PutableBond};
    use carry_core::types::Frequency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn five_year_five_pct() -> Bond {
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
    fn test_straight_bond_tracks_curve_discounting() {
        let bond = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.05)).unwrap();
        let instrument = BondInstrument::from(bond.clone());

        let tree = binomial_tree_value(&instrument, &curve, dec!(0.01), 200, settlement).unwrap();
        let direct = present_value_with_curve(&bond, &curve, settlement).unwrap();

        // Low volatility: the lattice should sit close to plain
        // discounting. The residual gap is the tree's continuous
        // compounding against the pricer's annual compounding.
        assert!((tree - direct).abs() < dec!(10), "tree {tree} direct {direct}");
    }

    #[test]
    fn test_callable_worth_no_more_than_straight() {
        let bond = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.03)).unwrap();

        let straight = BondInstrument::from(bond.clone());
        let schedule =
            CallSchedule::new(vec![CallEntry::new(date(2027, 6, 15), dec!(1000))]).unwrap();
        let callable =
            BondInstrument::Callable(CallableBond::new(bond, schedule).unwrap());

        let vol = dec!(0.10);
        let straight_value =
            binomial_tree_value(&straight, &curve, vol, 100, settlement).unwrap();
        let callable_value =
            binomial_tree_value(&callable, &curve, vol, 100, settlement).unwrap();

        assert!(callable_value <= straight_value);
        // Rates below coupon: the call cap should actually bind.
        assert!(callable_value < straight_value);
    }

    #[test]
    fn test_putable_worth_no_less_than_straight() {
        let bond = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.08)).unwrap();

        let straight = BondInstrument::from(bond.clone());
        let schedule =
            PutSchedule::new(vec![PutEntry::new(date(2027, 6, 15), dec!(1000))]).unwrap();
        let putable = BondInstrument::Putable(PutableBond::new(bond, schedule).unwrap());

        let vol = dec!(0.10);
        let straight_value =
            binomial_tree_value(&straight, &curve, vol, 100, settlement).unwrap();
        let putable_value = binomial_tree_value(&putable, &curve, vol, 100, settlement).unwrap();

        assert!(putable_value >= straight_value);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let bond = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.05)).unwrap();
        let instrument = BondInstrument::from(bond);

        assert!(binomial_tree_value(&instrument, &curve, dec!(0), 100, settlement).is_err());
        assert!(binomial_tree_value(&instrument, &curve, dec!(-0.1), 100, settlement).is_err());
        assert!(binomial_tree_value(&instrument, &curve, dec!(0.1), 0, settlement).is_err());
    }

    #[test]
    fn test_higher_volatility_moves_value() {
        // The 50/50 lognormal tree is convex in rates: widening the rate
        // distribution must not leave the value exactly unchanged.
        let bond = five_year_five_pct();
        let settlement = date(2025, 6, 15);
        let curve = SpotCurve::flat(dec!(0.05)).unwrap();
        let instrument = BondInstrument::from(bond);

        let low = binomial_tree_value(&instrument, &curve, dec!(0.01), 100, settlement).unwrap();
        let high = binomial_tree_value(&instrument, &curve, dec!(0.30), 100, settlement).unwrap();
        assert_ne!(low, high);
    }
}
