//! Monte Carlo valuation over simulated short-rate paths.
//!
//! Short rates follow a Vasicek mean-reverting process,
//! `dr = kappa * (theta - r) * dt + sigma * sqrt(dt) * Z`, floored at a
//! small positive rate so a deep negative excursion cannot blow up the
//! discount factors. Paths are independent, so they are simulated in
//! parallel with `rayon`; each path seeds its own RNG from the base seed
//! plus the path index, which keeps results reproducible regardless of
//! how the thread pool schedules work.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use carry_bonds::Bond;
use carry_core::types::Date;
use carry_curves::SpotCurve;

use crate::error::{PricingError, PricingResult};
use crate::pricer::flow_times;
use crate::yields::{decimal_to_f64, f64_to_decimal};

/// Floor applied to simulated short rates.
const MIN_SIMULATED_RATE: f64 = 1e-6;

/// Configuration for Monte Carlo valuation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of independent rate paths.
    pub paths: u32,
    /// Time steps per path.
    pub steps: u32,
    /// Base RNG seed; identical seeds reproduce identical results.
    pub seed: u64,
    /// Vasicek mean-reversion speed (kappa).
    pub mean_reversion: Decimal,
    /// Vasicek long-run rate (theta). Defaults to the curve rate at the
    /// bond's maturity when unset.
    pub long_run_rate: Option<Decimal>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            paths: 10_000,
            steps: 252,
            seed: 0,
            mean_reversion: dec!(0.1),
            long_run_rate: None,
        }
    }
}

impl MonteCarloConfig {
    /// Sets the number of paths.
    #[must_use]
    pub fn with_paths(mut self, paths: u32) -> Self {
        self.paths = paths;
        self
    }

    /// Sets the steps per path.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the base RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the mean-reversion speed.
    #[must_use]
    pub fn with_mean_reversion(mut self, kappa: Decimal) -> Self {
        self.mean_reversion = kappa;
        self
    }

    /// Sets the long-run rate.
    #[must_use]
    pub fn with_long_run_rate(mut self, theta: Decimal) -> Self {
        self.long_run_rate = Some(theta);
        self
    }
}

/// Result of a Monte Carlo valuation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Sample mean of the discounted path values.
    pub mean: Decimal,
    /// Standard error of the mean, `sample_std / sqrt(paths)`.
    pub std_error: Decimal,
    /// Number of paths simulated.
    pub paths: u32,
}

/// Values a bond by averaging its discounted cash flows over simulated
/// Vasicek short-rate paths.
///
/// # Errors
///
/// Returns `InvalidInput` if `volatility`, `paths`, or `steps` is not
/// strictly positive, or if the settlement date is on or after maturity.
pub fn monte_carlo_value(
    bond: &Bond,
    curve: &SpotCurve,
    volatility: Decimal,
    config: &MonteCarloConfig,
    settlement: Date,
) -> PricingResult<MonteCarloResult> {
    if volatility <= Decimal::ZERO {
        return Err(PricingError::invalid_input(format!(
            "volatility must be positive: {volatility}"
        )));
    }
    if config.paths == 0 {
        return Err(PricingError::invalid_input("paths must be positive"));
    }
    if config.steps == 0 {
        return Err(PricingError::invalid_input("steps must be positive"));
    }

    let pairs = flow_times(bond, settlement)?;
    let mut horizon = 0.0_f64;
    let mut flows = Vec::with_capacity(pairs.len());
    for (years, amount) in pairs {
        let t = decimal_to_f64(years, "year fraction")?;
        horizon = horizon.max(t);
        flows.push((t, decimal_to_f64(amount, "cash flow")?));
    }

    let steps = config.steps as usize;
    let dt = horizon / f64::from(config.steps);
    // Map each flow to the time step nearest its payment date.
    let flow_steps: Vec<(usize, f64)> = flows
        .iter()
        .map(|&(t, amount)| (((t / dt).round() as usize).min(steps), amount))
        .collect();

    let r0 = decimal_to_f64(curve.short_rate(), "short rate")?;
    let theta = match config.long_run_rate {
        Some(theta) => decimal_to_f64(theta, "long-run rate")?,
        None => decimal_to_f64(curve.rate(bond.years_to_maturity(settlement)), "curve rate")?,
    };
    let kappa = decimal_to_f64(config.mean_reversion, "mean reversion")?;
    let sigma = decimal_to_f64(volatility, "volatility")?;
    let sqrt_dt = dt.sqrt();
    let seed = config.seed;

    let values: Vec<f64> = (0..config.paths)
        .into_par_iter()
        .map(|path| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(path)));
            let mut rate = r0;
            let mut integrals = vec![0.0_f64; steps + 1];
            for k in 1..=steps {
                let z: f64 = rng.sample(StandardNormal);
                rate += kappa * (theta - rate) * dt + sigma * sqrt_dt * z;
                rate = rate.max(MIN_SIMULATED_RATE);
                integrals[k] = integrals[k - 1] + rate * dt;
            }
            flow_steps
                .iter()
                .map(|&(k, amount)| amount * (-integrals[k]).exp())
                .sum()
        })
        .collect();

    let n = f64::from(config.paths);
    let mean = values.iter().sum::<f64>() / n;
    let variance = if config.paths > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    let std_error = (variance / n).sqrt();

    tracing::debug!(paths = config.paths, mean, std_error, "monte carlo valuation");

    Ok(MonteCarloResult {
        mean: f64_to_decimal(mean, "monte carlo mean")?,
        std_error: f64_to_decimal(std_error, "standard error")?,
        paths: config.paths,
    })
}
