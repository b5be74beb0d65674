//! Discrete spot rate curve with linear interpolation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// A single curve pillar: a maturity (in years) and its spot rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Maturity in years.
    pub maturity: Decimal,
    /// Annualized spot rate as a decimal (0.05 = 5%).
    pub rate: Decimal,
}

/// A term structure of spot interest rates.
///
/// Stores pillars sorted by maturity and answers rate lookups by linear
/// interpolation, with flat extrapolation before the first pillar and
/// after the last. All transforms (`shift_parallel`, `shift_at`) return
/// new immutable instances.
///
/// Invariants enforced at construction: at least one pillar, strictly
/// increasing positive maturities, rates above -100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpotCurveRepr")]
pub struct SpotCurve {
    points: Vec<CurvePoint>,
}

/// Raw wire form of a curve; promoted through [`SpotCurve::new`] so
/// deserialized curves satisfy the same invariants as constructed ones.
#[derive(Deserialize)]
struct SpotCurveRepr {
    points: Vec<CurvePoint>,
}

impl TryFrom<SpotCurveRepr> for SpotCurve {
    type Error = CurveError;

    fn try_from(repr: SpotCurveRepr) -> Result<Self, Self::Error> {
        Self::new(
            repr.points
                .into_iter()
                .map(|p| (p.maturity, p.rate))
                .collect(),
        )
    }
}

impl SpotCurve {
    /// Creates a curve from `(maturity, rate)` pairs.
    ///
    /// Pairs must be sorted by strictly increasing maturity.
    ///
    /// # Errors
    ///
    /// Returns a `CurveError` if the pairs are empty, out of order, or
    /// contain an invalid maturity or rate.
    pub fn new(points: Vec<(Decimal, Decimal)>) -> CurveResult<Self> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }

        let mut previous: Option<Decimal> = None;
        for &(maturity, rate) in &points {
            if maturity <= Decimal::ZERO {
                return Err(CurveError::InvalidMaturity { maturity });
            }
            if rate <= Decimal::NEGATIVE_ONE {
                return Err(CurveError::InvalidRate { rate, maturity });
            }
            if let Some(prev) = previous {
                if maturity <= prev {
                    return Err(CurveError::NonIncreasingMaturities {
                        previous: prev,
                        current: maturity,
                    });
                }
            }
            previous = Some(maturity);
        }

        Ok(Self {
            points: points
                .into_iter()
                .map(|(maturity, rate)| CurvePoint { maturity, rate })
                .collect(),
        })
    }

    /// Creates a flat curve at the given rate.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidRate` if `rate <= -1`.
    pub fn flat(rate: Decimal) -> CurveResult<Self> {
        Self::new(vec![
            (Decimal::new(25, 2), rate), // 3 months
            (Decimal::from(30), rate),
        ])
    }

    /// Returns the curve pillars in maturity order.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Returns the number of pillars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve has no pillars (never true post-construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the rate at the shortest pillar.
    ///
    /// Used to seed short-rate models (binomial lattice, Vasicek paths).
    #[must_use]
    pub fn short_rate(&self) -> Decimal {
        self.points[0].rate
    }

    /// Returns the spot rate for the given maturity.
    ///
    /// Linearly interpolates between pillars; extrapolates flat beyond
    /// the first and last pillar.
    #[must_use]
    pub fn rate(&self, maturity: Decimal) -> Decimal {
        let first = self.points[0];
        if maturity <= first.maturity {
            return first.rate;
        }

        let last = self.points[self.points.len() - 1];
        if maturity >= last.maturity {
            return last.rate;
        }

        // Find the bracketing pillars
        for window in self.points.windows(2) {
            let (lo, hi) = (window[0], window[1]);
            if maturity <= hi.maturity {
                let span = hi.maturity - lo.maturity;
                let weight = (maturity - lo.maturity) / span;
                return lo.rate + (hi.rate - lo.rate) * weight;
            }
        }

        // Unreachable given the bounds checks above
        last.rate
    }

    /// Returns a new curve with every rate shifted by `delta`.
    ///
    /// The shifted curve keeps the pillar maturities; a uniform shift
    /// preserves the construction invariants except the rate floor,
    /// which the caller is responsible for when applying extreme shifts.
    #[must_use]
    pub fn shift_parallel(&self, delta: Decimal) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| CurvePoint {
                    maturity: p.maturity,
                    rate: p.rate + delta,
                })
                .collect(),
        }
    }

    /// Returns a new curve with only the pillar at `maturity` shifted by `delta`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::UnknownPillar` if no pillar exists at exactly
    /// that maturity.
    pub fn shift_at(&self, maturity: Decimal, delta: Decimal) -> CurveResult<Self> {
        if !self.points.iter().any(|p| p.maturity == maturity) {
            return Err(CurveError::UnknownPillar { maturity });
        }

        Ok(Self {
            points: self
                .points
                .iter()
                .map(|p| CurvePoint {
                    maturity: p.maturity,
                    rate: if p.maturity == maturity {
                        p.rate + delta
                    } else {
                        p.rate
                    },
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_curve() -> SpotCurve {
        SpotCurve::new(vec![
            (dec!(1), dec!(0.03)),
            (dec!(5), dec!(0.035)),
            (dec!(10), dec!(0.04)),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(SpotCurve::new(vec![]), Err(CurveError::Empty)));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let result = SpotCurve::new(vec![(dec!(5), dec!(0.03)), (dec!(1), dec!(0.03))]);
        assert!(matches!(
            result,
            Err(CurveError::NonIncreasingMaturities { .. })
        ));
    }

    #[test]
    fn test_rate_floor_rejected() {
        let result = SpotCurve::new(vec![(dec!(1), dec!(-1))]);
        assert!(matches!(result, Err(CurveError::InvalidRate { .. })));
    }

    #[test]
    fn test_negative_rate_allowed() {
        // Negative-but-bounded rates are valid (seen in real markets)
        let curve = SpotCurve::new(vec![(dec!(1), dec!(-0.005))]).unwrap();
        assert_eq!(curve.short_rate(), dec!(-0.005));
    }

    #[test]
    fn test_interpolation() {
        let curve = sample_curve();
        assert_eq!(curve.rate(dec!(3)), dec!(0.0325));
        assert_eq!(curve.rate(dec!(7.5)), dec!(0.0375));
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = sample_curve();
        assert_eq!(curve.rate(dec!(0.5)), dec!(0.03));
        assert_eq!(curve.rate(dec!(25)), dec!(0.04));
    }

    #[test]
    fn test_pillar_lookup_exact() {
        let curve = sample_curve();
        assert_eq!(curve.rate(dec!(5)), dec!(0.035));
    }

    #[test]
    fn test_shift_parallel_leaves_original() {
        let curve = sample_curve();
        let shifted = curve.shift_parallel(dec!(0.01));

        assert_eq!(shifted.rate(dec!(1)), dec!(0.04));
        assert_eq!(curve.rate(dec!(1)), dec!(0.03));
    }

    #[test]
    fn test_shift_at_single_pillar() {
        let curve = sample_curve();
        let bumped = curve.shift_at(dec!(5), dec!(0.0001)).unwrap();

        assert_eq!(bumped.rate(dec!(5)), dec!(0.0351));
        assert_eq!(bumped.rate(dec!(1)), dec!(0.03));
        assert!(curve.shift_at(dec!(4), dec!(0.0001)).is_err());
    }

    #[test]
    fn test_flat_curve() {
        let curve = SpotCurve::flat(dec!(0.05)).unwrap();
        assert_eq!(curve.rate(dec!(0.1)), dec!(0.05));
        assert_eq!(curve.rate(dec!(10)), dec!(0.05));
        assert_eq!(curve.rate(dec!(50)), dec!(0.05));
    }

    #[test]
    fn test_serde_round_trip() {
        let curve = sample_curve();
        let json = serde_json::to_string(&curve).unwrap();
        let back: SpotCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, curve);
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        // Deserialization runs the same validation as construction.
        assert!(serde_json::from_str::<SpotCurve>(r#"{"points":[]}"#).is_err());

        let out_of_order = r#"{"points":[
            {"maturity":5.0,"rate":0.03},
            {"maturity":1.0,"rate":0.03}
        ]}"#;
        assert!(serde_json::from_str::<SpotCurve>(out_of_order).is_err());

        let rate_at_floor = r#"{"points":[{"maturity":1.0,"rate":-1.0}]}"#;
        assert!(serde_json::from_str::<SpotCurve>(rate_at_floor).is_err());
    }
}
