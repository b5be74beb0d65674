//! Bond instruments.
//!
//! [`Bond`] is an immutable value object constructed once by the caller
//! and passed by reference into every calculation. Embedded features
//! (call, put, conversion) are modeled as tagged variants wrapping the
//! plain bond, unified under [`BondInstrument`], rather than as an
//! inheritance-style hierarchy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carry_core::daycounts::DayCountConvention;
use carry_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};
use crate::options::{CallSchedule, ConversionTerms, PutSchedule};
use crate::rating::CreditRating;

/// An immutable plain (option-free) bond.
///
/// # Example
///
/// ```rust
/// use carry_bonds::instruments::BondBuilder;
/// use carry_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let bond = BondBuilder::new()
///     .issue_date(Date::from_ymd(2025, 6, 15).unwrap())
///     .maturity_date(Date::from_ymd(2030, 6, 15).unwrap())
///     .face_value(dec!(1000))
///     .coupon_rate(dec!(0.05))
///     .frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
///
/// assert_eq!(bond.annual_coupon(), dec!(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BondRepr")]
pub struct Bond {
    issue_date: Date,
    maturity_date: Date,
    face_value: Decimal,
    coupon_rate: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
    rating: Option<CreditRating>,
    /// Notional the coupon accrues on. Equals `face_value` except for
    /// synthetic call-scenario bonds, where redemption differs from the
    /// coupon-bearing notional.
    coupon_base: Decimal,
}

impl Bond {
    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the face (par) value.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Returns the annualized coupon rate as a decimal (0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Returns the coupon payment frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the issuer credit rating, if known.
    #[must_use]
    pub fn rating(&self) -> Option<CreditRating> {
        self.rating
    }

    /// Returns the total coupon paid per year.
    #[must_use]
    pub fn annual_coupon(&self) -> Decimal {
        self.coupon_base * self.coupon_rate
    }

    /// Returns the coupon paid each period, or zero for zero-coupon bonds.
    #[must_use]
    pub fn coupon_per_period(&self) -> Decimal {
        if self.frequency.is_zero() {
            return Decimal::ZERO;
        }
        self.annual_coupon() / Decimal::from(self.frequency.periods_per_year())
    }

    /// Returns true if this bond pays no periodic coupons.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.frequency.is_zero() || self.coupon_rate.is_zero()
    }

    /// Returns the time from `settlement` to maturity in years, under the
    /// bond's day count convention.
    #[must_use]
    pub fn years_to_maturity(&self, settlement: Date) -> Decimal {
        self.day_count
            .to_day_count()
            .year_fraction(settlement, self.maturity_date)
    }

    /// Returns a copy of this bond with the given maturity and face value.
    ///
    /// Used to build the synthetic bond behind yield-to-call: same
    /// coupon stream, but redeeming at `redemption_value` on `date`.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` if the resulting specification is
    /// invalid (e.g., `date` not after the issue date).
    pub fn with_redemption(&self, date: Date, redemption_value: Decimal) -> BondResult<Self> {
        BondBuilder::new()
            .issue_date(self.issue_date)
            .maturity_date(date)
            .face_value(redemption_value)
            .coupon_rate(self.coupon_rate)
            .frequency(self.frequency)
            .day_count(self.day_count)
            .maybe_rating(self.rating)
            .coupon_base(Some(self.face_value))
            .build()
    }

    /// Returns the notional the coupon is computed against.
    ///
    /// Equals the face value except for synthetic call-scenario bonds,
    /// where the redemption value differs from the coupon base.
    #[must_use]
    pub fn coupon_base(&self) -> Decimal {
        self.coupon_base
    }
}

/// Raw wire form of a bond; promoted through [`BondBuilder`] so
/// deserialized bonds satisfy the same invariants as constructed ones.
#[derive(Deserialize)]
struct BondRepr {
    issue_date: Date,
    maturity_date: Date,
    face_value: Decimal,
    coupon_rate: Decimal,
    #[serde(default)]
    frequency: Frequency,
    #[serde(default)]
    day_count: DayCountConvention,
    #[serde(default)]
    rating: Option<CreditRating>,
    #[serde(default)]
    coupon_base: Option<Decimal>,
}

impl TryFrom<BondRepr> for Bond {
    type Error = BondError;

    fn try_from(repr: BondRepr) -> Result<Self, Self::Error> {
        BondBuilder::new()
            .issue_date(repr.issue_date)
            .maturity_date(repr.maturity_date)
            .face_value(repr.face_value)
            .coupon_rate(repr.coupon_rate)
            .frequency(repr.frequency)
            .day_count(repr.day_count)
            .maybe_rating(repr.rating)
            .coupon_base(repr.coupon_base)
            .build()
    }
}

/// Builder for [`Bond`], validating the specification at `build()`.
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    face_value: Option<Decimal>,
    coupon_rate: Option<Decimal>,
    frequency: Frequency,
    day_count: DayCountConvention,
    rating: Option<CreditRating>,
    coupon_base: Option<Decimal>,
}

impl BondBuilder {
    /// Creates an empty builder with default frequency (semi-annual) and
    /// day count (30/360 US).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, value: Decimal) -> Self {
        self.face_value = Some(value);
        self
    }

    /// Sets the annualized coupon rate (0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the issuer credit rating.
    #[must_use]
    pub fn rating(mut self, rating: CreditRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the rating from an optional value.
    #[must_use]
    pub fn maybe_rating(mut self, rating: Option<CreditRating>) -> Self {
        self.rating = rating;
        self
    }

    fn coupon_base(mut self, base: Option<Decimal>) -> Self {
        self.coupon_base = base;
        self
    }

    /// Validates the specification and builds the bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` when a required field is missing
    /// or a value violates an invariant (non-positive face value,
    /// negative coupon rate, maturity not after issue).
    pub fn build(self) -> BondResult<Bond> {
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::invalid_spec("issue date is required"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::invalid_spec("maturity date is required"))?;
        let face_value = self
            .face_value
            .ok_or_else(|| BondError::invalid_spec("face value is required"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::invalid_spec("coupon rate is required"))?;

        if maturity_date <= issue_date {
            return Err(BondError::invalid_spec(format!(
                "maturity {maturity_date} must be after issue {issue_date}"
            )));
        }
        if face_value <= Decimal::ZERO {
            return Err(BondError::invalid_spec(format!(
                "face value must be positive: {face_value}"
            )));
        }
        if coupon_rate < Decimal::ZERO {
            return Err(BondError::invalid_spec(format!(
                "coupon rate must not be negative: {coupon_rate}"
            )));
        }
        if coupon_rate > Decimal::ZERO && self.frequency.is_zero() {
            return Err(BondError::invalid_spec(
                "zero frequency requires a zero coupon rate",
            ));
        }
        if let Some(base) = self.coupon_base {
            if base <= Decimal::ZERO {
                return Err(BondError::invalid_spec(format!(
                    "coupon base must be positive: {base}"
                )));
            }
        }

        Ok(Bond {
            issue_date,
            maturity_date,
            face_value,
            coupon_rate,
            frequency: self.frequency,
            day_count: self.day_count,
            rating: self.rating,
            coupon_base: self.coupon_base.unwrap_or(face_value),
        })
    }
}

/// A bond the issuer may redeem early on scheduled dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableBond {
    /// The underlying plain bond.
    pub bond: Bond,
    /// The call schedule.
    pub schedule: CallSchedule,
}

impl CallableBond {
    /// Creates a callable bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidOptionTerms` if any call date falls
    /// outside (issue, maturity).
    pub fn new(bond: Bond, schedule: CallSchedule) -> BondResult<Self> {
        for entry in schedule.entries() {
            if entry.date <= bond.issue_date() || entry.date >= bond.maturity_date() {
                return Err(BondError::invalid_option_terms(format!(
                    "call date {} outside bond life",
                    entry.date
                )));
            }
        }
        Ok(Self { bond, schedule })
    }
}

/// A bond the holder may put back to the issuer on scheduled dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutableBond {
    /// The underlying plain bond.
    pub bond: Bond,
    /// The put schedule.
    pub schedule: PutSchedule,
}

impl PutableBond {
    /// Creates a putable bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidOptionTerms` if any put date falls
    /// outside (issue, maturity).
    pub fn new(bond: Bond, schedule: PutSchedule) -> BondResult<Self> {
        for entry in schedule.entries() {
            if entry.date <= bond.issue_date() || entry.date >= bond.maturity_date() {
                return Err(BondError::invalid_option_terms(format!(
                    "put date {} outside bond life",
                    entry.date
                )));
            }
        }
        Ok(Self { bond, schedule })
    }
}

/// A bond convertible into the issuer's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertibleBond {
    /// The underlying plain bond.
    pub bond: Bond,
    /// The conversion terms.
    pub terms: ConversionTerms,
}

impl ConvertibleBond {
    /// Creates a convertible bond.
    #[must_use]
    pub fn new(bond: Bond, terms: ConversionTerms) -> Self {
        Self { bond, terms }
    }
}

/// A bond together with whatever embedded features it carries.
///
/// The tagged-variant form lets pricing code dispatch on capability
/// (plain discounting vs. lattice valuation) without downcasting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BondInstrument {
    /// Plain bond with no embedded features.
    Straight(Bond),
    /// Callable bond.
    Callable(CallableBond),
    /// Putable bond.
    Putable(PutableBond),
    /// Convertible bond.
    Convertible(ConvertibleBond),
}

impl BondInstrument {
    /// Returns the underlying plain bond.
    #[must_use]
    pub fn bond(&self) -> &Bond {
        match self {
            BondInstrument::Straight(bond) => bond,
            BondInstrument::Callable(callable) => &callable.bond,
            BondInstrument::Putable(putable) => &putable.bond,
            BondInstrument::Convertible(convertible) => &convertible.bond,
        }
    }

    /// Returns true if valuation must account for an embedded
    /// redemption option (call or put).
    #[must_use]
    pub fn has_embedded_option(&self) -> bool {
        matches!(
            self,
            BondInstrument::Callable(_) | BondInstrument::Putable(_)
        )
    }
}

impl From<Bond> for BondInstrument {
    fn from(bond: Bond) -> Self {
        BondInstrument::Straight(bond)
    }
}
