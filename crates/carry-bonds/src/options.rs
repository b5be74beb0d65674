//! Embedded option terms: call/put schedules and conversion features.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carry_core::types::Date;

use crate::error::{BondError, BondResult};

/// A single entry in a call schedule: when the issuer can call the bond
/// and at what price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEntry {
    /// Date on which the bond is callable.
    pub date: Date,
    /// Redemption price paid on call (absolute, same units as face value).
    pub price: Decimal,
}

impl CallEntry {
    /// Creates a new call entry.
    #[must_use]
    pub fn new(date: Date, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// An ordered schedule of call dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSchedule {
    entries: Vec<CallEntry>,
}

impl CallSchedule {
    /// Creates a call schedule from entries.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidOptionTerms` if the schedule is empty,
    /// dates are not strictly increasing, or a price is not positive.
    pub fn new(entries: Vec<CallEntry>) -> BondResult<Self> {
        validate_schedule(&entries.iter().map(|e| (e.date, e.price)).collect::<Vec<_>>())?;
        Ok(Self { entries })
    }

    /// Returns all entries in date order.
    #[must_use]
    pub fn entries(&self) -> &[CallEntry] {
        &self.entries
    }

    /// Returns the entries strictly after the given settlement date.
    #[must_use]
    pub fn future_entries(&self, settlement: Date) -> Vec<CallEntry> {
        self.entries
            .iter()
            .copied()
            .filter(|e| e.date > settlement)
            .collect()
    }
}

/// A single entry in a put schedule: when the holder can put the bond
/// back to the issuer and at what price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutEntry {
    /// Date on which the bond is putable.
    pub date: Date,
    /// Redemption price received on put.
    pub price: Decimal,
}

impl PutEntry {
    /// Creates a new put entry.
    #[must_use]
    pub fn new(date: Date, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// An ordered schedule of put dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutSchedule {
    entries: Vec<PutEntry>,
}

impl PutSchedule {
    /// Creates a put schedule from entries.
    ///
    /// # Errors
    ///
    /// Same validation as [`CallSchedule::new`].
    pub fn new(entries: Vec<PutEntry>) -> BondResult<Self> {
        validate_schedule(&entries.iter().map(|e| (e.date, e.price)).collect::<Vec<_>>())?;
        Ok(Self { entries })
    }

    /// Returns all entries in date order.
    #[must_use]
    pub fn entries(&self) -> &[PutEntry] {
        &self.entries
    }

    /// Returns the entries strictly after the given settlement date.
    #[must_use]
    pub fn future_entries(&self, settlement: Date) -> Vec<PutEntry> {
        self.entries
            .iter()
            .copied()
            .filter(|e| e.date > settlement)
            .collect()
    }
}

/// Conversion terms for a convertible bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTerms {
    /// Number of shares received per bond on conversion.
    pub ratio: Decimal,
    /// Effective price per share implied by conversion.
    pub conversion_price: Decimal,
}

impl ConversionTerms {
    /// Creates conversion terms.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidOptionTerms` if ratio or conversion
    /// price is not positive.
    pub fn new(ratio: Decimal, conversion_price: Decimal) -> BondResult<Self> {
        if ratio <= Decimal::ZERO {
            return Err(BondError::invalid_option_terms(format!(
                "conversion ratio must be positive: {ratio}"
            )));
        }
        if conversion_price <= Decimal::ZERO {
            return Err(BondError::invalid_option_terms(format!(
                "conversion price must be positive: {conversion_price}"
            )));
        }
        Ok(Self {
            ratio,
            conversion_price,
        })
    }
}

fn validate_schedule(entries: &[(Date, Decimal)]) -> BondResult<()> {
    if entries.is_empty() {
        return Err(BondError::invalid_option_terms(
            "schedule must contain at least one entry",
        ));
    }

    let mut previous: Option<Date> = None;
    for &(date, price) in entries {
        if price <= Decimal::ZERO {
            return Err(BondError::invalid_option_terms(format!(
                "exercise price must be positive: {price} on {date}"
            )));
        }
        if let Some(prev) = previous {
            if date <= prev {
                return Err(BondError::invalid_option_terms(format!(
                    "schedule dates must be strictly increasing: {prev} then {date}"
                )));
            }
        }
        previous = Some(date);
    }
    Ok(())
}
