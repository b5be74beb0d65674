//! Cash flow type for bond valuation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::Principal => "Principal",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A dated cash flow.
///
/// Cash flows are derived values: they are regenerated on demand from a
/// bond description and never stored on the instrument itself.
///
/// # Example
///
/// ```rust
/// use carry_core::types::{CashFlow, CashFlowType, Date};
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::coupon(Date::from_ymd(2025, 6, 15).unwrap(), dec!(25));
/// assert_eq!(cf.amount(), dec!(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date
    date: Date,
    /// Cash flow amount
    amount: Decimal,
    /// Type of cash flow
    cf_type: CashFlowType,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: Decimal, cf_type: CashFlowType) -> Self {
        Self {
            date,
            amount,
            cf_type,
        }
    }

    /// Creates a coupon cash flow.
    #[must_use]
    pub fn coupon(date: Date, amount: Decimal) -> Self {
        Self::new(date, amount, CashFlowType::Coupon)
    }

    /// Creates a principal repayment cash flow.
    #[must_use]
    pub fn principal(date: Date, amount: Decimal) -> Self {
        Self::new(date, amount, CashFlowType::Principal)
    }

    /// Creates the final coupon-plus-principal cash flow.
    #[must_use]
    pub fn redemption(date: Date, amount: Decimal) -> Self {
        Self::new(date, amount, CashFlowType::CouponAndPrincipal)
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the cash flow amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the cash flow type.
    #[must_use]
    pub fn cf_type(&self) -> CashFlowType {
        self.cf_type
    }

    /// Returns true if this cash flow includes a principal repayment.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        matches!(
            self.cf_type,
            CashFlowType::Principal | CashFlowType::CouponAndPrincipal
        )
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.date, self.amount, self.cf_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_constructors() {
        let coupon = CashFlow::coupon(date(2025, 6, 15), dec!(25));
        assert_eq!(coupon.cf_type(), CashFlowType::Coupon);
        assert!(!coupon.is_principal());

        let redemption = CashFlow::redemption(date(2030, 6, 15), dec!(1025));
        assert_eq!(redemption.cf_type(), CashFlowType::CouponAndPrincipal);
        assert!(redemption.is_principal());
    }

    #[test]
    fn test_serde_decimal_amount() {
        let cf = CashFlow::coupon(date(2025, 6, 15), dec!(25.50));
        let json = serde_json::to_string(&cf).unwrap();
        let back: CashFlow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount(), dec!(25.50));
    }
}
