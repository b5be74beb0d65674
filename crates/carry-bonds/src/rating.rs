//! Credit rating scale with notch arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized credit rating (agency-agnostic, S&P-style notation).
///
/// Ordered from highest quality (AAA) to lowest (D). Each step between
/// adjacent variants is one notch, which matrix pricing converts into a
/// yield adjustment.
///
/// # Examples
///
/// ```
/// use carry_bonds::rating::CreditRating;
///
/// assert!(CreditRating::AA.is_investment_grade());
/// assert_eq!(CreditRating::BBB.notches_from(CreditRating::A), 3);
/// assert_eq!(CreditRating::A.notches_from(CreditRating::BBB), -3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditRating {
    /// Highest quality
    AAA = 1,
    /// AA+
    AAPlus = 2,
    /// AA
    AA = 3,
    /// AA-
    AAMinus = 4,
    /// A+
    APlus = 5,
    /// A
    A = 6,
    /// A-
    AMinus = 7,
    /// BBB+
    BBBPlus = 8,
    /// BBB
    BBB = 9,
    /// BBB- (lowest investment grade)
    BBBMinus = 10,
    /// BB+ (highest high yield)
    BBPlus = 11,
    /// BB
    BB = 12,
    /// BB-
    BBMinus = 13,
    /// B+
    BPlus = 14,
    /// B
    B = 15,
    /// B-
    BMinus = 16,
    /// CCC
    CCC = 17,
    /// CC
    CC = 18,
    /// C
    C = 19,
    /// Default
    D = 20,
}

impl CreditRating {
    /// Returns the numeric score (1 = AAA, 20 = D).
    #[must_use]
    pub fn score(&self) -> i32 {
        *self as i32
    }

    /// Returns the signed notch distance from `other` to `self`.
    ///
    /// Positive when `self` is lower quality than `other`.
    #[must_use]
    pub fn notches_from(&self, other: CreditRating) -> i32 {
        self.score() - other.score()
    }

    /// Returns true if this is investment grade (BBB- or better).
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        *self <= CreditRating::BBBMinus
    }

    /// Returns the S&P-style notation.
    #[must_use]
    pub fn notation(&self) -> &'static str {
        match self {
            Self::AAA => "AAA",
            Self::AAPlus => "AA+",
            Self::AA => "AA",
            Self::AAMinus => "AA-",
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BBBPlus => "BBB+",
            Self::BBB => "BBB",
            Self::BBBMinus => "BBB-",
            Self::BBPlus => "BB+",
            Self::BB => "BB",
            Self::BBMinus => "BB-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CCC => "CCC",
            Self::CC => "CC",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
