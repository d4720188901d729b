//! Money type with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A monetary amount in the user's currency.
///
/// Serialized as a decimal string (`"1000.50"`), which is what the backend
/// expects for every amount field. Deserialization accepts strings and
/// JSON numbers.
///
/// `+` and `-` saturate at the `Decimal` bounds. Use [`Money::checked_add`]
/// and [`Money::checked_sub`] where an overflow has to be noticed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

/// Errors produced when parsing user-entered amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Nothing was entered.
    #[error("Amount is empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("Invalid amount: {0}")]
    Invalid(String),
    /// The input is below zero where only non-negative amounts are accepted.
    #[error("Amount cannot be negative")]
    Negative,
}

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts `rhs`, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Percentage that `self` represents of `total`, rounded to 2 decimal places.
    ///
    /// Returns zero when `total` is zero or negative, and `None` when the
    /// ratio does not fit in a `Decimal`.
    #[must_use]
    pub fn percent_of(&self, total: Self) -> Option<Decimal> {
        if total.0 <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }
        self.0
            .checked_div(total.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|percent| percent.round_dp(2))
    }

    /// Parses an amount typed by a user, rejecting negative values.
    ///
    /// Accepts an optional leading `$` and `,` thousands separators.
    pub fn parse_non_negative(input: &str) -> Result<Self, MoneyParseError> {
        let money: Self = input.parse()?;
        if money.is_negative() {
            return Err(MoneyParseError::Negative);
        }
        Ok(money)
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let cleaned: String = trimmed
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        Decimal::from_str_exact(&cleaned)
            .map(Self)
            .map_err(|_| MoneyParseError::Invalid(trimmed.to_string()))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        write!(f, "{rounded}")
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
