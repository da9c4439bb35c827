//! Monetary amounts.

use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::value_object::ValueObject;

/// Amount of money in cents.
///
/// Signed on purpose: a non-positive amount is representable so that deposit
/// and withdrawal rules can reject it with `InvalidAmount`. Balances never go
/// below zero; accounts enforce that.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Money::units(500)` is 500.00.
    pub const fn units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Parses `123`, `123.4`, `123.45` and the comma form `123,45`.
impl FromStr for Money {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BankError::validation(format!("not a monetary amount: {s:?}"));

        let trimmed = s.trim();
        // Decimal::from_str also takes `_` separators; only digits, one sign
        // and one decimal mark are amounts here.
        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'.' | b','))
        {
            return Err(invalid());
        }

        let decimal = Decimal::from_str(&trimmed.replace(',', ".")).map_err(|_| invalid())?;
        if decimal.scale() > 2 {
            return Err(invalid());
        }

        decimal
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or_else(invalid)
    }
}
