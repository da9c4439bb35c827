//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BankError;

/// Client tax id: exactly 11 ASCII digits, immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    pub const LEN: usize = 11;

    pub fn parse(raw: &str) -> Result<Self, BankError> {
        let raw = raw.trim();
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(BankError::InvalidTaxId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaxId {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = BankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.0
    }
}

impl core::fmt::Display for TaxId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequential account number, unique within the branch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(u64);

impl AccountNumber {
    pub const FIRST: AccountNumber = AccountNumber(1);

    pub const fn new(number: u64) -> Self {
        Self(number)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AccountNumber {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| BankError::validation(format!("account number {s:?}: {e}")))
    }
}

/// Branch code shared by every account of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchCode(String);

impl BranchCode {
    pub fn new(code: impl Into<String>) -> Result<Self, BankError> {
        let code = code.into();
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BankError::validation(format!(
                "branch code must be numeric: {code:?}"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BranchCode {
    fn default() -> Self {
        Self("0001".to_string())
    }
}

impl core::fmt::Display for BranchCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a single ledger entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EntryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_id_requires_eleven_digits() {
        assert!(TaxId::parse("12345678901").is_ok());
        assert_eq!(
            TaxId::parse(" 12345678901 ").unwrap().as_str(),
            "12345678901"
        );

        for bad in ["", "1234567890", "123456789012", "123.456.789-0", "1234567890a"] {
            assert_eq!(
                TaxId::parse(bad),
                Err(BankError::InvalidTaxId(bad.trim().to_string()))
            );
        }
    }

    #[test]
    fn tax_id_deserialization_is_validated() {
        let ok: TaxId = serde_json::from_str("\"98765432100\"").unwrap();
        assert_eq!(ok.to_string(), "98765432100");
        assert!(serde_json::from_str::<TaxId>("\"987\"").is_err());
    }

    #[test]
    fn account_numbers_are_sequential() {
        assert_eq!(AccountNumber::FIRST.next(), AccountNumber::new(2));
        assert_eq!("7".parse::<AccountNumber>().unwrap(), AccountNumber::new(7));
        assert!("x".parse::<AccountNumber>().is_err());
    }

    #[test]
    fn branch_code_defaults_to_0001() {
        assert_eq!(BranchCode::default().as_str(), "0001");
        assert!(BranchCode::new("12a").is_err());
    }
}
