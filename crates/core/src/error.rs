//! Domain error model.

use thiserror::Error;

use crate::money::Money;

/// Result type used across the domain layer.
pub type BankResult<T> = Result<T, BankError>;

/// Domain-level error.
///
/// Every variant is a recoverable, locally reported condition. Account-level
/// failures are raised by accounts, governor failures by clients, lookup
/// failures by the branch registry; callers render them and carry on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Amount was zero, negative, or would overflow the balance.
    #[error("the amount informed is invalid")]
    InvalidAmount,

    #[error("insufficient funds (requested {requested}, available {available})")]
    InsufficientFunds { requested: Money, available: Money },

    /// Checking account per-withdrawal ceiling.
    #[error("withdrawal of {requested} exceeds the limit of {limit}")]
    WithdrawalLimitExceeded { requested: Money, limit: Money },

    /// Checking account lifetime withdrawal cap.
    #[error("maximum number of withdrawals ({limit}) exceeded")]
    WithdrawalCountExceeded { limit: u32 },

    #[error("daily transaction limit ({limit}) exceeded")]
    DailyLimitExceeded { limit: u32 },

    #[error("daily transfer limit ({limit}) exceeded")]
    DailyTransferLimitExceeded { limit: u32 },

    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("account not found: {0}")]
    AccountNotFound(u64),

    /// The client exists but holds no account yet.
    #[error("client {0} has no account")]
    NoAccount(String),

    #[error("a client with tax id {0} already exists")]
    DuplicateTaxId(String),

    #[error("invalid tax id: {0:?}")]
    InvalidTaxId(String),

    #[error("source and destination accounts are the same")]
    SameAccountTransfer,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl BankError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn client_not_found(tax_id: impl core::fmt::Display) -> Self {
        Self::ClientNotFound(tax_id.to_string())
    }

    pub fn insufficient_funds(requested: Money, available: Money) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    /// Whether the failure came from a rate limit rather than from the request itself.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            Self::WithdrawalLimitExceeded { .. }
                | Self::WithdrawalCountExceeded { .. }
                | Self::DailyLimitExceeded { .. }
                | Self::DailyTransferLimitExceeded { .. }
        )
    }
}
