//! Accounts module (balances, ledgers, transactions, transfers).
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod account;
pub mod cursor;
pub mod ledger;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountHolder, AccountKind, CheckingLimits};
pub use cursor::{AccountCursor, AccountSnapshot, CursorStep};
pub use ledger::{EntryKind, Ledger, LedgerEntry, RecordOutcome, Report};
pub use transaction::Transaction;
pub use transfer::{Transfer, TransferReceipt};
