//! Account-to-account transfer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use bankbranch_core::{AccountNumber, BankError, BankResult, Money};

use crate::account::Account;
use crate::ledger::{EntryKind, RecordOutcome};

/// Result of a completed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub from: AccountNumber,
    pub to: AccountNumber,
    pub amount: Money,
    pub from_balance: Money,
    pub to_balance: Money,
    pub from_entry: RecordOutcome,
    pub to_entry: RecordOutcome,
}

/// Withdrawal on one account followed by a deposit on another, as one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub amount: Money,
}

impl Transfer {
    pub fn new(amount: Money) -> Self {
        Self { amount }
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// The debit goes through `from`'s withdrawal rules (ceiling and count
    /// included) but does not use up a withdrawal. Nothing is written unless
    /// both legs succeed.
    pub fn execute(
        &self,
        from: &mut Account,
        to: &mut Account,
        at: NaiveDateTime,
    ) -> BankResult<TransferReceipt> {
        if from.number() == to.number() {
            return Err(BankError::SameAccountTransfer);
        }

        from.debit(self.amount)?;
        if let Err(err) = to.deposit(self.amount) {
            from.revert_withdrawal(self.amount);
            tracing::warn!(
                from = %from.number(),
                to = %to.number(),
                error = %err,
                "transfer deposit failed; withdrawal reverted"
            );
            return Err(err);
        }

        let from_entry = from
            .ledger_mut()
            .record(EntryKind::TransferOut, self.amount, at)?;
        let to_entry = to
            .ledger_mut()
            .record(EntryKind::TransferIn, self.amount, at)?;

        Ok(TransferReceipt {
            from: from.number(),
            to: to.number(),
            amount: self.amount,
            from_balance: from.balance(),
            to_balance: to.balance(),
            from_entry,
            to_entry,
        })
    }
}
