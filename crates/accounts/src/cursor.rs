//! Sequential, restartable traversal of an account collection.

use serde::{Deserialize, Serialize};

use bankbranch_core::{AccountNumber, BranchCode, Money};

use crate::account::Account;

/// Point-in-time view of one account, as listed by the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub branch: BranchCode,
    pub number: AccountNumber,
    pub holder_name: String,
    pub balance: Money,
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        Self {
            branch: account.branch().clone(),
            number: account.number(),
            holder_name: account.holder().name.clone(),
            balance: account.balance(),
        }
    }
}

impl core::fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Branch:\t{}", self.branch)?;
        writeln!(f, "Number:\t{}", self.number)?;
        writeln!(f, "Holder:\t{}", self.holder_name)?;
        writeln!(f, "Balance:\tR$ {}", self.balance)
    }
}

/// One step of the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorStep {
    Account(AccountSnapshot),
    /// End of the sequence. Terminal until [`AccountCursor::restart`].
    Exhausted,
}

/// One-shot forward cursor over a fixed slice of accounts.
#[derive(Debug, Clone)]
pub struct AccountCursor<'a> {
    accounts: &'a [Account],
    position: usize,
    exhausted: bool,
}

impl<'a> AccountCursor<'a> {
    pub fn new(accounts: &'a [Account]) -> Self {
        Self {
            accounts,
            position: 0,
            exhausted: false,
        }
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted && self.position < self.accounts.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Snapshot of the current account, then advance.
    pub fn step(&mut self) -> CursorStep {
        if self.exhausted {
            return CursorStep::Exhausted;
        }
        match self.accounts.get(self.position) {
            Some(account) => {
                self.position += 1;
                CursorStep::Account(AccountSnapshot::from(account))
            }
            None => {
                self.exhausted = true;
                CursorStep::Exhausted
            }
        }
    }

    /// Back to the first account of the same collection.
    pub fn restart(&mut self) {
        self.position = 0;
        self.exhausted = false;
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Iterator for AccountCursor<'_> {
    type Item = AccountSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            CursorStep::Account(snapshot) => Some(snapshot),
            CursorStep::Exhausted => None,
        }
    }
}
