//! Per-day tally of governed operations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bankbranch_core::AccountNumber;

/// Governed operations on one account during one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTally {
    /// Deposits, withdrawals and outgoing transfers.
    pub transactions: u32,
    pub transfers: u32,
}

/// What a client has done today, per account.
///
/// Counts successful operations, not ledger entries: a movement whose entry
/// was suppressed as a duplicate still counts. Incoming transfers are never
/// noted. The tally resets the first time a later day is seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    day: Option<NaiveDate>,
    tallies: BTreeMap<AccountNumber, DailyTally>,
}

impl DailyActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(&self, account: AccountNumber, today: NaiveDate) -> DailyTally {
        if self.day != Some(today) {
            return DailyTally::default();
        }
        self.tallies.get(&account).copied().unwrap_or_default()
    }

    pub fn note(&mut self, account: AccountNumber, today: NaiveDate, transfer: bool) {
        if self.day != Some(today) {
            self.day = Some(today);
            self.tallies.clear();
        }

        let tally = self.tallies.entry(account).or_default();
        tally.transactions = tally.transactions.saturating_add(1);
        if transfer {
            tally.transfers = tally.transfers.saturating_add(1);
        }
    }
}
