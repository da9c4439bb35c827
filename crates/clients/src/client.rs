use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use bankbranch_accounts::{
    Account, EntryKind, RecordOutcome, Transaction, Transfer, TransferReceipt,
};
use bankbranch_core::{AccountNumber, BankError, BankResult, Entity, TaxId};

use crate::activity::DailyActivity;

/// How many governed operations a client may run per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimits {
    /// Deposits, withdrawals and outgoing transfers on one account.
    pub transactions: u32,
    /// Outgoing transfers only.
    pub transfers: u32,
}

impl Default for DailyLimits {
    fn default() -> Self {
        Self {
            transactions: 10,
            transfers: 5,
        }
    }
}

/// Command: RegisterClient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterClient {
    pub name: String,
    /// Raw tax id as typed; validated on registration.
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub address: String,
}

/// A bank client (natural person).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    tax_id: TaxId,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<AccountNumber>,
    limits: DailyLimits,
    activity: DailyActivity,
}

impl Client {
    pub fn register(cmd: RegisterClient, limits: DailyLimits) -> BankResult<Self> {
        let tax_id = TaxId::parse(&cmd.tax_id)?;

        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(BankError::validation("name cannot be empty"));
        }

        Ok(Self {
            tax_id,
            name: name.to_string(),
            birth_date: cmd.birth_date,
            address: cmd.address.trim().to_string(),
            accounts: Vec::new(),
            limits,
            activity: DailyActivity::new(),
        })
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub fn limits(&self) -> DailyLimits {
        self.limits
    }

    pub fn activity(&self) -> &DailyActivity {
        &self.activity
    }

    /// The account list only ever grows.
    pub fn add_account(&mut self, number: AccountNumber) {
        if !self.accounts.contains(&number) {
            self.accounts.push(number);
        }
    }

    pub fn owns(&self, account: &Account) -> bool {
        account.is_held_by(&self.tax_id) && self.accounts.contains(&account.number())
    }

    /// Governor check for one more `kind` movement on `account` today.
    ///
    /// Account-level rules are not looked at here; the account enforces them
    /// when the movement is applied.
    pub fn check_daily_limits(
        &self,
        account: &Account,
        kind: EntryKind,
        today: NaiveDate,
    ) -> BankResult<()> {
        let tally = self.activity.tally(account.number(), today);

        if tally.transactions >= self.limits.transactions {
            tracing::debug!(
                tax_id = %self.tax_id,
                account = %account.number(),
                "daily transaction limit reached"
            );
            return Err(BankError::DailyLimitExceeded {
                limit: self.limits.transactions,
            });
        }

        if kind.is_transfer() && tally.transfers >= self.limits.transfers {
            tracing::debug!(
                tax_id = %self.tax_id,
                account = %account.number(),
                "daily transfer limit reached"
            );
            return Err(BankError::DailyTransferLimitExceeded {
                limit: self.limits.transfers,
            });
        }

        Ok(())
    }

    /// Run a deposit or withdrawal on one of this client's accounts.
    pub fn perform_transaction(
        &mut self,
        account: &mut Account,
        transaction: &Transaction,
        now: NaiveDateTime,
    ) -> BankResult<RecordOutcome> {
        self.ensure_owns(account)?;
        self.check_daily_limits(account, transaction.kind(), now.date())?;

        let outcome = transaction.register(account, now)?;
        self.activity.note(account.number(), now.date(), false);
        Ok(outcome)
    }

    /// Transfer out of one of this client's accounts.
    ///
    /// Governed like any transaction on the source account, plus the daily
    /// transfer cap. The destination side is not governed.
    pub fn perform_transfer(
        &mut self,
        source: &mut Account,
        destination: &mut Account,
        transfer: &Transfer,
        now: NaiveDateTime,
    ) -> BankResult<TransferReceipt> {
        if source.number() == destination.number() {
            return Err(BankError::SameAccountTransfer);
        }
        self.ensure_owns(source)?;
        self.check_daily_limits(source, EntryKind::TransferOut, now.date())?;

        let receipt = transfer.execute(source, destination, now)?;
        self.activity.note(source.number(), now.date(), true);
        Ok(receipt)
    }

    fn ensure_owns(&self, account: &Account) -> BankResult<()> {
        if !self.owns(account) {
            return Err(BankError::AccountNotFound(account.number().get()));
        }
        Ok(())
    }
}

impl Entity for Client {
    type Id = TaxId;

    fn id(&self) -> &Self::Id {
        &self.tax_id
    }
}
