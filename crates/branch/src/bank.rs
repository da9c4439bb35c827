//! The branch registry: owner of every client and account of a run.
//!
//! Constructed once at startup and passed to whoever drives it. Each public
//! operation is wrapped with [`logged`] and either completes or fails without
//! committing partial state.

use serde::{Deserialize, Serialize};

use bankbranch_accounts::{
    Account, AccountCursor, AccountHolder, CheckingLimits, EntryKind, LedgerEntry, RecordOutcome,
    Transaction, Transfer, TransferReceipt,
};
use bankbranch_clients::{Client, RegisterClient};
use bankbranch_core::{
    AccountNumber, BankError, BankResult, Clock, Entity, Money, SystemClock, TaxId,
};
use bankbranch_observability::logged;

use crate::config::BranchConfig;

/// Result of a governed deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub account: AccountNumber,
    pub kind: EntryKind,
    pub amount: Money,
    pub balance: Money,
    pub outcome: RecordOutcome,
}

/// Everything needed to move money between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_client: TaxId,
    pub from_account: AccountNumber,
    pub to_client: TaxId,
    pub to_account: AccountNumber,
    pub amount: Money,
}

/// Ledger entries of one account plus its current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub account: AccountNumber,
    pub holder_name: String,
    pub entries: Vec<LedgerEntry>,
    pub balance: Money,
}

impl core::fmt::Display for Statement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.entries.is_empty() {
            writeln!(f, "No movements were made.")?;
        }
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        write!(f, "\nBalance:\n\tR$ {}", self.balance)
    }
}

pub struct Bank<C: Clock = SystemClock> {
    config: BranchConfig,
    clock: C,
    clients: Vec<Client>,
    accounts: Vec<Account>,
}

impl Bank<SystemClock> {
    pub fn new(config: BranchConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Bank<C> {
    pub fn with_clock(config: BranchConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            clients: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn config(&self) -> &BranchConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn client(&self, tax_id: &TaxId) -> BankResult<&Client> {
        find_client(&self.clients, tax_id)
    }

    pub fn account(&self, number: AccountNumber) -> BankResult<&Account> {
        self.accounts
            .iter()
            .find(|a| a.has_id(&number))
            .ok_or(BankError::AccountNotFound(number.get()))
    }

    /// Accounts held by `tax_id`, in opening order.
    pub fn client_accounts(&self, tax_id: &TaxId) -> BankResult<Vec<&Account>> {
        let client = self.client(tax_id)?;
        Ok(self.accounts.iter().filter(|a| client.owns(a)).collect())
    }

    pub fn register_client(&mut self, cmd: RegisterClient) -> BankResult<&Client> {
        let index = logged("register_client", || {
            let client = Client::register(cmd, self.config.daily_limits())?;
            if find_client(&self.clients, client.tax_id()).is_ok() {
                return Err(BankError::DuplicateTaxId(client.tax_id().to_string()));
            }
            tracing::info!(tax_id = %client.tax_id(), "client registered");
            self.clients.push(client);
            Ok(self.clients.len() - 1)
        })?;
        Ok(&self.clients[index])
    }

    /// Open a checking account for an existing client.
    ///
    /// Numbers are sequential across the branch. `limits` defaults to the
    /// configured ceiling and withdrawal cap.
    pub fn open_checking_account(
        &mut self,
        tax_id: &TaxId,
        limits: Option<CheckingLimits>,
    ) -> BankResult<AccountNumber> {
        logged("open_checking_account", || {
            let limits = limits.unwrap_or_else(|| self.config.checking_limits());
            let number = self
                .accounts
                .last()
                .map_or(AccountNumber::FIRST, |a| a.number().next());

            let client = find_client_mut(&mut self.clients, tax_id)?;
            let holder = AccountHolder {
                tax_id: client.tax_id().clone(),
                name: client.name().to_string(),
            };
            client.add_account(number);
            self.accounts.push(Account::open_checking(
                number,
                self.config.branch_code.clone(),
                holder,
                limits,
            ));

            tracing::info!(%tax_id, account = %number, "checking account opened");
            Ok(number)
        })
    }

    pub fn deposit(
        &mut self,
        tax_id: &TaxId,
        account: AccountNumber,
        amount: Money,
    ) -> BankResult<TransactionReceipt> {
        logged("deposit", || {
            self.run_transaction(tax_id, account, Transaction::Deposit(amount))
        })
    }

    pub fn withdraw(
        &mut self,
        tax_id: &TaxId,
        account: AccountNumber,
        amount: Money,
    ) -> BankResult<TransactionReceipt> {
        logged("withdraw", || {
            self.run_transaction(tax_id, account, Transaction::Withdrawal(amount))
        })
    }

    /// Move money between two accounts, governed by the source client.
    pub fn transfer(&mut self, request: &TransferRequest) -> BankResult<TransferReceipt> {
        logged("transfer", || {
            let from_client = find_client(&self.clients, &request.from_client)?;
            let from = owned_account_index(&self.accounts, from_client, request.from_account)?;
            let to_client = find_client(&self.clients, &request.to_client)?;
            let to = owned_account_index(&self.accounts, to_client, request.to_account)?;

            if from == to {
                return Err(BankError::SameAccountTransfer);
            }

            let now = self.clock.now();
            let from_client = find_client_mut(&mut self.clients, &request.from_client)?;
            let (source, destination) = pair_mut(&mut self.accounts, from, to);
            let transfer = Transfer::new(request.amount);
            from_client.perform_transfer(source, destination, &transfer, now)
        })
    }

    /// Entries of the account, optionally filtered by kind label, and its balance.
    pub fn statement(
        &self,
        tax_id: &TaxId,
        account: AccountNumber,
        kind_filter: Option<&str>,
    ) -> BankResult<Statement> {
        logged("statement", || {
            let client = find_client(&self.clients, tax_id)?;
            let account = &self.accounts[owned_account_index(&self.accounts, client, account)?];
            Ok(Statement {
                account: account.number(),
                holder_name: account.holder().name.clone(),
                entries: account.ledger().report(kind_filter).iter().cloned().collect(),
                balance: account.balance(),
            })
        })
    }

    /// Cursor over every account of the branch, in opening order.
    pub fn list_accounts(&self) -> AccountCursor<'_> {
        tracing::debug!(accounts = self.accounts.len(), "listing accounts");
        AccountCursor::new(&self.accounts)
    }

    fn run_transaction(
        &mut self,
        tax_id: &TaxId,
        account: AccountNumber,
        transaction: Transaction,
    ) -> BankResult<TransactionReceipt> {
        let client = find_client_mut(&mut self.clients, tax_id)?;
        let index = owned_account_index(&self.accounts, client, account)?;
        let account = &mut self.accounts[index];

        let outcome = client.perform_transaction(account, &transaction, self.clock.now())?;
        match outcome {
            RecordOutcome::Recorded(entry) => {
                tracing::debug!(account = %account.number(), %entry, "entry recorded");
            }
            RecordOutcome::DuplicateSuppressed => {
                tracing::info!(account = %account.number(), "duplicate entry not recorded");
            }
        }

        Ok(TransactionReceipt {
            account: account.number(),
            kind: transaction.kind(),
            amount: transaction.amount(),
            balance: account.balance(),
            outcome,
        })
    }
}

fn find_client<'a>(clients: &'a [Client], tax_id: &TaxId) -> BankResult<&'a Client> {
    clients
        .iter()
        .find(|c| c.has_id(tax_id))
        .ok_or_else(|| BankError::client_not_found(tax_id))
}

fn find_client_mut<'a>(clients: &'a mut [Client], tax_id: &TaxId) -> BankResult<&'a mut Client> {
    clients
        .iter_mut()
        .find(|c| c.has_id(tax_id))
        .ok_or_else(|| BankError::client_not_found(tax_id))
}

fn owned_account_index(
    accounts: &[Account],
    client: &Client,
    number: AccountNumber,
) -> BankResult<usize> {
    if client.accounts().is_empty() {
        return Err(BankError::NoAccount(client.tax_id().to_string()));
    }
    accounts
        .iter()
        .position(|a| a.has_id(&number) && client.owns(a))
        .ok_or(BankError::AccountNotFound(number.get()))
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
