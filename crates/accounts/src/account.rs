use serde::{Deserialize, Serialize};

use bankbranch_core::{AccountNumber, BankError, BankResult, BranchCode, Entity, Money, TaxId};

use crate::ledger::Ledger;

/// Withdrawal rules of a checking account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckingLimits {
    /// Largest amount a single withdrawal may take.
    pub withdrawal_ceiling: Money,
    /// Withdrawals the account may ever make.
    pub max_withdrawals: u32,
}

impl Default for CheckingLimits {
    fn default() -> Self {
        Self {
            withdrawal_ceiling: Money::units(500),
            max_withdrawals: 3,
        }
    }
}

/// Capability tag of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountKind {
    Standard,
    Checking(CheckingLimits),
}

/// Back-reference to the owning client. The account does not own the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolder {
    pub tax_id: TaxId,
    pub name: String,
}

/// A bank account: balance plus its exclusively owned ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    branch: BranchCode,
    holder: AccountHolder,
    kind: AccountKind,
    balance: Money,
    /// Successful withdrawals, whether or not the ledger kept an entry.
    withdrawals_made: u32,
    ledger: Ledger,
}

impl Account {
    /// Open an account with base rules only.
    pub fn open(number: AccountNumber, branch: BranchCode, holder: AccountHolder) -> Self {
        Self {
            number,
            branch,
            holder,
            kind: AccountKind::Standard,
            balance: Money::ZERO,
            withdrawals_made: 0,
            ledger: Ledger::new(),
        }
    }

    /// Open a checking account with the given withdrawal rules.
    pub fn open_checking(
        number: AccountNumber,
        branch: BranchCode,
        holder: AccountHolder,
        limits: CheckingLimits,
    ) -> Self {
        Self {
            kind: AccountKind::Checking(limits),
            ..Self::open(number, branch, holder)
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &BranchCode {
        &self.branch
    }

    pub fn holder(&self) -> &AccountHolder {
        &self.holder
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn withdrawals_made(&self) -> u32 {
        self.withdrawals_made
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn is_held_by(&self, tax_id: &TaxId) -> bool {
        &self.holder.tax_id == tax_id
    }

    /// Credit the balance. No ledger write happens here.
    pub fn deposit(&mut self, amount: Money) -> BankResult<()> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::InvalidAmount)?;
        Ok(())
    }

    /// Debit the balance after the rules of this account kind pass, and
    /// count it against the checking withdrawal cap.
    pub fn withdraw(&mut self, amount: Money) -> BankResult<()> {
        self.debit(amount)?;
        self.withdrawals_made = self.withdrawals_made.saturating_add(1);
        Ok(())
    }

    /// Same rules as [`Account::withdraw`] without counting a withdrawal.
    /// Used by the outgoing leg of a transfer.
    pub(crate) fn debit(&mut self, amount: Money) -> BankResult<()> {
        if let AccountKind::Checking(limits) = self.kind {
            self.check_checking_limits(limits, amount)?;
        }
        self.withdraw_base(amount)
    }

    // Count is checked before the ceiling; both block.
    fn check_checking_limits(&self, limits: CheckingLimits, amount: Money) -> BankResult<()> {
        if self.withdrawals_made >= limits.max_withdrawals {
            return Err(BankError::WithdrawalCountExceeded {
                limit: limits.max_withdrawals,
            });
        }
        if amount > limits.withdrawal_ceiling {
            return Err(BankError::WithdrawalLimitExceeded {
                requested: amount,
                limit: limits.withdrawal_ceiling,
            });
        }
        Ok(())
    }

    fn withdraw_base(&mut self, amount: Money) -> BankResult<()> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(BankError::insufficient_funds(amount, self.balance));
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::InvalidAmount)?;
        Ok(())
    }

    /// Put back an amount taken by a withdrawal whose follow-up failed.
    pub(crate) fn revert_withdrawal(&mut self, amount: Money) {
        self.balance = self.balance.checked_add(amount).unwrap_or(self.balance);
    }
}

impl Entity for Account {
    type Id = AccountNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}
