//! Deposit and withdrawal transactions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use bankbranch_core::{BankResult, Money, ValueObject};

use crate::account::Account;
use crate::ledger::{EntryKind, RecordOutcome};

/// One monetary movement against a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum Transaction {
    Deposit(Money),
    Withdrawal(Money),
}

impl ValueObject for Transaction {}

impl Transaction {
    pub fn amount(&self) -> Money {
        match *self {
            Transaction::Deposit(amount) | Transaction::Withdrawal(amount) => amount,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Transaction::Deposit(_) => EntryKind::Deposit,
            Transaction::Withdrawal(_) => EntryKind::Withdrawal,
        }
    }

    /// Apply the movement to `account` and, only if it succeeds, record it in
    /// the account's ledger.
    pub fn register(
        &self,
        account: &mut Account,
        at: NaiveDateTime,
    ) -> BankResult<RecordOutcome> {
        let amount = self.amount();
        match self {
            Transaction::Deposit(_) => account.deposit(amount)?,
            Transaction::Withdrawal(_) => account.withdraw(amount)?,
        }
        account.ledger_mut().record(self.kind(), amount, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountHolder, CheckingLimits};
    use bankbranch_core::{AccountNumber, BankError, BranchCode, TaxId};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn account() -> Account {
        Account::open_checking(
            AccountNumber::FIRST,
            BranchCode::default(),
            AccountHolder {
                tax_id: TaxId::parse("11122233344").unwrap(),
                name: "Bruno".to_string(),
            },
            CheckingLimits::default(),
        )
    }

    #[test]
    fn deposit_registers_balance_and_entry() {
        let mut account = account();
        let outcome = Transaction::Deposit(Money::units(100))
            .register(&mut account, now())
            .unwrap();

        assert!(outcome.is_recorded());
        assert_eq!(account.balance(), Money::units(100));
        let entry = account.ledger().last().unwrap();
        assert_eq!(entry.kind, EntryKind::Deposit);
        assert_eq!(entry.amount, Money::units(100));
        assert_eq!(entry.timestamp, now());
    }

    #[test]
    fn failed_withdrawal_leaves_ledger_untouched() {
        let mut account = account();
        Transaction::Deposit(Money::units(50))
            .register(&mut account, now())
            .unwrap();

        let err = Transaction::Withdrawal(Money::units(80))
            .register(&mut account, now())
            .unwrap_err();

        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(account.ledger().len(), 1);
        assert_eq!(account.balance(), Money::units(50));
    }

    #[test]
    fn repeated_deposit_moves_money_but_suppresses_the_entry() {
        let mut account = account();
        let tx = Transaction::Deposit(Money::units(100));
        tx.register(&mut account, now()).unwrap();
        let second = tx.register(&mut account, now()).unwrap();

        assert_eq!(second, RecordOutcome::DuplicateSuppressed);
        assert_eq!(account.balance(), Money::units(200));
        assert_eq!(account.ledger().len(), 1);
    }

    #[test]
    fn repeated_withdrawals_count_towards_the_cap_even_when_suppressed() {
        let mut account = account();
        Transaction::Deposit(Money::units(400))
            .register(&mut account, now())
            .unwrap();

        let tx = Transaction::Withdrawal(Money::units(10));
        for _ in 0..3 {
            tx.register(&mut account, now()).unwrap();
        }
        let err = tx.register(&mut account, now()).unwrap_err();

        assert_eq!(err, BankError::WithdrawalCountExceeded { limit: 3 });
        assert_eq!(account.balance(), Money::units(370));
        assert_eq!(account.withdrawals_made(), 3);
        assert_eq!(account.ledger().len(), 2);
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Transaction::Withdrawal(Money::from_cents(1_250))).unwrap();
        assert_eq!(json, serde_json::json!({"type": "withdrawal", "amount": 1250}));
    }
}
