use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use bankbranch_core::{BankError, BankResult, EntryId, Money, ValueObject};

/// Kind of a ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Deposit,
    Withdrawal,
    /// Outgoing leg of a transfer.
    TransferOut,
    /// Incoming leg of a transfer.
    TransferIn,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Deposit,
        EntryKind::Withdrawal,
        EntryKind::TransferOut,
        EntryKind::TransferIn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Deposit => "Deposit",
            EntryKind::Withdrawal => "Withdrawal",
            EntryKind::TransferOut => "Transfer Out",
            EntryKind::TransferIn => "Transfer In",
        }
    }

    pub fn is_transfer(self) -> bool {
        matches!(self, EntryKind::TransferOut | EntryKind::TransferIn)
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<EntryKind> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl core::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One record of the ledger (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    /// Always positive.
    pub amount: Money,
    pub timestamp: NaiveDateTime,
}

impl ValueObject for LedgerEntry {}

impl LedgerEntry {
    fn same_movement(&self, kind: EntryKind, amount: Money) -> bool {
        self.kind == kind && self.amount == amount
    }
}

impl core::fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} - R$ {} at {}",
            self.kind,
            self.amount,
            self.timestamp.format("%d-%m-%Y %H:%M:%S")
        )
    }
}

/// Outcome of [`Ledger::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "entry_id", rename_all = "snake_case")]
pub enum RecordOutcome {
    Recorded(EntryId),
    /// Same kind and amount as the immediately preceding entry; nothing appended.
    DuplicateSuppressed,
}

impl RecordOutcome {
    pub fn is_recorded(self) -> bool {
        matches!(self, RecordOutcome::Recorded(_))
    }
}

/// Append-only transaction history of one account.
///
/// The only refusal rule besides amount validation is duplicate suppression:
/// a record equal in kind and amount to the immediately preceding one is not
/// appended. Non-adjacent repeats are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: EntryKind,
        amount: Money,
        at: NaiveDateTime,
    ) -> BankResult<RecordOutcome> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount);
        }

        if self
            .entries
            .last()
            .is_some_and(|last| last.same_movement(kind, amount))
        {
            tracing::debug!(%kind, %amount, "duplicate ledger entry suppressed");
            return Ok(RecordOutcome::DuplicateSuppressed);
        }

        let id = EntryId::new();
        self.entries.push(LedgerEntry {
            id,
            kind,
            amount,
            timestamp: at,
        });
        Ok(RecordOutcome::Recorded(id))
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose timestamp falls on `today` (calendar date, any time of day).
    pub fn entries_today(&self, today: NaiveDate) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.timestamp.date() == today)
            .collect()
    }

    /// Snapshot of the history, optionally restricted to one kind label
    /// (case-insensitive). An unknown label matches nothing.
    pub fn report(&self, kind_filter: Option<&str>) -> Report {
        let filter = match kind_filter {
            None => ReportFilter::All,
            Some(label) => match EntryKind::from_label(label) {
                Some(kind) => ReportFilter::Kind(kind),
                None => ReportFilter::Nothing,
            },
        };
        Report {
            entries: self.entries.clone(),
            filter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFilter {
    All,
    Kind(EntryKind),
    Nothing,
}

impl ReportFilter {
    fn accepts(self, entry: &LedgerEntry) -> bool {
        match self {
            ReportFilter::All => true,
            ReportFilter::Kind(kind) => entry.kind == kind,
            ReportFilter::Nothing => false,
        }
    }
}

/// Restartable, lazily filtered view over a ledger snapshot.
///
/// Each call to [`Report::iter`] starts from the first entry again; later
/// ledger writes are not visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    entries: Vec<LedgerEntry>,
    filter: ReportFilter,
}

impl Report {
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> + '_ {
        let filter = self.filter;
        self.entries.iter().filter(move |e| filter.accepts(e))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a LedgerEntry;
    type IntoIter = Box<dyn Iterator<Item = &'a LedgerEntry> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn consecutive_duplicate_is_suppressed() {
        let mut ledger = Ledger::new();

        let first = ledger
            .record(EntryKind::Deposit, Money::units(100), at(1, 9))
            .unwrap();
        let second = ledger
            .record(EntryKind::Deposit, Money::units(100), at(1, 10))
            .unwrap();

        assert_eq!(first, RecordOutcome::Recorded(ledger.entries()[0].id));
        assert_eq!(second, RecordOutcome::DuplicateSuppressed);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn non_adjacent_duplicates_are_kept() {
        let mut ledger = Ledger::new();
        ledger.record(EntryKind::Deposit, Money::units(100), at(1, 9)).unwrap();
        ledger.record(EntryKind::Withdrawal, Money::units(100), at(1, 9)).unwrap();
        ledger.record(EntryKind::Deposit, Money::units(100), at(1, 9)).unwrap();

        let kinds: Vec<_> = ledger.entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Deposit, EntryKind::Withdrawal, EntryKind::Deposit]
        );
    }

    #[test]
    fn same_kind_different_amount_is_not_a_duplicate() {
        let mut ledger = Ledger::new();
        ledger.record(EntryKind::Deposit, Money::units(100), at(1, 9)).unwrap();
        ledger.record(EntryKind::Deposit, Money::units(101), at(1, 9)).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn non_positive_amount_is_refused() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.record(EntryKind::Deposit, Money::ZERO, at(1, 9)),
            Err(BankError::InvalidAmount)
        );
        assert_eq!(
            ledger.record(EntryKind::Withdrawal, Money::units(-1), at(1, 9)),
            Err(BankError::InvalidAmount)
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn entries_today_compares_calendar_dates() {
        let mut ledger = Ledger::new();
        let late = at(1, 23) + TimeDelta::minutes(59);
        ledger.record(EntryKind::Deposit, Money::units(1), late).unwrap();
        ledger.record(EntryKind::Deposit, Money::units(2), at(2, 0)).unwrap();
        ledger.record(EntryKind::Deposit, Money::units(3), at(2, 18)).unwrap();

        assert_eq!(ledger.entries_today(late.date()).len(), 1);
        assert_eq!(ledger.entries_today(at(2, 12).date()).len(), 2);
        assert!(ledger.entries_today(at(3, 0).date()).is_empty());
    }

    #[test]
    fn report_filters_case_insensitively() {
        let mut ledger = Ledger::new();
        ledger.record(EntryKind::Deposit, Money::units(10), at(1, 9)).unwrap();
        ledger.record(EntryKind::Withdrawal, Money::units(5), at(1, 9)).unwrap();
        ledger.record(EntryKind::Deposit, Money::units(7), at(1, 9)).unwrap();

        let deposits = ledger.report(Some("dEpOsIt"));
        assert_eq!(deposits.iter().count(), 2);
        assert!(deposits.iter().all(|e| e.kind == EntryKind::Deposit));

        assert_eq!(ledger.report(None).iter().count(), 3);
        assert_eq!(ledger.report(Some("transfer out")).iter().count(), 0);
        assert!(ledger.report(Some("refund")).is_empty());
    }

    #[test]
    fn report_is_a_restartable_snapshot() {
        let mut ledger = Ledger::new();
        ledger.record(EntryKind::Deposit, Money::units(10), at(1, 9)).unwrap();

        let report = ledger.report(None);
        ledger.record(EntryKind::Withdrawal, Money::units(4), at(1, 10)).unwrap();

        let first: Vec<_> = report.iter().map(|e| e.amount).collect();
        let second: Vec<_> = (&report).into_iter().map(|e| e.amount).collect();
        assert_eq!(first, vec![Money::units(10)]);
        assert_eq!(first, second);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: no two adjacent entries share kind and amount, and every
        /// amount is positive, whatever sequence is recorded.
        #[test]
        fn no_adjacent_duplicates(
            ops in prop::collection::vec((0usize..4, -3i64..4), 0..60)
        ) {
            let mut ledger = Ledger::new();
            for (kind, units) in ops {
                let _ = ledger.record(EntryKind::ALL[kind], Money::units(units), at(1, 9));
            }

            for pair in ledger.entries().windows(2) {
                prop_assert!(!(pair[0].kind == pair[1].kind && pair[0].amount == pair[1].amount));
            }
            prop_assert!(ledger.entries().iter().all(|e| e.amount.is_positive()));
        }
    }
}
