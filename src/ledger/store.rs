use std::collections::HashMap;

use crate::domain::{Identifiable, LedgerSide, Transaction};
use crate::errors::LedgerError;

/// Insertion-ordered line items for one ledger side, indexed by id.
#[derive(Debug, Clone, Default)]
struct SideBook {
    entries: Vec<Transaction>,
    index: HashMap<String, usize>,
}

impl SideBook {
    fn upsert(&mut self, transaction: Transaction) -> bool {
        if let Some(&position) = self.index.get(transaction.id()) {
            self.entries[position] = transaction;
            return false;
        }
        self.index
            .insert(transaction.id().to_string(), self.entries.len());
        self.entries.push(transaction);
        true
    }

    /// Sum of every amount on this side, checked or not, leaving out `id`.
    /// `None` when the sum does not fit in an `i64`.
    fn total_without(&self, id: &str) -> Option<i64> {
        self.entries
            .iter()
            .filter(|entry| entry.id() != id)
            .try_fold(0_i64, |total, entry| total.checked_add(entry.amount))
    }

    fn get(&self, id: &str) -> Option<&Transaction> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        match self.index.get(id) {
            Some(&position) => self.entries.get_mut(position),
            None => None,
        }
    }
}

/// Holds the income and expense line items of the daily book.
///
/// Once sealed (after the books close) every write is rejected with
/// [`LedgerError::Locked`] and the contents stay frozen.
///
/// The sum of all amounts on each side always fits in an `i64`, so every
/// subtotal, side total, and the net total can be computed without overflow.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    income: SideBook,
    expense: SideBook,
    sealed: bool,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, side: LedgerSide) -> &SideBook {
        match side {
            LedgerSide::Income => &self.income,
            LedgerSide::Expense => &self.expense,
        }
    }

    fn side_mut(&mut self, side: LedgerSide) -> &mut SideBook {
        match side {
            LedgerSide::Income => &mut self.income,
            LedgerSide::Expense => &mut self.expense,
        }
    }

    /// Inserts a new line item or replaces the one with the same id.
    ///
    /// Returns `true` when the id was new. Replacements keep the original
    /// position so category grouping order is stable.
    pub fn upsert(
        &mut self,
        side: LedgerSide,
        transaction: Transaction,
    ) -> Result<bool, LedgerError> {
        if self.sealed {
            return Err(LedgerError::Locked);
        }
        if transaction.amount < 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "transaction `{}` has a negative amount ({})",
                transaction.id, transaction.amount
            )));
        }
        let fits = self
            .side(side)
            .total_without(transaction.id())
            .and_then(|total| total.checked_add(transaction.amount))
            .is_some();
        if !fits {
            return Err(LedgerError::InvalidAmount(format!(
                "transaction `{}` would push the {} total past the largest supported amount",
                transaction.id, side
            )));
        }
        let inserted = self.side_mut(side).upsert(transaction);
        Ok(inserted)
    }

    /// Sets the `checked` flag of a line item.
    ///
    /// Returns the previous value. Lock state is checked before the id so a
    /// sealed store always answers `Locked`.
    pub fn set_checked(
        &mut self,
        side: LedgerSide,
        id: &str,
        value: bool,
    ) -> Result<bool, LedgerError> {
        if self.sealed {
            return Err(LedgerError::Locked);
        }
        let transaction =
            self.side_mut(side)
                .get_mut(id)
                .ok_or_else(|| LedgerError::NotFound {
                    side,
                    id: id.to_string(),
                })?;
        let previous = transaction.checked;
        transaction.checked = value;
        Ok(previous)
    }

    /// Current line items of one side in insertion order.
    pub fn snapshot(&self, side: LedgerSide) -> &[Transaction] {
        &self.side(side).entries
    }

    pub fn get(&self, side: LedgerSide, id: &str) -> Option<&Transaction> {
        self.side(side).get(id)
    }

    pub fn len(&self, side: LedgerSide) -> usize {
        self.side(side).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.income.entries.is_empty() && self.expense.entries.is_empty()
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: &str, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            id,
            category,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            amount,
        )
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = TransactionStore::new();
        assert!(store.upsert(LedgerSide::Income, txn("a", "Sales", 100)).unwrap());
        assert!(store.upsert(LedgerSide::Income, txn("b", "Fees", 200)).unwrap());
        assert!(!store.upsert(LedgerSide::Income, txn("a", "Sales", 150)).unwrap());

        let ids: Vec<_> = store
            .snapshot(LedgerSide::Income)
            .iter()
            .map(|t| (t.id.as_str(), t.amount))
            .collect();
        assert_eq!(ids, vec![("a", 150), ("b", 200)]);
    }

    #[test]
    fn sides_keep_independent_id_spaces() {
        let mut store = TransactionStore::new();
        store.upsert(LedgerSide::Income, txn("1", "Sales", 100)).unwrap();
        store.upsert(LedgerSide::Expense, txn("1", "Rent", 40)).unwrap();
        assert_eq!(store.len(LedgerSide::Income), 1);
        assert_eq!(store.len(LedgerSide::Expense), 1);
        assert_eq!(store.get(LedgerSide::Expense, "1").unwrap().amount, 40);
    }

    #[test]
    fn set_checked_reports_unknown_ids() {
        let mut store = TransactionStore::new();
        store.upsert(LedgerSide::Income, txn("a", "Sales", 100)).unwrap();
        let err = store
            .set_checked(LedgerSide::Expense, "a", false)
            .expect_err("id belongs to the other side");
        assert!(matches!(
            err,
            LedgerError::NotFound { side: LedgerSide::Expense, ref id } if id == "a"
        ));
        assert!(store.get(LedgerSide::Income, "a").unwrap().checked);
    }

    #[test]
    fn sealed_store_rejects_all_writes() {
        let mut store = TransactionStore::new();
        store.upsert(LedgerSide::Income, txn("a", "Sales", 100)).unwrap();
        store.seal();

        assert!(matches!(
            store.set_checked(LedgerSide::Income, "a", false),
            Err(LedgerError::Locked)
        ));
        assert!(matches!(
            store.set_checked(LedgerSide::Income, "missing", false),
            Err(LedgerError::Locked)
        ));
        assert!(matches!(
            store.upsert(LedgerSide::Expense, txn("z", "Rent", 5)),
            Err(LedgerError::Locked)
        ));
        assert!(store.get(LedgerSide::Income, "a").unwrap().checked);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut store = TransactionStore::new();
        let err = store
            .upsert(LedgerSide::Expense, txn("x", "Rent", -1))
            .expect_err("negative amount");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn side_totals_are_capped_at_the_largest_amount() {
        let mut store = TransactionStore::new();
        let half = i64::MAX / 2 + 1;
        store.upsert(LedgerSide::Income, txn("a", "Sales", half)).unwrap();
        let err = store
            .upsert(LedgerSide::Income, txn("b", "Sales", half))
            .expect_err("side total would overflow");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(store.len(LedgerSide::Income), 1);

        // Replacing an item only counts its new amount.
        store.upsert(LedgerSide::Income, txn("a", "Sales", i64::MAX)).unwrap();
        store.upsert(LedgerSide::Expense, txn("x", "Rent", i64::MAX)).unwrap();
        let aggregator = crate::ledger::Aggregator::new(&store, crate::domain::DEFAULT_CATEGORY);
        assert_eq!(aggregator.net_total(), 0);
    }
}
