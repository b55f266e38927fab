//! Pure totals over a pair of side snapshots. Everything here is integer
//! minor units; nothing is formatted.

use serde::Serialize;

use crate::domain::{LedgerSide, Transaction};
use crate::ledger::store::TransactionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySubtotal {
    pub category: String,
    pub subtotal: i64,
    pub checked_count: usize,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideSummary {
    pub side: LedgerSide,
    pub subtotals: Vec<CategorySubtotal>,
    pub total: i64,
}

/// Both side summaries plus the signed net total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub income: SideSummary,
    pub expense: SideSummary,
    pub net: i64,
}

impl Aggregate {
    pub fn side(&self, side: LedgerSide) -> &SideSummary {
        match side {
            LedgerSide::Income => &self.income,
            LedgerSide::Expense => &self.expense,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.net == 0
    }
}

/// Read-only view over the income and expense snapshots.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    income: &'a [Transaction],
    expense: &'a [Transaction],
    default_category: &'a str,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a TransactionStore, default_category: &'a str) -> Self {
        Self::from_snapshots(
            store.snapshot(LedgerSide::Income),
            store.snapshot(LedgerSide::Expense),
            default_category,
        )
    }

    pub fn from_snapshots(
        income: &'a [Transaction],
        expense: &'a [Transaction],
        default_category: &'a str,
    ) -> Self {
        Self {
            income,
            expense,
            default_category,
        }
    }

    fn snapshot(&self, side: LedgerSide) -> &'a [Transaction] {
        match side {
            LedgerSide::Income => self.income,
            LedgerSide::Expense => self.expense,
        }
    }

    /// Checked amounts grouped by category, in first-seen category order.
    ///
    /// Categories whose items are all unchecked stay listed with a zero
    /// subtotal.
    pub fn subtotals_by_category(&self, side: LedgerSide) -> Vec<CategorySubtotal> {
        let mut groups: Vec<CategorySubtotal> = Vec::new();
        for transaction in self.snapshot(side) {
            let category = transaction.category_or(self.default_category);
            let position = match groups.iter().position(|group| group.category == category) {
                Some(position) => position,
                None => {
                    groups.push(CategorySubtotal {
                        category: category.to_string(),
                        subtotal: 0,
                        checked_count: 0,
                        item_count: 0,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[position];
            group.item_count += 1;
            if transaction.checked {
                group.subtotal += transaction.amount;
                group.checked_count += 1;
            }
        }
        groups
    }

    pub fn side_total(&self, side: LedgerSide) -> i64 {
        self.snapshot(side)
            .iter()
            .map(Transaction::counted_amount)
            .sum()
    }

    pub fn net_total(&self) -> i64 {
        self.side_total(LedgerSide::Income) - self.side_total(LedgerSide::Expense)
    }

    fn side_summary(&self, side: LedgerSide) -> SideSummary {
        let subtotals = self.subtotals_by_category(side);
        let total = subtotals.iter().map(|group| group.subtotal).sum();
        SideSummary {
            side,
            subtotals,
            total,
        }
    }

    pub fn summarize(&self) -> Aggregate {
        let income = self.side_summary(LedgerSide::Income);
        let expense = self.side_summary(LedgerSide::Expense);
        let net = income.total - expense.total;
        Aggregate {
            income,
            expense,
            net,
        }
    }
}
