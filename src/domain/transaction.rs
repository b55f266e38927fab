use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};

/// Category used for line items that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LedgerSide {
    Income,
    Expense,
}

impl LedgerSide {
    pub const ALL: [LedgerSide; 2] = [LedgerSide::Income, LedgerSide::Expense];

    pub fn label(self) -> &'static str {
        match self {
            LedgerSide::Income => "Income",
            LedgerSide::Expense => "Expense",
        }
    }

    /// Sign applied to an amount on this side when computing the net total.
    pub fn sign(self) -> i64 {
        match self {
            LedgerSide::Income => 1,
            LedgerSide::Expense => -1,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "i" => Some(LedgerSide::Income),
            "expense" | "expenses" | "out" | "e" => Some(LedgerSide::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSide::Income => f.write_str("income"),
            LedgerSide::Expense => f.write_str("expense"),
        }
    }
}

/// A single line item on one side of the daily book.
///
/// `amount` is held in minor currency units (cents for USD) and is never
/// negative; the side decides whether it adds to or subtracts from the net.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub memo: String,
    pub amount: i64,
    #[serde(default = "Transaction::default_checked")]
    pub checked: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
        amount: i64,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            date,
            memo: String::new(),
            amount,
            checked: true,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn unchecked(mut self) -> Self {
        self.checked = false;
        self
    }

    /// Grouping key, falling back to `default` for blank categories.
    pub fn category_or<'a>(&'a self, default: &'a str) -> &'a str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            default
        } else {
            trimmed
        }
    }

    /// Amount counted towards totals: the full amount when checked, zero otherwise.
    pub fn counted_amount(&self) -> i64 {
        if self.checked {
            self.amount
        } else {
            0
        }
    }

    pub fn default_checked() -> bool {
        true
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let mark = if self.checked { "x" } else { " " };
        let category = self.category_or(DEFAULT_CATEGORY);
        if self.memo.is_empty() {
            format!("[{}] {} {} ({})", mark, self.id, self.date, category)
        } else {
            format!(
                "[{}] {} {} ({}) {}",
                mark, self.id, self.date, category, self.memo
            )
        }
    }
}
