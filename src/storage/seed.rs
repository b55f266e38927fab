use std::{fs, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::currency::{parse_minor_units, CurrencyCode};
use crate::domain::{LedgerSide, Transaction};
use crate::errors::LedgerError;
use crate::ledger::TransactionStore;

/// Amount as the shell sends it: a JSON number or a decimal string, in major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedAmount {
    Text(String),
    Number(serde_json::Number),
}

impl SeedAmount {
    pub fn to_minor_units(&self, precision: u8) -> Result<i64, LedgerError> {
        match self {
            SeedAmount::Text(text) => parse_minor_units(text, precision),
            SeedAmount::Number(number) => parse_minor_units(&number.to_string(), precision),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub memo: Option<String>,
    pub amount: SeedAmount,
    #[serde(default)]
    pub checked: Option<bool>,
}

impl SeedRecord {
    pub fn into_transaction(self, precision: u8) -> Result<Transaction, LedgerError> {
        let amount = self.amount.to_minor_units(precision).map_err(|err| match err {
            LedgerError::InvalidAmount(message) => {
                LedgerError::InvalidAmount(format!("record `{}`: {}", self.id, message))
            }
            other => other,
        })?;
        Ok(Transaction {
            id: self.id,
            category: self.category.unwrap_or_default(),
            date: self.date,
            memo: self.memo.unwrap_or_default(),
            amount,
            checked: self.checked.unwrap_or_else(Transaction::default_checked),
        })
    }
}

/// Ordered income and expense records supplied once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedDataset {
    #[serde(default)]
    pub income: Vec<SeedRecord>,
    #[serde(default)]
    pub expense: Vec<SeedRecord>,
}

impl SeedDataset {
    pub fn from_json_str(data: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn records(&self, side: LedgerSide) -> &[SeedRecord] {
        match side {
            LedgerSide::Income => &self.income,
            LedgerSide::Expense => &self.expense,
        }
    }

    /// Converts every record into minor units for `currency` and fills a store.
    ///
    /// A later record with an id already seen on the same side replaces the
    /// earlier one in place.
    pub fn into_store(self, currency: &CurrencyCode) -> Result<TransactionStore, LedgerError> {
        let precision = currency.minor_units();
        let mut store = TransactionStore::new();
        let SeedDataset { income, expense } = self;
        for (side, records) in [(LedgerSide::Income, income), (LedgerSide::Expense, expense)] {
            for record in records {
                let transaction = record.into_transaction(precision)?;
                let id = transaction.id.clone();
                if !store.upsert(side, transaction)? {
                    warn!(%side, id = %id, "duplicate seed id replaced earlier record");
                }
            }
            debug!(%side, count = store.len(side), "seeded ledger side");
        }
        Ok(store)
    }
}

/// Loads a seed dataset from disk, returning structured errors on failure.
pub fn load_seed_from_file(path: &Path) -> Result<SeedDataset, LedgerError> {
    let data = fs::read_to_string(path)?;
    SeedDataset::from_json_str(&data)
}
