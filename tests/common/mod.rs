#![allow(dead_code)]

use chrono::NaiveDate;
use daybook_core::{
    core::{EventRouter, Presenter, RecordingSink},
    domain::{LedgerSide, Transaction},
    ledger::TransactionStore,
};

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

/// Income 1000 + 750, expense 800 + 600, plus an unchecked 350 expense that
/// balances the book when checked.
pub fn scenario_store() -> TransactionStore {
    let mut store = TransactionStore::new();
    for txn in [
        Transaction::new("inc-1", "Sales", day(), 1000).with_memo("Register"),
        Transaction::new("inc-2", "Catering", day(), 750),
    ] {
        store.upsert(LedgerSide::Income, txn).unwrap();
    }
    for txn in [
        Transaction::new("exp-1", "Supplies", day(), 800),
        Transaction::new("exp-2", "Payroll", day(), 600),
        Transaction::new("exp-3", "Supplies", day(), 350).unchecked(),
    ] {
        store.upsert(LedgerSide::Expense, txn).unwrap();
    }
    store
}

pub fn scenario_router() -> EventRouter<RecordingSink> {
    EventRouter::seeded(
        scenario_store(),
        Presenter::default(),
        RecordingSink::default(),
    )
}

pub const SEED_JSON: &str = r#"{
  "income": [
    {"id": "inc-1", "category": "Sales", "date": "2024-06-14", "memo": "Register", "amount": 10.00},
    {"id": "inc-2", "category": "Catering", "date": "2024-06-14", "amount": "7.50"}
  ],
  "expense": [
    {"id": "exp-1", "category": "Supplies", "date": "2024-06-14", "amount": 8},
    {"id": "exp-2", "category": "Payroll", "date": "2024-06-14", "amount": "6.00"},
    {"id": "exp-3", "category": "Supplies", "date": "2024-06-14", "amount": 3.5, "checked": false}
  ]
}"#;
