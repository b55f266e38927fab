use thiserror::Error;

use crate::domain::transaction::LedgerSide;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction `{id}` not found on the {side} side")]
    NotFound { side: LedgerSide, id: String },
    #[error("Ledger is locked; changes are no longer accepted")]
    Locked,
    #[error("Books are out of balance by {net} minor units")]
    BalanceMismatch { net: i64 },
    #[error("Books are already closed")]
    AlreadyLocked,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// True for the recoverable rejections an event handler reports and moves past.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::NotFound { .. }
                | LedgerError::Locked
                | LedgerError::BalanceMismatch { .. }
                | LedgerError::AlreadyLocked
        )
    }
}
