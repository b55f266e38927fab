//! Terminal driver for the daily book: loads a seed dataset and feeds shell
//! commands to the event router.

mod context;
pub mod output;
mod shell;

use thiserror::Error;

use crate::errors::LedgerError;

pub use context::{CliMode, LoopControl, ShellContext};
pub use shell::run_cli;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}
