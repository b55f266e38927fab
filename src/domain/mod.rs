pub mod common;
pub mod transaction;

pub use common::{Displayable, Identifiable};
pub use transaction::{LedgerSide, Transaction, DEFAULT_CATEGORY};
