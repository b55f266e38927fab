//! Ledger state for the daily book: the per-side transaction store, the pure
//! aggregation over it, and the close-books state machine.

pub mod aggregate;
pub mod close;
pub mod store;

pub use aggregate::{Aggregate, Aggregator, CategorySubtotal, SideSummary};
pub use close::{CloseBooksWorkflow, CloseState};
pub use store::TransactionStore;
