//! Event routing and view-model construction around the ledger state.

pub mod router;
pub mod view;

pub use router::{EventRouter, LedgerEvent, RecordingSink, ViewSink};
pub use view::{CategoryLine, NetStyle, Notice, NoticeKind, Presenter, SideView, ViewModel};
