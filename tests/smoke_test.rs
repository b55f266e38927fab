use chrono::NaiveDate;
use daybook_core::{
    core::{EventRouter, LedgerEvent, Presenter, RecordingSink},
    domain::{LedgerSide, Transaction},
    init,
    ledger::TransactionStore,
};

#[test]
fn daybook_smoke() {
    init();

    let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut store = TransactionStore::new();
    store
        .upsert(LedgerSide::Income, Transaction::new("cash", "Sales", day, 4_200))
        .unwrap();
    store
        .upsert(LedgerSide::Expense, Transaction::new("float", "Till", day, 4_200))
        .unwrap();

    let mut router = EventRouter::seeded(store, Presenter::default(), RecordingSink::default());
    router.dispatch(LedgerEvent::CloseClicked).unwrap();

    let sink = router.into_sink();
    assert_eq!(sink.views.len(), 1);
    assert!(sink.views[0].locked);
    assert_eq!(sink.notices.len(), 1);
}
