use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::view::{Notice, Presenter, ViewModel};
use crate::domain::LedgerSide;
use crate::errors::LedgerError;
use crate::ledger::{Aggregate, Aggregator, CloseBooksWorkflow, TransactionStore};

/// Events raised by the rendering shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LedgerEvent {
    CheckboxChanged {
        side: LedgerSide,
        id: String,
        value: bool,
    },
    OverrideChanged {
        value: bool,
    },
    CloseClicked,
}

/// Receiver for everything the router pushes back to the rendering shell.
pub trait ViewSink {
    fn render(&mut self, view: &ViewModel);
    fn notify(&mut self, notice: &Notice);
}

impl<T: ViewSink + ?Sized> ViewSink for &mut T {
    fn render(&mut self, view: &ViewModel) {
        (**self).render(view);
    }

    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice);
    }
}

/// Sink that keeps every emission, handy for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub views: Vec<ViewModel>,
    pub notices: Vec<Notice>,
}

impl RecordingSink {
    pub fn last_view(&self) -> Option<&ViewModel> {
        self.views.last()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl ViewSink for RecordingSink {
    fn render(&mut self, view: &ViewModel) {
        self.views.push(view.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Sole owner of the daily book's mutable state.
///
/// Each handler runs to completion: mutate, recompute, re-evaluate the close
/// gate, emit. Rejections are logged and reported to the sink before the
/// error is handed back; the state is unchanged in that case.
pub struct EventRouter<S: ViewSink> {
    store: TransactionStore,
    workflow: CloseBooksWorkflow,
    presenter: Presenter,
    sink: S,
}

impl<S: ViewSink> EventRouter<S> {
    /// Builds a router whose close workflow starts from the store's current
    /// balance. A sealed store starts out locked.
    pub fn seeded(store: TransactionStore, presenter: Presenter, sink: S) -> Self {
        let net = Aggregator::new(&store, &presenter.default_category).net_total();
        let workflow = if store.is_sealed() {
            CloseBooksWorkflow::locked(net)
        } else {
            CloseBooksWorkflow::new(net)
        };
        Self {
            store,
            workflow,
            presenter,
            sink,
        }
    }

    pub fn dispatch(&mut self, event: LedgerEvent) -> Result<(), LedgerError> {
        match event {
            LedgerEvent::CheckboxChanged { side, id, value } => {
                self.checkbox_changed(side, &id, value)
            }
            LedgerEvent::OverrideChanged { value } => self.override_changed(value),
            LedgerEvent::CloseClicked => self.close_requested(),
        }
    }

    pub fn checkbox_changed(
        &mut self,
        side: LedgerSide,
        id: &str,
        value: bool,
    ) -> Result<(), LedgerError> {
        match self.store.set_checked(side, id, value) {
            Ok(previous) => {
                debug!(%side, id, previous, value, "checkbox changed");
                let aggregate = self.aggregate();
                self.workflow.reevaluate(aggregate.net);
                self.emit(&aggregate);
                Ok(())
            }
            Err(err) => {
                warn!(%side, id, value, error = %err, "checkbox change rejected");
                self.refresh();
                Err(err)
            }
        }
    }

    pub fn override_changed(&mut self, value: bool) -> Result<(), LedgerError> {
        let result = self.workflow.set_override(value);
        match &result {
            Ok(effective) => debug!(requested = value, effective, "override changed"),
            Err(err) => warn!(requested = value, error = %err, "override change rejected"),
        }
        self.refresh();
        result.map(|_| ())
    }

    pub fn close_requested(&mut self) -> Result<(), LedgerError> {
        let aggregate = self.aggregate();
        match self.workflow.request_close(aggregate.net) {
            Ok(()) => {
                self.store.seal();
                let with_override = self.workflow.closed_with_override();
                info!(
                    income = aggregate.income.total,
                    expense = aggregate.expense.total,
                    net = aggregate.net,
                    with_override,
                    "books closed"
                );
                let notice = self.presenter.closed_notice(&aggregate, with_override);
                self.emit(&aggregate);
                self.sink.notify(&notice);
                Ok(())
            }
            Err(err) => {
                warn!(net = aggregate.net, error = %err, "close request rejected");
                let notice = self.presenter.rejection_notice(&err);
                self.sink.notify(&notice);
                self.emit(&aggregate);
                Err(err)
            }
        }
    }

    /// Re-emits the current view without changing anything.
    pub fn refresh(&mut self) {
        let aggregate = self.aggregate();
        self.emit(&aggregate);
    }

    /// Recomputes the view from the current state.
    pub fn view(&self) -> ViewModel {
        self.presenter.build(&self.aggregate(), &self.workflow)
    }

    pub fn aggregate(&self) -> Aggregate {
        Aggregator::new(&self.store, &self.presenter.default_category).summarize()
    }

    fn emit(&mut self, aggregate: &Aggregate) {
        let view = self.presenter.build(aggregate, &self.workflow);
        self.sink.render(&view);
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn workflow(&self) -> &CloseBooksWorkflow {
        &self.workflow
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
