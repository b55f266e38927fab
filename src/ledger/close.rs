use serde::Serialize;

use crate::errors::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CloseState {
    Open { balanced: bool },
    Locked,
}

/// Gate for the one-way Open -> Locked transition of the daily book.
///
/// The override lets an unbalanced book close anyway. It is only meaningful
/// while the book is open and unbalanced and is cleared everywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseBooksWorkflow {
    state: CloseState,
    override_enabled: bool,
    closed_with_override: bool,
}

impl CloseBooksWorkflow {
    pub fn new(net_total: i64) -> Self {
        Self {
            state: CloseState::Open {
                balanced: net_total == 0,
            },
            override_enabled: false,
            closed_with_override: false,
        }
    }

    /// A workflow for a book that was already closed at `net_total`.
    pub fn locked(net_total: i64) -> Self {
        Self {
            state: CloseState::Locked,
            override_enabled: false,
            closed_with_override: net_total != 0,
        }
    }

    /// Re-evaluates the balance after a store mutation. No-op once locked.
    pub fn reevaluate(&mut self, net_total: i64) {
        if let CloseState::Open { .. } = self.state {
            let balanced = net_total == 0;
            self.state = CloseState::Open { balanced };
            if balanced {
                self.override_enabled = false;
            }
        }
    }

    /// Returns the override value in effect after the call.
    pub fn set_override(&mut self, value: bool) -> Result<bool, LedgerError> {
        match self.state {
            CloseState::Locked => Err(LedgerError::Locked),
            CloseState::Open { balanced: true } => {
                self.override_enabled = false;
                Ok(false)
            }
            CloseState::Open { balanced: false } => {
                self.override_enabled = value;
                Ok(value)
            }
        }
    }

    /// Locks the book when it balances or the override is set.
    ///
    /// `net_total` is only used to describe a mismatch. Failures leave the
    /// workflow untouched.
    pub fn request_close(&mut self, net_total: i64) -> Result<(), LedgerError> {
        match self.state {
            CloseState::Locked => Err(LedgerError::AlreadyLocked),
            CloseState::Open { balanced: false } if !self.override_enabled => {
                Err(LedgerError::BalanceMismatch { net: net_total })
            }
            CloseState::Open { balanced } => {
                self.closed_with_override = !balanced;
                self.state = CloseState::Locked;
                self.override_enabled = false;
                Ok(())
            }
        }
    }

    pub fn state(&self) -> CloseState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == CloseState::Locked
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self.state, CloseState::Open { balanced: true })
    }

    pub fn override_enabled(&self) -> bool {
        self.override_enabled
    }

    pub fn override_visible(&self) -> bool {
        matches!(self.state, CloseState::Open { balanced: false })
    }

    pub fn close_enabled(&self) -> bool {
        match self.state {
            CloseState::Open { balanced } => balanced || self.override_enabled,
            CloseState::Locked => false,
        }
    }

    pub fn closed_with_override(&self) -> bool {
        self.closed_with_override
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_open_with_balance_from_net() {
        assert!(CloseBooksWorkflow::new(0).is_balanced());
        let workflow = CloseBooksWorkflow::new(350);
        assert_eq!(workflow.state(), CloseState::Open { balanced: false });
        assert!(workflow.override_visible());
        assert!(!workflow.close_enabled());
    }

    #[test]
    fn override_is_ignored_while_balanced() {
        let mut workflow = CloseBooksWorkflow::new(0);
        assert!(!workflow.set_override(true).unwrap());
        assert!(!workflow.override_enabled());
        assert!(!workflow.override_visible());
    }

    #[test]
    fn becoming_balanced_clears_the_override() {
        let mut workflow = CloseBooksWorkflow::new(-400);
        workflow.set_override(true).unwrap();
        assert!(workflow.close_enabled());
        workflow.reevaluate(0);
        assert!(!workflow.override_enabled());
        workflow.reevaluate(12);
        assert!(!workflow.override_enabled());
        assert!(!workflow.close_enabled());
    }

    #[test]
    fn unbalanced_close_without_override_is_rejected() {
        let mut workflow = CloseBooksWorkflow::new(350);
        let before = workflow.clone();
        let err = workflow.request_close(350).expect_err("unbalanced");
        assert!(matches!(err, LedgerError::BalanceMismatch { net: 350 }));
        assert_eq!(workflow, before);
    }

    #[test]
    fn override_allows_unbalanced_close_and_resets() {
        let mut workflow = CloseBooksWorkflow::new(350);
        workflow.set_override(true).unwrap();
        workflow.request_close(350).unwrap();
        assert!(workflow.is_locked());
        assert!(!workflow.override_enabled());
        assert!(workflow.closed_with_override());
        assert!(!workflow.close_enabled());
    }

    #[test]
    fn locked_rejects_further_requests() {
        let mut workflow = CloseBooksWorkflow::new(0);
        workflow.request_close(0).unwrap();
        assert!(!workflow.closed_with_override());
        assert!(matches!(
            workflow.request_close(0),
            Err(LedgerError::AlreadyLocked)
        ));
        assert!(matches!(workflow.set_override(true), Err(LedgerError::Locked)));
        workflow.reevaluate(99);
        assert!(workflow.is_locked());
    }
}
