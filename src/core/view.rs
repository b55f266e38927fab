//! The single step that turns integer aggregates and workflow state into the
//! display payload handed to the rendering shell.

use serde::Serialize;

use crate::config::Config;
use crate::currency::{format_minor_units, CurrencyCode, FormatOptions, LocaleConfig};
use crate::domain::{LedgerSide, DEFAULT_CATEGORY};
use crate::errors::LedgerError;
use crate::ledger::{Aggregate, CloseBooksWorkflow, SideSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLine {
    pub category: String,
    pub subtotal: i64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideView {
    pub side: LedgerSide,
    /// Summary header such as `Income: $17.50`.
    pub header: String,
    pub total: i64,
    pub total_display: String,
    pub categories: Vec<CategoryLine>,
}

/// Style selector for the net total; depends only on whether the net is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetStyle {
    Balanced,
    Unbalanced,
}

impl NetStyle {
    pub fn for_net(net_total: i64) -> Self {
        if net_total == 0 {
            NetStyle::Balanced
        } else {
            NetStyle::Unbalanced
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub income: SideView,
    pub expense: SideView,
    pub income_total: i64,
    pub expense_total: i64,
    pub net_total: i64,
    pub net_display: String,
    pub net_style: NetStyle,
    pub override_visible: bool,
    pub override_active: bool,
    pub close_enabled: bool,
    pub locked: bool,
}

impl ViewModel {
    pub fn side(&self, side: LedgerSide) -> &SideView {
        match side {
            LedgerSide::Income => &self.income,
            LedgerSide::Expense => &self.expense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Confirmation,
    Error,
}

/// User-facing message emitted alongside a view when the books close or a
/// close request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Display settings applied when building view models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presenter {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub options: FormatOptions,
    pub default_category: String,
}

impl Default for Presenter {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            locale: LocaleConfig::default(),
            options: FormatOptions::default(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl Presenter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency_code(),
            locale: config.locale_config(),
            options: config.format_options(),
            default_category: config.default_category.clone(),
        }
    }

    pub fn format(&self, amount: i64) -> String {
        format_minor_units(amount, &self.currency, &self.locale, &self.options)
    }

    fn side_view(&self, summary: &SideSummary) -> SideView {
        let total_display = self.format(summary.total);
        SideView {
            side: summary.side,
            header: format!("{}: {}", summary.side.label(), total_display),
            total: summary.total,
            total_display,
            categories: summary
                .subtotals
                .iter()
                .map(|group| CategoryLine {
                    category: group.category.clone(),
                    subtotal: group.subtotal,
                    display: self.format(group.subtotal),
                })
                .collect(),
        }
    }

    pub fn build(&self, aggregate: &Aggregate, workflow: &CloseBooksWorkflow) -> ViewModel {
        ViewModel {
            income: self.side_view(&aggregate.income),
            expense: self.side_view(&aggregate.expense),
            income_total: aggregate.income.total,
            expense_total: aggregate.expense.total,
            net_total: aggregate.net,
            net_display: format!("Net: {}", self.format(aggregate.net)),
            net_style: NetStyle::for_net(aggregate.net),
            override_visible: workflow.override_visible(),
            override_active: workflow.override_enabled(),
            close_enabled: workflow.close_enabled(),
            locked: workflow.is_locked(),
        }
    }

    pub fn closed_notice(&self, aggregate: &Aggregate, with_override: bool) -> Notice {
        let message = if with_override {
            format!(
                "Books closed with override. Income {} / Expense {} (net {}). The ledger is now read-only.",
                self.format(aggregate.income.total),
                self.format(aggregate.expense.total),
                self.format(aggregate.net),
            )
        } else {
            format!(
                "Books closed and balanced at {}. The ledger is now read-only.",
                self.format(aggregate.income.total),
            )
        };
        Notice {
            kind: NoticeKind::Confirmation,
            message,
        }
    }

    pub fn rejection_notice(&self, err: &LedgerError) -> Notice {
        let message = match err {
            LedgerError::BalanceMismatch { net } => format!(
                "Cannot close the books: income and expense differ by {}. Enable the override to close anyway.",
                self.format(*net)
            ),
            LedgerError::AlreadyLocked => "The books are already closed.".to_string(),
            other => other.to_string(),
        };
        Notice {
            kind: NoticeKind::Error,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use crate::ledger::{Aggregator, TransactionStore};
    use chrono::NaiveDate;

    fn aggregate() -> Aggregate {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut store = TransactionStore::new();
        store
            .upsert(LedgerSide::Income, Transaction::new("i1", "Sales", day, 1750))
            .unwrap();
        store
            .upsert(LedgerSide::Expense, Transaction::new("e1", "Rent", day, 2150))
            .unwrap();
        Aggregator::new(&store, DEFAULT_CATEGORY).summarize()
    }

    #[test]
    fn headers_and_net_are_formatted_at_the_boundary() {
        let aggregate = aggregate();
        let workflow = CloseBooksWorkflow::new(aggregate.net);
        let view = Presenter::default().build(&aggregate, &workflow);
        assert_eq!(view.income.header, "Income: $17.50");
        assert_eq!(view.expense.header, "Expense: $21.50");
        assert_eq!(view.net_total, -400);
        assert_eq!(view.net_display, "Net: -$4.00");
        assert_eq!(view.net_style, NetStyle::Unbalanced);
        assert_eq!(view.expense.categories[0].display, "$21.50");
        assert!(view.override_visible);
        assert!(!view.close_enabled);
    }

    #[test]
    fn mismatch_notice_names_the_difference() {
        let notice = Presenter::default()
            .rejection_notice(&LedgerError::BalanceMismatch { net: 350 });
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("$3.50"), "{}", notice.message);
    }

    #[test]
    fn view_serializes_for_the_rendering_shell() {
        let aggregate = aggregate();
        let workflow = CloseBooksWorkflow::new(aggregate.net);
        let view = Presenter::default().build(&aggregate, &workflow);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["net_style"], "unbalanced");
        assert_eq!(json["income"]["side"], "income");
        assert_eq!(json["income"]["categories"][0]["category"], "Sales");
    }
}
