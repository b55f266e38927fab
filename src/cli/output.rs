use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::core::{EventRouter, NetStyle, Notice, NoticeKind, ViewModel, ViewSink};
use crate::domain::{Displayable, LedgerSide};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    pub screen_reader_mode: bool,
    pub plain: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    if prefs.plain {
        colored::control::set_override(false);
    }
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[ok]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Section => ("INFO", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };

    if prefs.screen_reader_mode || prefs.plain {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

fn styled_net(view: &ViewModel, prefs: &OutputPreferences) -> String {
    if prefs.plain || prefs.screen_reader_mode {
        let marker = match view.net_style {
            NetStyle::Balanced => "balanced",
            NetStyle::Unbalanced => "unbalanced",
        };
        return format!("{} ({})", view.net_display, marker);
    }
    match view.net_style {
        NetStyle::Balanced => view.net_display.bright_green().bold().to_string(),
        NetStyle::Unbalanced => view.net_display.bright_red().bold().to_string(),
    }
}

/// Renders a view model as a plain terminal report.
pub fn render_view(view: &ViewModel) -> String {
    let prefs = preferences();
    let mut lines = Vec::new();
    for side in LedgerSide::ALL {
        let side_view = view.side(side);
        lines.push(side_view.header.clone());
        for line in &side_view.categories {
            lines.push(format!("  {:<24} {:>14}", line.category, line.display));
        }
    }
    lines.push(styled_net(view, &prefs));
    let status = if view.locked { "locked" } else { "open" };
    lines.push(format!(
        "Status: {} | close {} | override {}",
        status,
        if view.close_enabled { "enabled" } else { "disabled" },
        match (view.override_visible, view.override_active) {
            (false, _) => "hidden",
            (true, true) => "on",
            (true, false) => "off",
        }
    ));
    lines.join("\n")
}

/// Lists one side's line items with their checked marks and amounts.
pub fn print_side<S: ViewSink>(router: &EventRouter<S>, side: LedgerSide) {
    section(format!("{} items", side.label()));
    let presenter = router.presenter();
    for transaction in router.store().snapshot(side) {
        println!(
            "  {:<48} {:>14}",
            transaction.display_label(),
            presenter.format(transaction.amount)
        );
    }
}

/// Sink that writes every emitted view and notice to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl ViewSink for TerminalSink {
    fn render(&mut self, view: &ViewModel) {
        println!("{}", render_view(view));
    }

    fn notify(&mut self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Confirmation => success(&notice.message),
            NoticeKind::Error => error(&notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_are_not_coloured() {
        let prefs = OutputPreferences {
            screen_reader_mode: false,
            plain: true,
        };
        assert_eq!(
            apply_style(MessageKind::Warning, "careful", &prefs),
            "WARNING: [!] careful"
        );
        assert_eq!(apply_style(MessageKind::Section, " Day ", &prefs), "=== Day ===");
    }
}
