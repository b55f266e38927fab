use strsim::levenshtein;

use crate::cli::output::{self, TerminalSink};
use crate::cli::CliError;
use crate::core::EventRouter;
use crate::domain::LedgerSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

const COMMANDS: &[(&str, &str)] = &[
    ("show", "Print totals, net, and close status"),
    ("list", "list <income|expense>: show line items"),
    ("check", "check <income|expense> <id>: count an item"),
    ("uncheck", "uncheck <income|expense> <id>: stop counting an item"),
    ("override", "override <on|off>: allow closing while unbalanced"),
    ("close", "Close the books and lock the ledger"),
    ("help", "List commands"),
    ("exit", "Leave the shell"),
];

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    router: EventRouter<TerminalSink>,
}

impl ShellContext {
    pub fn new(mode: CliMode, router: EventRouter<TerminalSink>) -> Self {
        Self {
            mode,
            running: true,
            router,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub fn prompt(&self) -> String {
        if self.router.workflow().is_locked() {
            "daybook (locked)> ".into()
        } else {
            "daybook> ".into()
        }
    }

    pub fn router(&self) -> &EventRouter<TerminalSink> {
        &self.router
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CliError> {
        match command {
            "show" => {
                self.router.refresh();
            }
            "list" => {
                let side = parse_side(args.first().copied())?;
                output::print_side(&self.router, side);
            }
            "check" | "uncheck" => {
                let side = parse_side(args.first().copied())?;
                let id = args
                    .get(1)
                    .ok_or_else(|| CliError::Input(format!("usage: {} <side> <id>", command)))?;
                if let Err(err) = self.router.checkbox_changed(side, id, command == "check") {
                    output::warning(err);
                }
            }
            "override" => {
                let value = match args.first().map(|raw| raw.to_ascii_lowercase()) {
                    Some(raw) if matches!(raw.as_str(), "on" | "true" | "yes") => true,
                    Some(raw) if matches!(raw.as_str(), "off" | "false" | "no") => false,
                    _ => return Err(CliError::Input("usage: override <on|off>".into())),
                };
                if let Err(err) = self.router.override_changed(value) {
                    output::warning(err);
                }
            }
            "close" => {
                // Rejections were already reported through the sink.
                let _ = self.router.close_requested();
            }
            "help" => {
                output::section("Commands");
                for (name, summary) in COMMANDS {
                    println!("  {:<10} {}", name, summary);
                }
            }
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => self.suggest(other),
        }
        Ok(LoopControl::Continue)
    }

    fn suggest(&self, input: &str) {
        output::warning(format!("Unknown command `{}`.", input));
        let mut suggestions: Vec<_> = self
            .command_names()
            .into_iter()
            .map(|name| (levenshtein(name, input), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);
        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub fn report_error(&self, err: CliError) -> Result<(), CliError> {
        match err {
            CliError::Input(message) => {
                output::warning(message);
                Ok(())
            }
            CliError::Core(err) if err.is_rejection() => {
                output::warning(err);
                Ok(())
            }
            other => {
                output::error(&other);
                if self.mode == CliMode::Script {
                    Err(other)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn parse_side(raw: Option<&str>) -> Result<LedgerSide, CliError> {
    let raw = raw.ok_or_else(|| CliError::Input("expected a side: income or expense".into()))?;
    LedgerSide::parse(raw)
        .ok_or_else(|| CliError::Input(format!("`{}` is not a side; use income or expense", raw)))
}
