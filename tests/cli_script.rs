mod common;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn seeded_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("seed.json"), common::SEED_JSON).unwrap();
    temp
}

#[test]
fn script_mode_balances_and_closes_the_book() {
    let temp = seeded_dir();
    let input = "show\nclose\ncheck expense exp-3\nclose\nuncheck income inc-1\nexit\n";

    let mut cmd = Command::cargo_bin("daybook_cli").unwrap();
    cmd.arg(temp.path().join("seed.json"))
        .env("DAYBOOK_CLI_SCRIPT", "1")
        .env("DAYBOOK_HOME", temp.path().join("home"))
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Income: $17.50"))
        .stdout(contains("Net: $3.50 (unbalanced)"))
        .stdout(contains("Cannot close the books"))
        .stdout(contains("Net: $0.00 (balanced)"))
        .stdout(contains("Books closed and balanced at $17.50"))
        .stdout(contains("Ledger is locked"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let temp = seeded_dir();
    let mut cmd = Command::cargo_bin("daybook_cli").unwrap();
    cmd.arg(temp.path().join("seed.json"))
        .env("DAYBOOK_CLI_SCRIPT", "1")
        .env("DAYBOOK_HOME", temp.path().join("home"))
        .write_stdin("clsoe\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `clsoe`"))
        .stdout(contains("Suggestion: `close`?"));
}

#[test]
fn missing_seed_argument_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("daybook_cli").unwrap();
    cmd.env("DAYBOOK_CLI_SCRIPT", "1")
        .env("DAYBOOK_HOME", temp.path())
        .env_remove("DAYBOOK_SEED")
        .assert()
        .failure()
        .stderr(contains("usage: daybook_cli"));
}
