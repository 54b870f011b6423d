use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfi").unwrap()
}

fn small_valid_bf() -> &'static str {
    "+++.\n"
}

#[test]
fn test_no_subcommand_starts_the_repl() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env_remove("BFI_REPL_MODE")
        .write_stdin(small_valid_bf())
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn test_auto_bare_on_piped_stdin_prints_no_prompts() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env_remove("BFI_REPL_MODE")
        .write_stdin(small_valid_bf())
        .assert()
        .success()
        .stdout(predicate::str::contains(">>>").not())
        .stderr(predicate::str::contains("Brainfuck REPL").not());
}

#[test]
fn test_env_bare_executes_piped_input() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env("BFI_REPL_MODE", "bare")
        .arg("repl")
        .write_stdin(small_valid_bf())
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn test_forced_editor_on_non_tty_errors() {
    // Piped stdin (non-tty) + --editor should error out with non-zero and helpful message.
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("repl")
        .arg("--editor")
        .write_stdin(small_valid_bf())
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn test_env_editor_on_non_tty_errors() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env("BFI_REPL_MODE", "editor")
        .arg("repl")
        .write_stdin(small_valid_bf())
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn test_bogus_mode_env_value_is_rejected() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .env("BFI_REPL_MODE", "fancy")
        .arg("repl")
        .write_stdin(small_valid_bf())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid BFI_REPL_MODE value"));
}

#[test]
fn test_bare_and_editor_flags_conflict() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .arg("repl")
        .arg("--bare")
        .arg("--editor")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_repl_help_exits_0() {
    cargo_bin()
        .arg("repl")
        .arg("-h")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("repl").and(predicate::str::contains("--bare")));
}
