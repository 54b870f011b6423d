use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfi").unwrap()
}

#[test]
fn unmatched_open_bracket_reports_position_and_caret() {
    cargo_bin()
        .arg("run")
        .arg("[")
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("unmatched bracket '['")
                .and(predicate::str::contains("at instruction 0"))
                .and(predicate::str::contains("^")),
        );
}

#[test]
fn unmatched_close_bracket_reports_its_own_position() {
    cargo_bin()
        .arg("run")
        .arg("+++]")
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("unmatched bracket ']'")
                .and(predicate::str::contains("at instruction 3")),
        );
}

#[test]
fn caret_lands_under_the_offending_instruction() {
    cargo_bin()
        .arg("run")
        .arg("+++]")
        .assert()
        .failure()
        // Two-space indent, then one space per instruction before the ']'.
        .stderr(predicate::str::contains("  +++]\n     ^"));
}

#[test]
fn last_unclosed_open_is_the_one_reported() {
    // Position 1 pairs with position 2; position 0 never closes.
    cargo_bin()
        .arg("run")
        .arg("[[]")
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("unmatched bracket '['")
                .and(predicate::str::contains("at instruction 0")),
        );
}

#[test]
fn unbalanced_programs_execute_nothing() {
    // '.' would print before the stray '[' is ever reached, but bracket
    // resolution happens before the first instruction runs.
    cargo_bin()
        .arg("run")
        .arg("+.[")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn errors_name_the_binary_in_cli_runs() {
    cargo_bin()
        .arg("run")
        .arg("]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bfi: Parse error"));
}
