use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command {
    Command::cargo_bin("bfi").unwrap()
}

#[test]
fn runs_a_program_and_appends_a_trailing_newline() {
    // 8 x 8 = 64 = '@'
    cargo_bin()
        .arg("run")
        .arg("++++++++[>++++++++<-]>.")
        .assert()
        .success()
        .stdout("@\n");
}

#[test]
fn positional_code_parts_are_concatenated() {
    cargo_bin()
        .arg("run")
        .arg("++")
        .arg(".")
        .assert()
        .success()
        .stdout("\u{2}\n");
}

#[test]
fn non_instruction_characters_are_comments_not_errors() {
    cargo_bin()
        .arg("run")
        .arg("+a+.")
        .assert()
        .success()
        .stdout("\u{2}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn hash_comments_run_to_end_of_line_in_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "++++++++[>++++++++<-]>. # square eight, then print").unwrap();
    writeln!(file, "# a stray [ in prose must not open a loop").unwrap();
    file.flush().unwrap();

    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout("@\n");
}

#[test]
fn missing_code_prints_usage_and_exits_2() {
    cargo_bin()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn positional_code_conflicts_with_file_flag() {
    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg("whatever.bf")
        .arg("+++")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "cannot use positional code together with --file",
        ));
}

#[test]
fn unreadable_file_exits_1() {
    cargo_bin()
        .arg("run")
        .arg("--file")
        .arg("/no/such/file.bf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}

#[test]
fn run_help_exits_0() {
    cargo_bin()
        .arg("run")
        .arg("--help")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn top_level_help_exits_0() {
    cargo_bin()
        .arg("-h")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Usage").and(predicate::str::contains("repl")));
}
