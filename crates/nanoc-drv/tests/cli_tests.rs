//! CLI surface tests: help/version output and argument validation,
//! using the workspace's usual `assert_cmd` + `predicates` e2e style.

use assert_cmd::Command;
use predicates::prelude::*;

fn nanoc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nanoc"))
}

#[test]
fn help_lists_the_three_subcommands() {
    nanoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("interp"))
        .stdout(predicate::str::contains("test"));
}

#[test]
fn version_flag_succeeds() {
    nanoc().arg("--version").assert().success();
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    nanoc().assert().failure();
}

#[test]
fn build_on_a_nonexistent_file_fails_with_a_readable_message() {
    nanoc()
        .arg("build")
        .arg("does-not-exist.c")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn assemble_without_asm_emit_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("t.c");
    std::fs::write(&input, "int main(void) { return 0; }").unwrap();

    nanoc()
        .arg("build")
        .arg(&input)
        .arg("--emit")
        .arg("tokens")
        .arg("--assemble")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--assemble"));
}
