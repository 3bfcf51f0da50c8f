//! Pipeline-level E2E tests that don't require an external C toolchain:
//! `--emit tokens`/`ast`/`asm` as text, and `interp`'s process exit code.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn nanoc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nanoc"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn interp_prints_and_exits_with_the_return_value() {
    nanoc()
        .arg("interp")
        .arg(fixture("return_const.c"))
        .assert()
        .success()
        .code(2)
        .stdout(predicate::str::contains("2"));
}

#[test]
fn interp_runs_recursive_fibonacci() {
    nanoc()
        .arg("interp")
        .arg(fixture("fib.c"))
        .assert()
        .success()
        .code(21);
}

#[test]
fn interp_reports_a_parse_error_and_fails() {
    nanoc()
        .arg("interp")
        .arg(fixture("bad_syntax.c"))
        .assert()
        .failure();
}

#[test]
fn interp_reports_an_undeclared_identifier() {
    nanoc()
        .arg("interp")
        .arg(fixture("undeclared.c"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("undeclared"));
}

#[test]
fn build_emit_tokens_lists_keyword_and_int_literal_tokens() {
    nanoc()
        .arg("build")
        .arg(fixture("return_const.c"))
        .arg("--emit")
        .arg("tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("KwReturn"))
        .stdout(predicate::str::contains("IntLiteral"));
}

#[test]
fn build_emit_ast_prints_a_function_def_node() {
    nanoc()
        .arg("build")
        .arg(fixture("return_const.c"))
        .arg("--emit")
        .arg("ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("FunctionDef"));
}

#[test]
fn build_emit_asm_contains_the_expected_frame_and_return() {
    nanoc()
        .arg("build")
        .arg(fixture("return_const.c"))
        .arg("--emit")
        .arg("asm")
        .assert()
        .success()
        .stdout(predicate::str::contains(".globl main"))
        .stdout(predicate::str::contains("mov $2, %rax"));
}

#[test]
fn build_emit_ir_asm_handles_a_literal_return() {
    nanoc()
        .arg("build")
        .arg(fixture("return_const.c"))
        .arg("--emit")
        .arg("ir-asm")
        .assert()
        .success();
}

#[test]
fn build_writes_output_to_a_file_when_given_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.s");

    nanoc()
        .arg("build")
        .arg(fixture("return_const.c"))
        .arg("--emit")
        .arg("asm")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.contains(".globl main"));
}
