//! Ground-truth harness tests. These shell out to a real C compiler
//! (`cc` on `PATH`) to assemble nanoc's output and to derive the
//! ground-truth exit codes, so they're `#[ignore]`d by default - run
//! with `cargo test -- --ignored` on a machine with a C toolchain.

use assert_cmd::Command;
use std::path::PathBuf;

fn nanoc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nanoc"))
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
#[ignore = "requires a C toolchain (cc) on PATH"]
fn build_assemble_produces_a_runnable_executable_matching_the_interpreter() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("return_const");

    nanoc()
        .arg("build")
        .arg(fixtures_dir().join("return_const.c"))
        .arg("--emit")
        .arg("asm")
        .arg("--assemble")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let status = std::process::Command::new(&out).status().unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
#[ignore = "requires a C toolchain (cc) on PATH"]
fn test_subcommand_agrees_with_the_reference_compiler_over_the_fixture_tree() {
    nanoc()
        .arg("test")
        .arg(fixtures_dir().join("valid"))
        .arg("--no-cache")
        .assert()
        .success();
}
