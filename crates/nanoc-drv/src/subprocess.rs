//! Subprocess runner (spec §6.3): shells out to an external assembler/
//! linker to turn emitted AT&T text into an executable (spec's explicit
//! "no linker; the assembler and linker are delegated"), and to an
//! external reference C compiler for the ground-truth cross-check
//! (spec §8 invariant 4), matching `original_source/++c/test.cpp`'s
//! `get_clang_ground_truth` which shells out via `system(...)`.

use crate::error::DriverError;
use std::path::Path;
use std::process::Command;

/// Run `command` with `args`, inheriting stdio, and return its exit
/// code. A negative code means the child was killed by a signal.
pub fn run(command: &str, args: &[&str]) -> Result<i32, DriverError> {
    log::debug!("running `{command} {}`", args.join(" "));
    let status = Command::new(command)
        .args(args)
        .status()
        .map_err(|source| DriverError::SpawnFailed {
            command: command.to_string(),
            source,
        })?;
    Ok(status.code().unwrap_or(-1))
}

/// Assemble and link `asm_text` into an executable at `output` using an
/// external compiler driver (`cc`, `clang`, ...) as the assembler and
/// linker, via a temporary `.s` file.
pub fn assemble_and_link(cc: &str, asm_text: &str, output: &Path) -> Result<(), DriverError> {
    let asm_path = output.with_extension("s");
    std::fs::write(&asm_path, asm_text).map_err(|e| DriverError::io(&asm_path, e))?;

    let code = run(
        cc,
        &[
            asm_path.to_str().expect("non-utf8 temp path"),
            "-o",
            output.to_str().expect("non-utf8 output path"),
        ],
    )?;
    let _ = std::fs::remove_file(&asm_path);

    if code != 0 {
        return Err(DriverError::SubprocessFailed {
            command: format!("{cc} {}", asm_path.display()),
            status: code,
        });
    }
    Ok(())
}

/// Run a produced executable and return its exit code.
pub fn run_executable(path: &Path) -> Result<i32, DriverError> {
    run(path.to_str().expect("non-utf8 executable path"), &[])
}

/// Compile `source_path` directly with the reference compiler and run
/// the result, returning its exit code. Used only as the ground-truth
/// side of the harness comparison (spec §8 invariant 4) - never as part
/// of the core pipeline.
pub fn ground_truth(cc: &str, source_path: &Path) -> Result<i32, DriverError> {
    let dir = tempfile::tempdir().map_err(|e| DriverError::io(source_path, e))?;
    let exe = dir.path().join("ground_truth.out");
    let code = run(
        cc,
        &[
            source_path.to_str().expect("non-utf8 source path"),
            "-o",
            exe.to_str().expect("non-utf8 temp path"),
        ],
    )?;
    if code != 0 {
        return Err(DriverError::SubprocessFailed {
            command: format!("{cc} {}", source_path.display()),
            status: code,
        });
    }
    run_executable(&exe)
}
