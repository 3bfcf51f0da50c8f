//! Command-line surface: `clap`'s derive API, the convention this
//! workspace's compiler CLIs share.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::Emit;

#[derive(Parser)]
#[command(name = "nanoc", version, about = "A small ahead-of-time compiler for a C subset")]
pub struct Cli {
    /// Trace each pipeline phase to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a single source file (spec component C6/C7).
    Build {
        /// Input source file.
        input: PathBuf,

        /// What to emit.
        #[arg(long, value_enum, default_value = "asm")]
        emit: Emit,

        /// Output path. Defaults to stdout for text emit kinds, or the
        /// input's stem for `--assemble`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Assemble and link the emitted assembly into an executable
        /// using `--cc` (only valid with `--emit asm` or `--emit
        /// ir-asm`).
        #[arg(long)]
        assemble: bool,

        /// External compiler driver used as the assembler/linker (spec:
        /// "no linker; the assembler and linker are delegated").
        #[arg(long, default_value = "cc")]
        cc: String,
    },

    /// Run a single source file through the tree-walking interpreter
    /// and print its exit code (spec component C5).
    Interp {
        /// Input source file.
        input: PathBuf,
    },

    /// Run the ground-truth comparison harness over a directory tree of
    /// `.c` fixtures (spec component C9).
    Test {
        /// Directory to search for `.c` fixtures.
        #[arg(default_value = ".")]
        test_dir: PathBuf,

        /// External reference compiler invoked for the ground-truth
        /// cross-check.
        #[arg(long, default_value = "cc")]
        cc: String,

        /// Ignore `tests.cache` and re-derive every ground-truth result.
        #[arg(long)]
        no_cache: bool,
    },
}
