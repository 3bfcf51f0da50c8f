//! nanoc-drv - the compiler driver and ground-truth test harness (spec
//! component C9), plus the CLI, logging, and configuration layer that
//! sits on top of the rest of the workspace.
//!
//! Three entry points, one per spec §6.3 responsibility:
//! - [`pipeline::render`] / [`pipeline::interpret`] drive a single file
//!   through lex → parse → resolve → {interp, AST codegen, IR codegen}.
//! - [`harness::run`] walks a directory of fixtures and cross-checks the
//!   interpreter, the codegen's assembled output, and an external
//!   reference compiler against each other.
//! - [`cli::Cli`] is the `clap` surface `main.rs` parses and dispatches.

pub mod cache;
pub mod cli;
pub mod dirwalk;
pub mod error;
pub mod harness;
pub mod pipeline;
pub mod subprocess;
pub mod timer;

pub use cli::{Cli, Command};
pub use error::DriverError;
pub use pipeline::Emit;
