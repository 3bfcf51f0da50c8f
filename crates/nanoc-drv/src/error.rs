//! The driver's own error type (spec §7 `IoError`, plus the harness's
//! ground-truth and subprocess failures), aggregated behind `anyhow` at
//! the CLI boundary rather than matched on by callers.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lex(#[from] nanoc_lex::LexError),

    #[error(transparent)]
    Parse(#[from] nanoc_par::ParseError),

    #[error(transparent)]
    Sem(#[from] nanoc_sem::SemError),

    #[error(transparent)]
    Interp(#[from] nanoc_interp::InterpError),

    #[error(transparent)]
    Ir(#[from] nanoc_ir::IrError),

    #[error("failed to run `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {status}")]
    SubprocessFailed { command: String, status: i32 },

    #[error("test cache file is corrupt: {0}")]
    CorruptCache(String),
}

impl DriverError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DriverError::Io {
            path: path.into(),
            source,
        }
    }
}
