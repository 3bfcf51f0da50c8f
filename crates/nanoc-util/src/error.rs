//! Error types shared by the lower layers of `nanoc-util`.

use thiserror::Error;

/// Error type for symbol interning operations.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("symbol not found: index {index}")]
    NotFound { index: u32 },
}

/// Error type for source map lookups.
#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("span out of bounds: file has {file_len} bytes, span is {start}..{end}")]
    SpanOutOfBounds {
        file_len: usize,
        start: usize,
        end: usize,
    },
}
