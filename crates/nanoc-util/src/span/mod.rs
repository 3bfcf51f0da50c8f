//! Source location tracking.
//!
//! A [`Span`] is a byte range plus the line/column of its start, kept on
//! every token and most AST nodes purely for diagnostics (spec: "retained
//! only for diagnostics" — nothing in lexing, parsing or codegen branches
//! on a span's value).

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// Identifies a file registered with a [`SourceMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    pub const DUMMY: FileId = FileId(usize::MAX);
}

impl Default for FileId {
    fn default() -> Self {
        Self::DUMMY
    }
}

/// A byte range in a source file, with human-readable line/column of the
/// start offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(file: FileId, start: u32, end: u32, line: u32, column: u32) -> Self {
        Self {
            file,
            start,
            end,
            line,
            column,
        }
    }

    /// A zero-length span at `start`, used for synthetic diagnostics that
    /// have no real source extent (e.g. "missing return" at end of body).
    pub fn point(file: FileId, start: u32, line: u32, column: u32) -> Self {
        Self::new(file, start, start, line, column)
    }

    /// Smallest span covering both `self` and `other`. Used to widen a
    /// span from a sub-expression up to its enclosing statement.
    pub fn to(self, other: Span) -> Span {
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
        }
    }
}
