//! nanoc-util - shared infrastructure for the nanoc pipeline.
//!
//! Every other crate in the workspace depends on this one. It owns the
//! two pieces of state every compiler phase needs and none of them
//! should own independently: interned identifiers ([`symbol`]) and
//! source locations ([`span`]).
//!
//! Nothing here is specific to the C subset nanoc compiles; it is the
//! same kind of ambient layer a lexer, parser, resolver, interpreter and
//! code generator all sit on top of.

pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use error::{SourceMapError, SymbolError};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
