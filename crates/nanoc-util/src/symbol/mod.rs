//! Interned identifiers.
//!
//! [`Symbol`] is a 4-byte handle into a process-wide string table.
//! Two symbols compare equal iff they were interned from equal byte
//! sequences, and that comparison is a single integer compare rather
//! than a string compare.
//!
//! ```
//! use nanoc_util::Symbol;
//!
//! let a = Symbol::intern("count");
//! let b = Symbol::intern("count");
//! let c = Symbol::intern("total");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(a.as_str(), "count");
//! ```

mod interner;

use std::fmt;

/// A handle to an interned string. Cheap to copy, cheap to compare.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `s`, returning the same `Symbol` for equal byte sequences.
    /// Idempotent: interning the same string twice yields the same handle.
    pub fn intern(s: &str) -> Self {
        Symbol(interner::intern(s))
    }

    /// The original string. O(1): the table stores the leaked `&'static str`
    /// directly, no reconstruction needed.
    pub fn as_str(self) -> &'static str {
        interner::resolve(self.0)
    }

    /// The raw table index. Only meaningful for debugging.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static_assertions::assert_impl_all!(Symbol: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_spelling_interns_to_same_symbol() {
        assert_eq!(Symbol::intern("foo"), Symbol::intern("foo"));
    }

    #[test]
    fn different_spellings_intern_differently() {
        assert_ne!(Symbol::intern("foo"), Symbol::intern("bar"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let s = Symbol::intern("fibonacci");
        assert_eq!(s.as_str(), "fibonacci");
    }

    #[test]
    fn interning_is_idempotent_under_repetition() {
        let first = Symbol::intern("x");
        for _ in 0..100 {
            assert_eq!(Symbol::intern("x"), first);
        }
    }
}
