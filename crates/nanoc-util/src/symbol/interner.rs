//! The process-wide string table backing [`Symbol`](super::Symbol).
//!
//! The compiler is strictly single-threaded (every pipeline phase runs to
//! completion on the calling thread before the next one starts), so the
//! table only needs to be safe to initialize once and read from
//! thereafter; it does not need a lock-free concurrent map. A single
//! `Mutex` around an `FxHashMap` is enough and keeps the dependency list
//! short.
//!
//! Interned strings are leaked to obtain `'static` references. This is
//! acceptable because the table lives for the entire process and entries
//! are never removed.

use rustc_hash::FxHashMap;
use std::sync::{Mutex, OnceLock};

struct StringTable {
    strings: Vec<&'static str>,
    indices: FxHashMap<&'static str, u32>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            indices: FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.indices.get(s) {
            return idx;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = self.strings.len() as u32;
        self.strings.push(leaked);
        self.indices.insert(leaked, idx);
        idx
    }

    fn resolve(&self, idx: u32) -> &'static str {
        self.strings[idx as usize]
    }
}

fn table() -> &'static Mutex<StringTable> {
    static TABLE: OnceLock<Mutex<StringTable>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(StringTable::new()))
}

pub(super) fn intern(s: &str) -> u32 {
    table().lock().unwrap().intern(s)
}

pub(super) fn resolve(idx: u32) -> &'static str {
    table().lock().unwrap().resolve(idx)
}
