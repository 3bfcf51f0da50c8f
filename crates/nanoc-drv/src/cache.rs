//! Test-result cache (spec §6.3): a persistent `u32 -> i32` map from a
//! hashed source path to its expected exit code, backed by a flat binary
//! file of fixed-size records. Ported record-for-record from
//! `original_source/++c/test_cache.c`: same FNV-1a hash constants, same
//! 8-byte `{path_hash: u32, exit_code: i32}` record, same
//! append-on-miss/whole-file load-and-save shape - only the storage is
//! rewritten idiomatically (a `Vec` plus `std::fs`, no `realloc`).

use std::io;
use std::path::Path;

const RECORD_SIZE: usize = 8;
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// FNV-1a hash of a path's string form, matching
/// `test_cache_path_hash` in the original harness byte for byte.
pub fn path_hash(path: &Path) -> u32 {
    let bytes = path.to_string_lossy();
    let mut h = FNV_OFFSET_BASIS;
    for b in bytes.bytes() {
        h = h.wrapping_mul(FNV_PRIME) ^ b as u32;
    }
    h
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CachedResult {
    path_hash: u32,
    exit_code: i32,
}

/// In-memory view of `tests.cache`, loaded once per harness run and
/// saved back at the end.
#[derive(Default)]
pub struct TestCache {
    entries: Vec<CachedResult>,
    misses: u32,
}

impl TestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache file. A missing file is treated as an empty cache,
    /// matching `load_test_results`'s silent `fopen_s` failure path.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e),
        };
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "test cache {} has {} bytes, not a multiple of {RECORD_SIZE}",
                    path.display(),
                    bytes.len()
                ),
            ));
        }

        let entries = bytes
            .chunks_exact(RECORD_SIZE)
            .map(|rec| CachedResult {
                path_hash: u32::from_le_bytes(rec[0..4].try_into().unwrap()),
                exit_code: i32::from_le_bytes(rec[4..8].try_into().unwrap()),
            })
            .collect();

        Ok(Self {
            entries,
            misses: 0,
        })
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(self.entries.len() * RECORD_SIZE);
        for rec in &self.entries {
            bytes.extend_from_slice(&rec.path_hash.to_le_bytes());
            bytes.extend_from_slice(&rec.exit_code.to_le_bytes());
        }
        std::fs::write(path, bytes)
    }

    /// Look up a cached exit code by hash, bumping the miss counter on a
    /// miss just as `get_cached_test_result` does.
    pub fn get(&mut self, hash: u32) -> Option<i32> {
        let hit = self.entries.iter().find(|e| e.path_hash == hash).map(|e| e.exit_code);
        if hit.is_none() {
            self.misses += 1;
        }
        hit
    }

    pub fn insert(&mut self, hash: u32, exit_code: i32) {
        self.entries.push(CachedResult {
            path_hash: hash,
            exit_code,
        });
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("tests.cache");

        let mut cache = TestCache::new();
        cache.insert(42, 7);
        cache.insert(99, -1);
        cache.save(&cache_path).unwrap();

        let mut loaded = TestCache::load(&cache_path).unwrap();
        assert_eq!(loaded.get(42), Some(7));
        assert_eq!(loaded.get(99), Some(-1));
        assert_eq!(loaded.get(1), None);
        assert_eq!(loaded.misses(), 1);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TestCache::load(&dir.path().join("missing.cache")).unwrap();
        assert_eq!(cache.entries.len(), 0);
    }

    #[test]
    fn hash_matches_fnv1a_32() {
        // FNV-1a of the empty string is the offset basis itself.
        assert_eq!(path_hash(Path::new("")), FNV_OFFSET_BASIS);
    }
}
