//! Directory iteration (spec §6.3's "directory iterator" collaborator),
//! grounded on `original_source/++c/dir.cpp`'s `dopen`/`dnext`/`dendswith`
//! walk: recurse into subdirectories, match files by suffix, and keep
//! each directory's entries in the order the filesystem hands them back
//! (spec §5 "Ordering": "tests process files in directory-enumeration
//! order"). `std::fs::read_dir` is the Rust analogue of `FindFirstFileA`/
//! `FindNextFileA`, so this is a thin, portable rewrite rather than a
//! reimplementation of the Win32 calls themselves.

use std::io;
use std::path::{Path, PathBuf};

/// Recursively collect every file under `root` whose name ends with
/// `suffix` (e.g. `".c"`), descending into subdirectories as they are
/// encountered.
pub fn collect_files(root: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk(root, suffix, &mut out)?;
    Ok(out)
}

fn walk(dir: &Path, suffix: &str, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, suffix, out)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
        {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_c_files_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.c"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("b.c"), "").unwrap();

        let mut files = collect_files(dir.path(), ".c").unwrap();
        files.sort();
        let mut names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.c", "b.c"]);
    }
}
