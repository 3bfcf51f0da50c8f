//! Registry of source files, used to turn a byte offset back into a
//! line/column pair and to print a one-line snippet for a diagnostic.

use super::FileId;
use crate::error::SourceMapError;
use std::path::PathBuf;

/// A single registered source file plus the offsets of each line start,
/// computed once so later line/column lookups are a binary search
/// instead of a rescan.
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(path: PathBuf, contents: String) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in contents.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self {
            path,
            contents,
            line_starts,
        }
    }

    /// 1-based (line, column) for a byte offset into this file.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        (line_idx as u32 + 1, offset - line_start + 1)
    }

    /// The text of the line containing `offset`, without its trailing
    /// newline. Used to render the source snippet under a diagnostic.
    pub fn line_text(&self, offset: u32) -> &str {
        let (line, _) = self.line_col(offset);
        let start = self.line_starts[(line - 1) as usize] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map(|&e| e as usize - 1)
            .unwrap_or(self.contents.len());
        self.contents[start..end].trim_end_matches('\r')
    }
}

/// Owns every source file loaded during a compilation.
#[derive(Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    pub fn add_file(&mut self, path: PathBuf, contents: String) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile::new(path, contents));
        id
    }

    pub fn get(&self, id: FileId) -> Result<&SourceFile, SourceMapError> {
        self.files
            .get(id.0)
            .ok_or_else(|| SourceMapError::FileNotFound(format!("{:?}", id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| (FileId(i), f))
    }
}
