//! Source buffer and span tracking.

use std::fmt;
use std::path::{Path, PathBuf};

/// A loaded source file, split into lines once at construction time.
///
/// The lexer and diagnostics both index into this by 1-based line number;
/// neither re-reads the file or re-splits it after load.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
    /// Byte offsets where each line starts, index 0 == line 1.
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Loads `path` into memory, recording line start offsets.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path)?;
        Ok(Self::from_string(path, content))
    }

    /// Builds a `SourceFile` directly from in-memory text (used by tests).
    pub fn from_string(path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            path,
            content,
            line_starts,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the number of lines in the file (at least 1, even if empty).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of 1-based `line`, without its trailing newline.
    pub fn line(&self, line: u32) -> &str {
        let idx = line.saturating_sub(1) as usize;
        let start = *self.line_starts.get(idx).unwrap_or(&self.content.len());
        let end = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.content.len());
        self.content[start..end].trim_end_matches(['\n', '\r'])
    }

    /// Returns the text of 1-based `line` with leading/trailing whitespace
    /// stripped, for use in diagnostic output (spec.md §7).
    pub fn snippet(&self, line: u32) -> &str {
        self.line(line).trim()
    }
}

/// A 1-based source line, used to tag tokens and diagnostics.
///
/// corec's grammar never needs a byte range for anything beyond error
/// display, so a `Span` carries only the line — this mirrors
/// `lib/errors.py` in the original implementation, which reports only a
/// line number per diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub line: u32,
}

impl Span {
    pub const fn new(line: u32) -> Self {
        Self { line }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_lookup() {
        let f = SourceFile::from_string("t.src".into(), "a\nbb\nccc".to_string());
        assert_eq!(f.line_count(), 3);
        assert_eq!(f.line(1), "a");
        assert_eq!(f.line(2), "bb");
        assert_eq!(f.line(3), "ccc");
    }

    #[test]
    fn snippet_trims_whitespace() {
        let f = SourceFile::from_string("t.src".into(), "   x := 1;   \n".to_string());
        assert_eq!(f.snippet(1), "x := 1;");
    }

    #[test]
    fn empty_file_has_one_line() {
        let f = SourceFile::from_string("t.src".into(), String::new());
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.line(1), "");
    }
}
