/// In-memory text document model: positions, ranges and lines.
///
/// Positions are zero-based `(line, character)` pairs; characters are counted
/// in Unicode scalar values.
use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether `position` lies within this range, both ends inclusive.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

/// One row of a [`TextDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub line_number: u32,
    pub text: String,
    pub range_including_line_break: Range,
}

impl TextLine {
    #[must_use]
    pub fn is_empty_or_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub uri: String,
    lines: Vec<TextLine>,
}

impl TextDocument {
    /// Build a document from raw text. `\n` and `\r\n` both terminate lines;
    /// a trailing terminator produces a final empty line.
    pub fn new(uri: impl Into<String>, text: &str) -> Self {
        let raw: Vec<&str> = text.split('\n').collect();
        let last = raw.len() - 1;

        let lines = raw
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let row = row.strip_suffix('\r').unwrap_or(row);
                let line_number = idx as u32;
                let end = if idx == last {
                    Position::new(line_number, row.chars().count() as u32)
                } else {
                    Position::new(line_number + 1, 0)
                };
                TextLine {
                    line_number,
                    text: row.to_string(),
                    range_including_line_break: Range::new(Position::new(line_number, 0), end),
                }
            })
            .collect();

        Self {
            uri: uri.into(),
            lines,
        }
    }

    /// Load a document from disk; the URI is the `file://` form of the absolute path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document: {}", path.display()))?;
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let uri = format!("file://{}", absolute.to_string_lossy().replace('\\', "/"));
        Ok(Self::new(uri, &text))
    }

    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    #[must_use]
    pub fn line_at(&self, line: u32) -> Option<&TextLine> {
        self.lines.get(line as usize)
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
