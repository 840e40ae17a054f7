//! Source positions and spans.
//!
//! Tokens and AST nodes carry a [`Span`] made of two [`Position`]s. Each
//! position records a 1-based line and column together with the byte offset
//! into the source text, so consumers never have to rescan the source to
//! report a location. The file name is not repeated on every position; it is
//! attached once per file and combined with a position on demand through
//! [`SourceLocation`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A point in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column, counted in characters
    pub column: u32,
    /// Byte offset from start of file
    pub offset: u32,
}

impl Position {
    /// The first character of a file.
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };

    #[must_use]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A `(start, end)` pair delimiting the text a token or node came from.
///
/// `end` is the position just past the last character, so an empty span has
/// `start == end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// A zero-length span at `pos`.
    #[must_use]
    pub const fn empty_at(pos: Position) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// The smallest span that contains both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Span) -> Span {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }

    /// Returns a span starting at `self.start` and ending at `end.end`.
    #[must_use]
    pub fn to(self, end: Span) -> Span {
        Span {
            start: self.start,
            end: end.end,
        }
    }

    /// Whether `other` lies entirely within `self`.
    #[must_use]
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice the covered text out of `source`. Out-of-range spans yield "".
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start.offset as usize..self.end.offset as usize)
            .unwrap_or("")
    }

    /// Attach a file name to the start of this span.
    #[must_use]
    pub fn locate(&self, filename: &Arc<str>) -> SourceLocation {
        SourceLocation {
            filename: Arc::clone(filename),
            position: self.start,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A position qualified with the name of the file it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: Arc<str>,
    #[serde(flatten)]
    pub position: Position,
}

impl SourceLocation {
    pub fn new(filename: impl Into<Arc<str>>, position: Position) -> Self {
        SourceLocation {
            filename: filename.into(),
            position,
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn offset(&self) -> u32 {
        self.position.offset
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.position)
    }
}

/// Line map for offset -> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            } else if b == b'\r' && bytes.get(i + 1) != Some(&b'\n') {
                // \r followed by \n - the \n will create the line start
                line_starts.push((i + 1) as u32);
            }
        }

        LineMap { line_starts }
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset at which 1-indexed `line` starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = (line as usize).checked_sub(1)?;
        self.line_starts.get(idx).copied()
    }

    /// Convert a byte offset to a 1-based line/column position.
    pub fn position_at(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let column = source.get(start..clamped_end).unwrap_or("").chars().count() as u32;

        Position {
            line: line as u32 + 1,
            column: column + 1,
            offset: clamped_end as u32,
        }
    }
}
