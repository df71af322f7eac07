//! Byte spans into the raw text a statement was parsed from.
//!
//! The parser reports token positions as 1-based `(line, column)` pairs where
//! columns count characters. Rewrites splice into the original string, so those
//! positions are converted to byte offsets here.
use sqlparser::tokenizer::{Location, Span};

/// A byte range with inclusive start and exclusive end.
///
/// Offsets always refer to the *original* SQL string the statement was parsed
/// from.
///
/// Invariants:
/// - `end >= start`
/// - `[start, end)` is a valid slice range for the original input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Resolve a parser span against the text it was produced from.
    ///
    /// Returns `None` for the empty span the parser uses when a node has no
    /// source position, or when the span does not fit the text.
    pub fn resolve(text: &str, span: Span) -> Option<Self> {
        let start = byte_offset(text, span.start)?;
        let end = byte_offset(text, span.end)?;
        (end > start).then_some(Self { start, end })
    }

    /// Byte length of this span (`end - start`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the span's length is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the byte offset lies within this span. End is exclusive.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Convert a 1-based `(line, column)` location into a byte offset.
///
/// Lines advance on `\n` only and every other character, `\r` included,
/// advances the column, which is how the tokenizer counts.
fn byte_offset(text: &str, location: Location) -> Option<usize> {
    if location.line == 0 || location.column == 0 {
        return None;
    }
    let (mut line, mut column) = (1u64, 1u64);
    for (offset, c) in text.char_indices() {
        if (line, column) == (location.line, location.column) {
            return Some(offset);
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    ((line, column) == (location.line, location.column)).then_some(text.len())
}
