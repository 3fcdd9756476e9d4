//! Byte-offset to line/character conversion.
//!
//! Extracted records carry both the byte span and the 0-indexed
//! line/character pair an editor needs to navigate to them.

use serde::{Deserialize, Serialize};

use crate::parsers::jsonc::Span;

/// A 0-indexed line/character position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Source location of one extracted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RangeInfo {
    pub start: Position,
    pub end: Position,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Line start offsets of a text, for repeated offset lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Convert a byte offset into a position.
    ///
    /// Characters are counted as Unicode scalar values. Offsets past the end
    /// clamp to the end of the text.
    pub fn position(&self, text: &str, byte_offset: usize) -> Position {
        let offset = byte_offset.min(text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let character = text
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());

        Position {
            line: line as u32,
            character: character as u32,
        }
    }

    /// Convert a byte span into a range
    pub fn range(&self, text: &str, span: Span) -> RangeInfo {
        RangeInfo {
            start: self.position(text, span.start),
            end: self.position(text, span.end),
            start_byte: span.start,
            end_byte: span.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_start() {
        let text = "hello";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 0), Position { line: 0, character: 0 });
    }

    #[test]
    fn test_position_same_line() {
        let text = "hello world";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 6), Position { line: 0, character: 6 });
    }

    #[test]
    fn test_position_after_newline() {
        let text = "line1\nline2\nline3";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 6), Position { line: 1, character: 0 });
        assert_eq!(index.position(text, 14), Position { line: 2, character: 2 });
    }

    #[test]
    fn test_position_counts_characters_not_bytes() {
        let text = "é\"x\"";
        let index = LineIndex::new(text);
        // 'é' is two bytes but one character
        assert_eq!(index.position(text, 3), Position { line: 0, character: 2 });
    }

    #[test]
    fn test_position_past_end_clamps() {
        let text = "ab\ncd";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 100), Position { line: 1, character: 2 });
    }

    #[test]
    fn test_range_keeps_byte_span() {
        let text = "{\n  \"a\": 1\n}";
        let index = LineIndex::new(text);
        let range = index.range(text, Span { start: 4, end: 7 });
        assert_eq!(range.start, Position { line: 1, character: 2 });
        assert_eq!(range.end, Position { line: 1, character: 5 });
        assert_eq!((range.start_byte, range.end_byte), (4, 7));
    }
}
