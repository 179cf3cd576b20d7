// Chunk: docs/chunks/document - Text document with tags, style schemes and edit hooks

//! Offset-addressed text storage.
//!
//! `TextBuffer` pairs a [`GapBuffer`] with a [`LineIndex`] and keeps them in
//! sync across splices. It knows nothing about tags or observers; those live
//! on [`Document`](crate::Document), which wraps a `TextBuffer`.
//!
//! Every mutation bumps [`revision`](TextBuffer::revision) so consumers that
//! cache derived state (parse trees, for instance) can detect staleness.

use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::types::Position;

/// Document text with line bookkeeping.
#[derive(Debug, Default)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    revision: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text buffer initialized with the given content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.chars());

        Self {
            buffer: GapBuffer::from_str(content),
            line_index,
            revision: 0,
        }
    }

    // ==================== Accessors ====================

    /// Returns the total character count.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Returns the offset at which `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_index.line_start(line)
    }

    /// Returns the offset of the end of `line`, excluding its newline.
    pub fn line_end(&self, line: usize) -> Option<usize> {
        self.line_index.line_end(line, self.len())
    }

    /// Returns the length of the specified line (excluding newline).
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index.line_len(line, self.len()).unwrap_or(0)
    }

    /// Returns the line containing `offset`. Offsets past the end map to the
    /// last line.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.line_index.line_at_offset(offset.min(self.len()))
    }

    /// Returns the content of the specified line without its newline.
    ///
    /// Returns an empty string if the line is out of bounds.
    pub fn line_content(&self, line: usize) -> String {
        match (self.line_start(line), self.line_end(line)) {
            (Some(start), Some(end)) => self.buffer.slice(start, end),
            _ => String::new(),
        }
    }

    /// Converts a character offset to a (line, column) position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len());
        let line = self.line_index.line_at_offset(offset);
        let start = self.line_index.line_start(line).unwrap_or(0);
        Position::new(line, offset - start)
    }

    /// Converts a (line, column) position to a character offset.
    ///
    /// Lines past the end clamp to the document end; columns clamp to the
    /// line length.
    pub fn position_to_offset(&self, pos: Position) -> usize {
        match self.line_start(pos.line) {
            Some(start) => start + pos.col.min(self.line_len(pos.line)),
            None => self.len(),
        }
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer.char_at(offset)
    }

    /// Iterates the characters in `[start, end)`.
    pub fn chars_range(&self, start: usize, end: usize) -> impl Iterator<Item = char> + '_ {
        self.buffer.chars_range(start, end)
    }

    /// Iterates all characters.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.buffer.chars()
    }

    /// Returns `[start, end)` as a string (clamped).
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.buffer.slice(start, end)
    }

    /// Returns the whole content as a string.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    // ==================== Mutations ====================

    /// Inserts `text` at `offset` (clamped to the length).
    ///
    /// Returns the number of characters inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let offset = offset.min(self.len());
        let inserted = self.buffer.insert_at(offset, text);
        if inserted > 0 {
            self.line_index.apply_insert(offset, text);
            self.revision += 1;
            self.assert_line_index_consistent();
        }
        inserted
    }

    /// Removes `[start, end)` (clamped to the length).
    ///
    /// Returns the number of characters removed.
    pub fn delete(&mut self, start: usize, end: usize) -> usize {
        let end = end.min(self.len());
        if start >= end {
            return 0;
        }
        let removed = self.buffer.delete_range(start, end);
        self.line_index.apply_delete(start, end);
        self.revision += 1;
        self.assert_line_index_consistent();
        removed
    }

    /// Replaces the whole content.
    pub fn set_content(&mut self, content: &str) {
        self.buffer = GapBuffer::from_str(content);
        self.line_index.rebuild(content.chars());
        self.revision += 1;
    }

    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&self) {
        // Sampling keeps large edits in debug builds affordable.
        if self.revision % 1024 != 0 {
            return;
        }
        let mut expected = LineIndex::new();
        expected.rebuild(self.buffer.chars());
        debug_assert_eq!(
            expected.line_count(),
            self.line_index.line_count(),
            "line index out of sync with buffer content"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&self) {}
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.buffer, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Accessors ====================

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_content(0), "");
        assert_eq!(buf.revision(), 0);
    }

    #[test]
    fn test_line_content() {
        let buf = TextBuffer::from_str("fn main() {\n    body\n}");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_content(1), "    body");
        assert_eq!(buf.line_content(2), "}");
        assert_eq!(buf.line_content(3), "");
    }

    #[test]
    fn test_offset_position_conversion() {
        let buf = TextBuffer::from_str("ab\ncde\nf");
        assert_eq!(buf.offset_to_position(0), Position::new(0, 0));
        assert_eq!(buf.offset_to_position(2), Position::new(0, 2));
        assert_eq!(buf.offset_to_position(3), Position::new(1, 0));
        assert_eq!(buf.offset_to_position(8), Position::new(2, 1));
        assert_eq!(buf.position_to_offset(Position::new(1, 2)), 5);
        assert_eq!(buf.position_to_offset(Position::new(1, 99)), 6);
        assert_eq!(buf.position_to_offset(Position::new(9, 0)), 8);
    }

    // ==================== Mutations ====================

    #[test]
    fn test_insert_and_delete_keep_lines_in_sync() {
        let mut buf = TextBuffer::from_str("hello world");
        buf.insert(5, ",\nbig");
        assert_eq!(buf.content(), "hello,\nbig world");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_content(1), "big world");

        buf.delete(5, 10);
        assert_eq!(buf.content(), "hello world");
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_revision_bumps_only_on_change() {
        let mut buf = TextBuffer::from_str("abc");
        buf.insert(1, "");
        buf.delete(2, 2);
        assert_eq!(buf.revision(), 0);

        buf.insert(1, "x");
        buf.delete(0, 1);
        assert_eq!(buf.revision(), 2);
    }

    #[test]
    fn test_insert_clamps_offset() {
        let mut buf = TextBuffer::from_str("ab");
        assert_eq!(buf.insert(10, "c"), 1);
        assert_eq!(buf.content(), "abc");
    }

    #[test]
    fn test_set_content() {
        let mut buf = TextBuffer::from_str("old");
        buf.set_content("new\ntext");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.revision(), 1);
    }
}
