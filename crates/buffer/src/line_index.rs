// Chunk: docs/chunks/document - Text document with tags, style schemes and edit hooks

//! Line index for tracking line boundaries in a document.
//!
//! Maintains an array of line start offsets for O(1) line count and
//! O(log n) offset-to-line lookup. Updated incrementally on every splice.

/// Tracks line boundaries as character offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Character offsets where each line starts. `line_starts[0] == 0` always.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new line index with a single empty line.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Rebuilds the line index from the given content.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);

        let mut offset = 0;
        for ch in content {
            offset += 1;
            if ch == '\n' {
                self.line_starts.push(offset);
            }
        }
    }

    /// Returns the number of lines. There is always at least one.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the character offset where the given line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the offset of the end of the given line.
    ///
    /// For all lines except the last, this points at the newline character.
    /// For the last line, this equals `total_len`.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }

        if line + 1 < self.line_count() {
            Some(self.line_starts[line + 1] - 1)
        } else {
            Some(total_len)
        }
    }

    /// Returns the length of the given line (excluding the newline character).
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, total_len)?;
        Some(end - start)
    }

    /// Returns the line number containing the given character offset.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Updates the index after `text` was inserted at `offset`.
    pub fn apply_insert(&mut self, offset: usize, text: &str) {
        let line = self.line_at_offset(offset);

        let mut inserted = 0;
        let mut new_starts = Vec::new();
        for ch in text.chars() {
            inserted += 1;
            if ch == '\n' {
                new_starts.push(offset + inserted);
            }
        }
        if inserted == 0 {
            return;
        }

        for start in self.line_starts.iter_mut().skip(line + 1) {
            *start += inserted;
        }

        if !new_starts.is_empty() {
            let at = line + 1;
            self.line_starts.splice(at..at, new_starts);
        }
    }

    /// Updates the index after the characters in `[start, end)` were removed.
    pub fn apply_delete(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let removed = end - start;

        // A line start `s` in (start, end] sat right after a deleted newline.
        let first = self.line_starts.partition_point(|&s| s <= start);
        let last = self.line_starts.partition_point(|&s| s <= end);
        self.line_starts.drain(first..last);

        for s in &mut self.line_starts[first..] {
            *s -= removed;
        }
    }

    #[cfg(test)]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(text: &str) -> LineIndex {
        let mut index = LineIndex::new();
        index.rebuild(text.chars());
        index
    }

    #[test]
    fn test_new() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_start(0), Some(0));
    }

    #[test]
    fn test_rebuild_multiple_lines() {
        let index = index_of("hello\nworld\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(1), Some(6));
        assert_eq!(index.line_start(2), Some(12));
    }

    #[test]
    fn test_line_end_and_len() {
        let index = index_of("hello\nworld");
        assert_eq!(index.line_end(0, 11), Some(5));
        assert_eq!(index.line_end(1, 11), Some(11));
        assert_eq!(index.line_len(1, 11), Some(5));
        assert_eq!(index.line_end(2, 11), None);
    }

    #[test]
    fn test_line_at_offset() {
        let index = index_of("hello\nworld\nfoo");
        assert_eq!(index.line_at_offset(0), 0);
        assert_eq!(index.line_at_offset(5), 0); // '\n'
        assert_eq!(index.line_at_offset(6), 1);
        assert_eq!(index.line_at_offset(12), 2);
        assert_eq!(index.line_at_offset(99), 2);
    }

    // ==================== Incremental updates ====================

    #[test]
    fn test_apply_insert_without_newlines_shifts_following_lines() {
        let mut index = index_of("a\nb\nc");
        index.apply_insert(0, "xyz");
        assert_eq!(index.line_starts(), &[0, 5, 7]);
    }

    #[test]
    fn test_apply_insert_with_newlines() {
        let mut index = index_of("helloworld\nnext");
        index.apply_insert(5, "\nmid\n");
        assert_eq!(index.line_starts(), index_of("hello\nmid\nworld\nnext").line_starts());
    }

    #[test]
    fn test_apply_insert_at_line_start() {
        let mut index = index_of("ab\ncd");
        index.apply_insert(3, "x\n");
        assert_eq!(index.line_starts(), index_of("ab\nx\ncd").line_starts());
    }

    #[test]
    fn test_apply_delete_joining_lines() {
        let mut index = index_of("hello\nworld\nfoo");
        // Remove "o\nw"
        index.apply_delete(4, 7);
        assert_eq!(index.line_starts(), index_of("hellorld\nfoo").line_starts());
    }

    #[test]
    fn test_apply_delete_whole_lines() {
        let mut index = index_of("a\nb\nc\nd");
        index.apply_delete(2, 6);
        assert_eq!(index.line_starts(), index_of("a\nd").line_starts());
    }

    #[test]
    fn test_apply_delete_within_line() {
        let mut index = index_of("abcdef\ngh");
        index.apply_delete(1, 3);
        assert_eq!(index.line_starts(), &[0, 5]);
    }
}
