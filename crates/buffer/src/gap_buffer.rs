// Chunk: docs/chunks/document - Text document with tags, style schemes and edit hooks

//! Gap buffer storage for document text.
//!
//! A gap buffer is a character array with a movable gap at the last edit
//! position. Edits near the gap are cheap; moving the gap is O(distance),
//! which amortizes well because edits tend to cluster.
//!
//! All positions are character (Unicode scalar) offsets.

const INITIAL_GAP_SIZE: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// Character storage with a movable gap.
#[derive(Debug)]
pub struct GapBuffer {
    /// [pre-gap content | gap | post-gap content]
    data: Vec<char>,
    /// First unused slot.
    gap_start: usize,
    /// First used slot after the gap.
    gap_end: usize,
}

impl GapBuffer {
    /// Creates a new empty gap buffer.
    pub fn new() -> Self {
        Self {
            data: vec!['\0'; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
        }
    }

    /// Creates a gap buffer initialized with the given text.
    pub fn from_str(text: &str) -> Self {
        let mut data: Vec<char> = text.chars().collect();
        let len = data.len();
        let capacity = len + INITIAL_GAP_SIZE;
        data.resize(capacity, '\0');

        Self {
            data,
            gap_start: len,
            gap_end: capacity,
        }
    }

    /// Returns the logical length of the buffer (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Moves the gap to the specified logical position (clamped to the length).
    pub fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grows the gap in place to at least `min_size` slots.
    ///
    /// The gap position is preserved; `insert_at` relies on the gap staying
    /// where `move_gap_to` left it.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }

        let needed = min_size - self.gap_len();
        let growth = needed.max(self.data.len() * GAP_GROWTH_FACTOR);

        let old_gap_end = self.gap_end;
        let old_len = self.data.len();
        let post_gap_len = old_len - old_gap_end;

        let new_size = old_len + growth;
        self.data.resize(new_size, '\0');

        if post_gap_len > 0 {
            self.data
                .copy_within(old_gap_end..old_len, new_size - post_gap_len);
        }

        self.gap_end = new_size - post_gap_len;
    }

    /// Inserts `text` at logical position `pos` (clamped to the length).
    ///
    /// Returns the number of characters inserted.
    pub fn insert_at(&mut self, pos: usize, text: &str) -> usize {
        let count = text.chars().count();
        if count == 0 {
            return 0;
        }
        self.move_gap_to(pos);
        self.ensure_gap(count);
        for ch in text.chars() {
            self.data[self.gap_start] = ch;
            self.gap_start += 1;
        }
        count
    }

    /// Removes the characters in `[start, end)` (clamped to the length).
    ///
    /// Returns the number of characters removed.
    pub fn delete_range(&mut self, start: usize, end: usize) -> usize {
        let end = end.min(self.len());
        if start >= end {
            return 0;
        }
        self.move_gap_to(start);
        let count = end - start;
        self.gap_end += count;
        count
    }

    /// Returns the character at the given logical position.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.data[physical])
    }

    /// Returns an iterator over all characters in the buffer.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars_range(0, self.len())
    }

    /// Returns an iterator over the characters in `[start, end)`.
    pub fn chars_range(&self, start: usize, end: usize) -> impl Iterator<Item = char> + '_ {
        let end = end.min(self.len());
        let start = start.min(end);

        let pre = &self.data[..self.gap_start];
        let post = &self.data[self.gap_end..];
        let split = pre.len();

        pre[start.min(split)..end.min(split)]
            .iter()
            .chain(post[start.saturating_sub(split)..end.saturating_sub(split)].iter())
            .copied()
    }

    /// Returns the content of a range as a String.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars_range(start, end).collect()
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_from_str() {
        let buf = GapBuffer::from_str("hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_insert_at_end() {
        let mut buf = GapBuffer::new();
        assert_eq!(buf.insert_at(0, "abc"), 3);
        assert_eq!(buf.insert_at(3, "def"), 3);
        assert_eq!(buf.to_string(), "abcdef");
    }

    #[test]
    fn test_insert_at_middle() {
        let mut buf = GapBuffer::from_str("ac");
        buf.insert_at(1, "b");
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn test_insert_past_end_is_clamped() {
        let mut buf = GapBuffer::from_str("ab");
        buf.insert_at(99, "c");
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn test_delete_range() {
        let mut buf = GapBuffer::from_str("hello world");
        assert_eq!(buf.delete_range(5, 11), 6);
        assert_eq!(buf.to_string(), "hello");
        assert_eq!(buf.delete_range(0, 1), 1);
        assert_eq!(buf.to_string(), "ello");
    }

    #[test]
    fn test_delete_empty_or_inverted_range() {
        let mut buf = GapBuffer::from_str("abc");
        assert_eq!(buf.delete_range(2, 2), 0);
        assert_eq!(buf.delete_range(3, 1), 0);
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn test_delete_clamps_to_end() {
        let mut buf = GapBuffer::from_str("abc");
        assert_eq!(buf.delete_range(1, 50), 2);
        assert_eq!(buf.to_string(), "a");
    }

    #[test]
    fn test_char_at_with_gap_in_middle() {
        let mut buf = GapBuffer::from_str("hello");
        buf.move_gap_to(2);
        assert_eq!(buf.char_at(0), Some('h'));
        assert_eq!(buf.char_at(2), Some('l'));
        assert_eq!(buf.char_at(4), Some('o'));
        assert_eq!(buf.char_at(5), None);
    }

    #[test]
    fn test_chars_range_spanning_gap() {
        let mut buf = GapBuffer::from_str("abcdefgh");
        buf.move_gap_to(5);
        assert_eq!(buf.slice(2, 8), "cdefgh");
        assert_eq!(buf.slice(6, 8), "gh");
        assert_eq!(buf.slice(0, 3), "abc");
        assert_eq!(buf.slice(4, 100), "efgh");
    }

    #[test]
    fn test_multibyte_chars_count_once() {
        let mut buf = GapBuffer::from_str("héllo");
        assert_eq!(buf.len(), 5);
        buf.insert_at(1, "ü");
        assert_eq!(buf.slice(0, 3), "hüé");
    }

    #[test]
    fn test_large_insert_grows_gap() {
        let mut buf = GapBuffer::from_str("xy");
        let text: String = std::iter::repeat('a').take(1000).collect();
        buf.insert_at(1, &text);
        assert_eq!(buf.len(), 1002);
        assert_eq!(buf.char_at(0), Some('x'));
        assert_eq!(buf.char_at(1001), Some('y'));
    }
}
