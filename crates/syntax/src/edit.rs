// Chunk: docs/chunks/syntax_highlighting - Snapshot diffing into tree-sitter edits

//! Translation of text changes into tree-sitter edits.
//!
//! The highlighter only sees the document between ticks, not the individual
//! edits, so it recovers one covering edit by diffing its previous snapshot
//! against the current text: everything between the common prefix and the
//! common suffix changed.
//!
//! Tree-sitter wants byte offsets and (row, byte column) points.

use tree_sitter::{InputEdit, Point};

/// Returns the tree-sitter point for `byte_offset` in `source`.
///
/// Columns count bytes. Offsets past the end clamp to the end.
///
/// # Example
///
/// ```
/// use sheen_syntax::point_at;
///
/// let source = "hé\nworld";
/// assert_eq!(point_at(source, 0).column, 0);
/// assert_eq!(point_at(source, 3).column, 3); // 'é' is two bytes
/// assert_eq!(point_at(source, 4).row, 1);
/// ```
pub fn point_at(source: &str, byte_offset: usize) -> Point {
    let byte_offset = byte_offset.min(source.len());
    let before = &source.as_bytes()[..byte_offset];
    let row = before.iter().filter(|b| **b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |nl| nl + 1);
    Point {
        row,
        column: byte_offset - line_start,
    }
}

/// Byte length of the longest common prefix, on a char boundary.
fn common_prefix_len(old: &str, new: &str) -> usize {
    old.char_indices()
        .zip(new.chars())
        .find(|((_, a), b)| a != b)
        .map_or_else(|| old.len().min(new.len()), |((i, _), _)| i)
}

/// Byte length of the longest common suffix that does not reach into the
/// first `floor` bytes of either string.
fn common_suffix_len(old: &str, new: &str, floor: usize) -> usize {
    let mut len = 0;
    for (a, b) in old[floor..].chars().rev().zip(new[floor..].chars().rev()) {
        if a != b {
            break;
        }
        len += a.len_utf8();
    }
    len
}

/// Computes the single edit turning `old` into `new`.
///
/// Returns `None` if the strings are equal.
pub fn diff_edit(old: &str, new: &str) -> Option<InputEdit> {
    if old == new {
        return None;
    }

    let start_byte = common_prefix_len(old, new);
    let suffix = common_suffix_len(old, new, start_byte);
    let old_end_byte = old.len() - suffix;
    let new_end_byte = new.len() - suffix;

    Some(InputEdit {
        start_byte,
        old_end_byte,
        new_end_byte,
        start_position: point_at(old, start_byte),
        old_end_position: point_at(old, old_end_byte),
        new_end_position: point_at(new, new_end_byte),
    })
}

/// Byte offset of the start of each line of `source`.
///
/// `offsets[0]` is always 0; every later entry is the byte after a `\n`.
pub fn line_offsets(source: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, b) in source.as_bytes().iter().enumerate() {
        if *b == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== point_at ====================

    #[test]
    fn test_point_at_start() {
        assert_eq!(point_at("hello\nworld", 0), Point { row: 0, column: 0 });
    }

    #[test]
    fn test_point_at_newline() {
        assert_eq!(point_at("hello\nworld", 5), Point { row: 0, column: 5 });
        assert_eq!(point_at("hello\nworld", 6), Point { row: 1, column: 0 });
    }

    #[test]
    fn test_point_with_multibyte_char() {
        let source = "he\u{1F600}llo"; // emoji is 4 bytes
        assert_eq!(point_at(source, 6), Point { row: 0, column: 6 });
    }

    #[test]
    fn test_point_past_end() {
        assert_eq!(point_at("ab\ncd", 100), Point { row: 1, column: 2 });
    }

    // ==================== diff_edit ====================

    #[test]
    fn test_identical_has_no_edit() {
        assert!(diff_edit("same", "same").is_none());
    }

    #[test]
    fn test_insert_in_middle() {
        let edit = diff_edit("fn main() {}", "fn xmain() {}").unwrap();
        assert_eq!(edit.start_byte, 3);
        assert_eq!(edit.old_end_byte, 3);
        assert_eq!(edit.new_end_byte, 4);
    }

    #[test]
    fn test_delete_across_lines() {
        let edit = diff_edit("hello\nworld", "helld").unwrap();
        assert_eq!(edit.start_byte, 4);
        assert_eq!(edit.old_end_byte, 10);
        assert_eq!(edit.new_end_byte, 4);
        assert_eq!(edit.old_end_position, Point { row: 1, column: 4 });
        assert_eq!(edit.new_end_position, Point { row: 0, column: 4 });
    }

    #[test]
    fn test_repeated_char_prefers_earliest_span() {
        // "aaa" -> "aaaa": prefix eats everything, suffix has nothing left.
        let edit = diff_edit("aaa", "aaaa").unwrap();
        assert_eq!(edit.start_byte, 3);
        assert_eq!(edit.old_end_byte, 3);
        assert_eq!(edit.new_end_byte, 4);
    }

    #[test]
    fn test_multibyte_boundaries() {
        let edit = diff_edit("aé b", "aè b").unwrap();
        assert_eq!(edit.start_byte, 1);
        assert_eq!(edit.old_end_byte, 3);
        assert_eq!(edit.new_end_byte, 3);
    }

    #[test]
    fn test_replace_everything() {
        let edit = diff_edit("abc", "xyz").unwrap();
        assert_eq!((edit.start_byte, edit.old_end_byte, edit.new_end_byte), (0, 3, 3));
    }

    // ==================== line_offsets ====================

    #[test]
    fn test_line_offsets() {
        assert_eq!(line_offsets(""), vec![0]);
        assert_eq!(line_offsets("a\nbc\n"), vec![0, 2, 5]);
        assert_eq!(line_offsets("é\nx"), vec![0, 3]);
    }
}
