// Chunk: docs/chunks/highlight_engine - Incremental, deadline-bounded highlighting engine

//! Expansion of an edited span to the area that must be re-highlighted.
//!
//! Highlighters assign styles per token and tokens never span a word
//! boundary mid-word, so an edit first grows to whole words. It then grows
//! to whole lines so that line-scoped constructs (comments, preprocessor
//! directives) are re-examined together.

use sheen_buffer::TextBuffer;

/// Characters that continue a word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Expands `[begin, end)` to word boundaries, then to whole lines.
///
/// `begin` moves to the start of its line. `end` moves to the start of the
/// line following it, or to the document end.
pub fn invalidation_area(text: &TextBuffer, begin: usize, end: usize) -> (usize, usize) {
    let len = text.len();
    let mut begin = begin.min(len);
    let mut end = end.clamp(begin, len);

    while begin > 0 && text.char_at(begin - 1).is_some_and(is_word_char) {
        begin -= 1;
    }
    while end < len && text.char_at(end).is_some_and(is_word_char) {
        end += 1;
    }

    let begin = text.line_start(text.line_at_offset(begin)).unwrap_or(0);
    let end = text
        .line_start(text.line_at_offset(end) + 1)
        .unwrap_or(len);

    (begin, end)
}
