// Chunk: docs/chunks/highlight_engine - Incremental, deadline-bounded highlighting engine

//! The pluggable highlighter interface.
//!
//! A [`Highlighter`] walks the tokens of a range and reports each one through
//! [`StyleApplier::apply`]. The applier tags the text and tells the
//! highlighter whether it still has time; a highlighter that is told to
//! [`HighlightResult::Stop`] returns the offset it reached so the engine can
//! resume from there on the next tick.

use std::time::Instant;

use sheen_buffer::{StyleScheme, TagTable, TextBuffer};

use crate::engine::EngineHandle;
use crate::tags::StyleTags;

/// Verdict returned from [`StyleApplier::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightResult {
    /// Keep going.
    Continue,
    /// The tick's deadline has passed; return as soon as possible.
    Stop,
}

/// Language-specific semantic highlighting.
pub trait Highlighter {
    /// Called once when the highlighter is installed into an engine.
    ///
    /// Highlighters that finish work asynchronously keep the handle to call
    /// [`EngineHandle::advance`] or [`EngineHandle::invalidate`] later.
    fn load(&mut self, _engine: EngineHandle) {}

    /// Highlights `[begin, end)` of `text` and returns the offset reached.
    ///
    /// The result must lie in `[begin, end]`; the engine clamps it anyway.
    /// Returning `begin` means no progress was possible.
    fn update(
        &mut self,
        text: &TextBuffer,
        styles: &mut StyleApplier<'_>,
        begin: usize,
        end: usize,
    ) -> usize;
}

/// Applies styles on behalf of a highlighter during one tick.
pub struct StyleApplier<'a> {
    tags: &'a mut TagTable,
    cache: &'a mut StyleTags,
    scheme: Option<&'a StyleScheme>,
    doc_len: usize,
    deadline: Instant,
    applied: usize,
}

impl<'a> StyleApplier<'a> {
    pub fn new(
        tags: &'a mut TagTable,
        cache: &'a mut StyleTags,
        scheme: Option<&'a StyleScheme>,
        doc_len: usize,
        deadline: Instant,
    ) -> Self {
        Self {
            tags,
            cache,
            scheme,
            doc_len,
            deadline,
            applied: 0,
        }
    }

    /// Tags `[begin, end)` with the private tag for `style`.
    ///
    /// Returns [`HighlightResult::Stop`] once the deadline has passed.
    pub fn apply(&mut self, begin: usize, end: usize, style: &str) -> HighlightResult {
        let end = end.min(self.doc_len);
        if begin < end {
            let tag = self.cache.get_or_create(self.tags, self.scheme, style, true);
            self.tags.apply(tag, begin, end);
            self.applied += 1;
        }

        if Instant::now() >= self.deadline {
            HighlightResult::Stop
        } else {
            HighlightResult::Continue
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Number of non-empty applications so far.
    pub fn applied(&self) -> usize {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_apply_tags_text_and_continues_before_deadline() {
        let mut table = TagTable::new();
        let mut cache = StyleTags::new();
        let deadline = Instant::now() + Duration::from_secs(60);
        let mut styles = StyleApplier::new(&mut table, &mut cache, None, 20, deadline);

        assert_eq!(styles.apply(0, 5, "keyword"), HighlightResult::Continue);
        assert_eq!(styles.apply(6, 9, "keyword"), HighlightResult::Continue);
        assert_eq!(styles.applied(), 2);

        let id = table.lookup("sheen-private-tag:keyword").unwrap();
        assert_eq!(table.ranges(id), &[0..5, 6..9]);
    }

    #[test]
    fn test_apply_stops_after_deadline() {
        let mut table = TagTable::new();
        let mut cache = StyleTags::new();
        let expired = Instant::now();
        let mut styles = StyleApplier::new(&mut table, &mut cache, None, 20, expired);
        assert_eq!(styles.apply(0, 1, "keyword"), HighlightResult::Stop);
    }

    #[test]
    fn test_apply_clamps_to_document() {
        let mut table = TagTable::new();
        let mut cache = StyleTags::new();
        let deadline = Instant::now() + Duration::from_secs(60);
        let mut styles = StyleApplier::new(&mut table, &mut cache, None, 4, deadline);
        styles.apply(2, 10, "string");
        styles.apply(7, 9, "string");
        assert_eq!(styles.applied(), 1);

        let id = table.lookup("sheen-private-tag:string").unwrap();
        assert_eq!(table.ranges(id), &[2..4]);
    }
}
