// Chunk: docs/chunks/document - Text document with tags, style schemes and edit hooks

//! The editable document.
//!
//! A [`Document`] owns text, a tag table, an optional language id and an
//! optional style scheme. Interested parties register a
//! [`DocumentObserver`] and are told about every edit twice: once before
//! the text changes and once after.
//!
//! Observers are held weakly. A dropped observer is pruned on the next
//! notification. No hook can edit the text: `before_*` hooks see the whole
//! `&Document`, while `after_*` and configuration hooks see the text
//! read-only and the tag table mutably, so they can restyle what the edit
//! touched.

use std::rc::{Rc, Weak};

use crate::style::{Span, Style, StyledLine};
use crate::style_scheme::StyleScheme;
use crate::tag_table::{TagId, TagTable};
use crate::text_buffer::TextBuffer;

/// Receives edit and configuration notifications from a [`Document`].
///
/// Offsets and lengths are in characters. For deletions, `len` is the number
/// of characters removed starting at `offset`.
pub trait DocumentObserver {
    fn before_insert(&self, doc: &Document, offset: usize, len: usize);
    /// The text and tag ranges already include the insertion.
    fn after_insert(&self, text: &TextBuffer, tags: &mut TagTable, offset: usize, len: usize);
    fn before_delete(&self, doc: &Document, offset: usize, len: usize);
    fn after_delete(&self, text: &TextBuffer, tags: &mut TagTable, offset: usize, len: usize);

    fn language_changed(&self, _language: Option<&str>, _text: &TextBuffer, _tags: &mut TagTable) {}
    fn style_scheme_changed(&self, _scheme: Option<&StyleScheme>, _tags: &mut TagTable) {}
}

/// Registration token returned by [`Document::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub struct Document {
    text: TextBuffer,
    tags: TagTable,
    language: Option<String>,
    style_scheme: Option<Rc<StyleScheme>>,
    observers: Vec<(ObserverId, Weak<dyn DocumentObserver>)>,
    next_observer: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("revision", &self.revision())
            .field("language", &self.language)
            .field("style_scheme", &self.style_scheme.as_ref().map(|s| s.id()))
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self {
            text: TextBuffer::from_str(content),
            ..Self::default()
        }
    }

    // ==================== Accessors ====================

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.text.revision()
    }

    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagTable {
        &mut self.tags
    }

    /// Borrows the text immutably and the tag table mutably at once.
    pub fn split_mut(&mut self) -> (&TextBuffer, &mut TagTable) {
        (&self.text, &mut self.tags)
    }

    pub fn slice(&self, begin: usize, end: usize) -> String {
        self.text.slice(begin, end)
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.char_at(offset)
    }

    pub fn line_count(&self) -> usize {
        self.text.line_count()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn style_scheme(&self) -> Option<&Rc<StyleScheme>> {
        self.style_scheme.as_ref()
    }

    // ==================== Edits ====================

    /// Inserts `text` at `offset` (clamped to the length).
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.len());
        let len = text.chars().count();
        if len == 0 {
            return;
        }

        self.notify(|obs, doc| obs.before_insert(doc, offset, len));
        self.text.insert(offset, text);
        self.tags.shift_for_insert(offset, len);
        for observer in self.live_observers() {
            observer.after_insert(&self.text, &mut self.tags, offset, len);
        }
    }

    /// Removes `[begin, end)` (clamped to the length).
    pub fn delete(&mut self, begin: usize, end: usize) {
        let end = end.min(self.len());
        if begin >= end {
            return;
        }
        let len = end - begin;

        self.notify(|obs, doc| obs.before_delete(doc, begin, len));
        self.text.delete(begin, end);
        self.tags.shift_for_delete(begin, end);
        for observer in self.live_observers() {
            observer.after_delete(&self.text, &mut self.tags, begin, len);
        }
    }

    /// Replaces the whole content, as a reload from disk would.
    pub fn replace_all(&mut self, content: &str) {
        self.delete(0, self.len());
        self.insert(0, content);
    }

    pub fn apply_tag(&mut self, tag: TagId, begin: usize, end: usize) {
        let end = end.min(self.len());
        self.tags.apply(tag, begin, end);
    }

    pub fn remove_tag(&mut self, tag: TagId, begin: usize, end: usize) {
        self.tags.remove(tag, begin, end);
    }

    // ==================== Configuration ====================

    pub fn set_language(&mut self, language: Option<&str>) {
        if self.language.as_deref() == language {
            return;
        }
        self.language = language.map(str::to_string);
        for observer in self.live_observers() {
            observer.language_changed(self.language.as_deref(), &self.text, &mut self.tags);
        }
    }

    pub fn set_style_scheme(&mut self, scheme: Option<Rc<StyleScheme>>) {
        let same = match (&self.style_scheme, &scheme) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        self.style_scheme = scheme;
        for observer in self.live_observers() {
            observer.style_scheme_changed(self.style_scheme.as_deref(), &mut self.tags);
        }
    }

    // ==================== Observers ====================

    pub fn add_observer(&mut self, observer: Weak<dyn DocumentObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Unregisters an observer. Unknown ids are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.retain(|(oid, _)| *oid != id);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|(_, o)| o.strong_count() > 0).count()
    }

    /// Prunes dropped observers and returns the rest.
    fn live_observers(&mut self) -> Vec<Rc<dyn DocumentObserver>> {
        self.observers.retain(|(_, o)| o.strong_count() > 0);
        self.observers.iter().filter_map(|(_, o)| o.upgrade()).collect()
    }

    fn notify(&mut self, f: impl Fn(&dyn DocumentObserver, &Document)) {
        for observer in self.live_observers() {
            f(observer.as_ref(), self);
        }
    }

    // ==================== Rendering ====================

    /// Builds the styled view of `line` from the applied tags.
    ///
    /// Returns `None` if the line is out of bounds.
    pub fn styled_line(&self, line: usize) -> Option<StyledLine> {
        let start = self.text.line_start(line)?;
        let end = self.text.line_end(line)?;
        if start == end {
            return Some(StyledLine::empty());
        }

        // Every tag range boundary inside the line splits a span.
        let mut cuts = vec![start, end];
        for (_, tag) in self.tags.iter() {
            for r in tag.ranges() {
                if r.end <= start || r.start >= end {
                    continue;
                }
                cuts.push(r.start.max(start));
                cuts.push(r.end.min(end));
            }
        }
        cuts.sort_unstable();
        cuts.dedup();

        let mut spans: Vec<Span> = Vec::new();
        for pair in cuts.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let style: Style = self.tags.style_at(a);
            let text = self.text.slice(a, b);
            match spans.last_mut() {
                Some(prev) if prev.style == style => prev.text.push_str(&text),
                _ => spans.push(Span::new(text, style)),
            }
        }
        Some(StyledLine::new(spans))
    }
}
