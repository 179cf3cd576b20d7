// Chunk: docs/chunks/tag_table - Named tags with per-tag range sets

//! Named tags and the document ranges they cover.
//!
//! A [`Tag`] is a named [`Style`] with a priority. Each tag owns a sorted set
//! of disjoint, non-touching character ranges. Ranges follow the text as it
//! is edited:
//!
//! - Text inserted strictly inside a range, or at its end, extends it.
//! - Text inserted at or before a range's start shifts it.
//! - Deleted text collapses ranges; ranges that become empty disappear and
//!   ranges that come to touch are merged.
//!
//! When several tags cover the same character, higher priority wins for
//! every attribute it sets. Priority follows creation order.

use std::collections::HashMap;
use std::ops::Range;

use thiserror::Error;

use crate::style::Style;

/// Identifies a tag within one [`TagTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u32);

/// Errors from tag definition management.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("a tag named `{0}` already exists")]
    DuplicateName(String),
}

/// A named style applied over ranges of a document.
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    style: Style,
    priority: u32,
    ranges: Vec<Range<usize>>,
}

impl Tag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Covered ranges in ascending order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    fn covers(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= offset);
        self.ranges.get(idx).is_some_and(|r| r.start <= offset)
    }

    fn add(&mut self, begin: usize, end: usize) {
        // Ranges touching or overlapping [begin, end) get absorbed.
        let first = self.ranges.partition_point(|r| r.end < begin);
        let last = self.ranges.partition_point(|r| r.start <= end);

        let mut merged = begin..end;
        if first < last {
            merged.start = merged.start.min(self.ranges[first].start);
            merged.end = merged.end.max(self.ranges[last - 1].end);
        }
        self.ranges.splice(first..last, std::iter::once(merged));
    }

    fn subtract(&mut self, begin: usize, end: usize) {
        let first = self.ranges.partition_point(|r| r.end <= begin);
        let last = self.ranges.partition_point(|r| r.start < end);
        if first >= last {
            return;
        }

        let mut keep = Vec::with_capacity(2);
        let head = &self.ranges[first];
        if head.start < begin {
            keep.push(head.start..begin);
        }
        let tail = &self.ranges[last - 1];
        if tail.end > end {
            keep.push(end..tail.end);
        }
        self.ranges.splice(first..last, keep);
    }

    fn shift_for_insert(&mut self, offset: usize, len: usize) {
        for r in &mut self.ranges {
            if r.start >= offset {
                r.start += len;
                r.end += len;
            } else if r.end >= offset {
                r.end += len;
            }
        }
    }

    fn shift_for_delete(&mut self, begin: usize, end: usize) {
        let removed = end - begin;
        let collapse = |pos: usize| {
            if pos <= begin {
                pos
            } else if pos >= end {
                pos - removed
            } else {
                begin
            }
        };

        let mut out: Vec<Range<usize>> = Vec::with_capacity(self.ranges.len());
        for r in &self.ranges {
            let next = collapse(r.start)..collapse(r.end);
            if next.is_empty() {
                continue;
            }
            match out.last_mut() {
                Some(prev) if prev.end >= next.start => prev.end = prev.end.max(next.end),
                _ => out.push(next),
            }
        }
        self.ranges = out;
    }
}

/// All tags of one document.
#[derive(Debug, Default)]
pub struct TagTable {
    tags: HashMap<TagId, Tag>,
    by_name: HashMap<String, TagId>,
    next_id: u32,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of defined tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Defines a new tag. Fails if the name is taken.
    pub fn create(&mut self, name: &str, style: Style) -> Result<TagId, TagError> {
        if self.by_name.contains_key(name) {
            return Err(TagError::DuplicateName(name.to_string()));
        }
        Ok(self.ensure(name, style))
    }

    fn insert_tag(&mut self, id: TagId, name: &str, style: Style) {
        self.tags.insert(
            id,
            Tag {
                name: name.to_string(),
                style,
                priority: id.0,
                ranges: Vec::new(),
            },
        );
        self.by_name.insert(name.to_string(), id);
    }

    /// Returns the tag named `name` with its style set to `style`, defining
    /// it first if needed.
    pub fn ensure(&mut self, name: &str, style: Style) -> TagId {
        match self.lookup(name) {
            Some(id) => {
                self.set_style(id, style);
                id
            }
            None => {
                let id = TagId(self.next_id);
                self.next_id += 1;
                self.insert_tag(id, name, style);
                id
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TagId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    /// Removes a tag definition together with all its ranges.
    pub fn delete(&mut self, id: TagId) -> Option<Tag> {
        let tag = self.tags.remove(&id)?;
        self.by_name.remove(&tag.name);
        Some(tag)
    }

    pub fn set_style(&mut self, id: TagId, style: Style) {
        if let Some(tag) = self.tags.get_mut(&id) {
            tag.style = style;
        }
    }

    /// Covers `[begin, end)` with the tag. Empty ranges are ignored.
    pub fn apply(&mut self, id: TagId, begin: usize, end: usize) {
        if begin >= end {
            return;
        }
        if let Some(tag) = self.tags.get_mut(&id) {
            tag.add(begin, end);
        }
    }

    /// Uncovers `[begin, end)` for the tag.
    pub fn remove(&mut self, id: TagId, begin: usize, end: usize) {
        if begin >= end {
            return;
        }
        if let Some(tag) = self.tags.get_mut(&id) {
            tag.subtract(begin, end);
        }
    }

    /// Returns true if the tag covers the character at `offset`.
    pub fn has_tag_at(&self, id: TagId, offset: usize) -> bool {
        self.tags.get(&id).is_some_and(|tag| tag.covers(offset))
    }

    /// Covered ranges of a tag; empty for an unknown id.
    pub fn ranges(&self, id: TagId) -> &[Range<usize>] {
        self.tags.get(&id).map(Tag::ranges).unwrap_or(&[])
    }

    /// Tags covering `offset`, lowest priority first.
    pub fn tags_at(&self, offset: usize) -> Vec<TagId> {
        let mut ids: Vec<TagId> = self
            .tags
            .iter()
            .filter(|(_, tag)| tag.covers(offset))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Iterates all tags in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &Tag)> {
        let mut tags: Vec<(TagId, &Tag)> = self.tags.iter().map(|(id, t)| (*id, t)).collect();
        tags.sort_by_key(|(id, _)| *id);
        tags.into_iter()
    }

    /// Effective style at `offset`, composed by priority.
    pub fn style_at(&self, offset: usize) -> Style {
        self.tags_at(offset)
            .into_iter()
            .filter_map(|id| self.tags.get(&id))
            .fold(Style::default(), |acc, tag| acc.overlay(&tag.style))
    }

    /// Adjusts every range for `len` characters inserted at `offset`.
    pub fn shift_for_insert(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        for tag in self.tags.values_mut() {
            tag.shift_for_insert(offset, len);
        }
    }

    /// Adjusts every range for the removal of `[begin, end)`.
    pub fn shift_for_delete(&mut self, begin: usize, end: usize) {
        if begin >= end {
            return;
        }
        for tag in self.tags.values_mut() {
            tag.shift_for_delete(begin, end);
        }
    }
}
