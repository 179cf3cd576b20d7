// Chunk: docs/chunks/highlight_engine - Incremental, deadline-bounded highlighting engine

//! The engine's cache of style tags.
//!
//! Style names map to document tags in two pools:
//!
//! - private tags, named `sheen-private-tag:<style>`, owned by the engine and
//!   rewritten by every tick
//! - public tags, named after the style itself, handed out by
//!   [`HighlightEngine::get_style`](crate::HighlightEngine::get_style) for
//!   callers that tag text themselves
//!
//! A tag's style is derived from the document's scheme through
//! [`resolve_style`], and re-derived whenever the scheme changes.

use std::collections::HashMap;

use sheen_buffer::{Color, Style, StyleScheme, TagId, TagTable, UnderlineStyle};

/// Prefix of engine-private tag names.
pub const PRIVATE_TAG_PREFIX: &str = "sheen-private-tag";

/// Diagnostic categories styled even when the scheme says nothing.
const DIAGNOSTIC_BASELINE: &[(&str, u32)] = &[
    ("diagnostician::error", 0xff0000),
    ("diagnostician::warning", 0xfcaf3e),
    ("diagnostician::deprecated", 0xbabdb6),
    ("diagnostician::note", 0x708090),
];

pub fn private_tag_name(style: &str) -> String {
    format!("{PRIVATE_TAG_PREFIX}:{style}")
}

/// Computes the style for `name`.
///
/// Tries the scheme's fallback chain, then the diagnostic baseline, then
/// gives up with the plain style.
pub fn resolve_style(scheme: Option<&StyleScheme>, name: &str) -> Style {
    if let Some(style) = scheme.and_then(|s| s.resolve(name)) {
        return *style;
    }
    baseline_style(name).unwrap_or_default()
}

fn baseline_style(name: &str) -> Option<Style> {
    DIAGNOSTIC_BASELINE
        .iter()
        .find(|(category, _)| *category == name)
        .map(|(_, rgb)| Style {
            underline: UnderlineStyle::Curly,
            underline_color: Some(Color::hex(*rgb)),
            ..Style::default()
        })
}

#[derive(Debug, Default)]
pub struct StyleTags {
    private: HashMap<String, TagId>,
    public: HashMap<String, TagId>,
}

impl StyleTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tag for `style`, creating and styling it on first use.
    ///
    /// A public tag the table already defines is handed out as is: it is
    /// not restyled, tracked or removed by the cache.
    pub fn get_or_create(
        &mut self,
        tags: &mut TagTable,
        scheme: Option<&StyleScheme>,
        style: &str,
        private: bool,
    ) -> TagId {
        let pool = if private {
            &mut self.private
        } else {
            &mut self.public
        };
        if let Some(id) = pool.get(style) {
            return *id;
        }
        if !private {
            if let Some(id) = tags.lookup(style) {
                return id;
            }
        }

        let name = if private {
            private_tag_name(style)
        } else {
            style.to_string()
        };
        let id = tags.ensure(&name, resolve_style(scheme, style));
        pool.insert(style.to_string(), id);
        id
    }

    /// Re-derives every cached tag's style from `scheme`.
    pub fn resync(&self, tags: &mut TagTable, scheme: Option<&StyleScheme>) {
        for (style, id) in self.private.iter().chain(self.public.iter()) {
            tags.set_style(*id, resolve_style(scheme, style));
        }
    }

    /// Uncovers `[begin, end)` for every private tag.
    pub fn remove_private_in(&self, tags: &mut TagTable, begin: usize, end: usize) {
        for id in self.private.values() {
            tags.remove(*id, begin, end);
        }
    }

    /// Uncovers `[begin, end)` for every public tag.
    pub fn remove_public_in(&self, tags: &mut TagTable, begin: usize, end: usize) {
        for id in self.public.values() {
            tags.remove(*id, begin, end);
        }
    }

    /// Deletes every cached tag from the table and forgets them.
    pub fn remove_all(&mut self, tags: &mut TagTable) {
        for (_, id) in self.private.drain().chain(self.public.drain()) {
            tags.delete(id);
        }
    }

    pub fn private_ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.private.values().copied()
    }

    pub fn public_ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.public.values().copied()
    }

    pub fn private_tag(&self, style: &str) -> Option<TagId> {
        self.private.get(style).copied()
    }

    pub fn public_tag(&self, style: &str) -> Option<TagId> {
        self.public.get(style).copied()
    }
}
