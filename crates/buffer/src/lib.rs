// Chunk: docs/chunks/document - Text document with tags, style schemes and edit hooks
// Chunk: docs/chunks/tag_table - Named tags with per-tag range sets
// Chunk: docs/chunks/style_scheme - Style attributes and named style schemes

//! sheen-buffer: the document model highlighting runs against.
//!
//! # Overview
//!
//! The main type is [`Document`], which provides:
//! - Character-offset text storage backed by a gap buffer
//! - A [`TagTable`] whose ranges follow edits
//! - Language id and [`StyleScheme`] settings
//! - Synchronous before/after edit notifications via [`DocumentObserver`]
//!
//! All offsets are Unicode scalar value indices.
//!
//! # Example
//!
//! ```
//! use sheen_buffer::{Document, Style};
//!
//! let mut doc = Document::from_str("hello world");
//! let tag = doc.tags_mut().create("keyword", Style::default()).unwrap();
//! doc.apply_tag(tag, 0, 5);
//!
//! doc.insert(0, ">> ");
//! assert_eq!(doc.tags().ranges(tag), &[3..8]);
//! assert_eq!(doc.len(), 14);
//! ```

mod document;
mod gap_buffer;
mod line_index;
mod style;
mod style_scheme;
mod tag_table;
mod text_buffer;
mod types;

pub use document::{Document, DocumentObserver, ObserverId};
pub use style::{Color, NamedColor, Span, Style, StyledLine, UnderlineStyle};
pub use style_scheme::{fallback_names, StyleScheme, DEFAULT_QUALIFIER};
pub use tag_table::{Tag, TagError, TagId, TagTable};
pub use text_buffer::TextBuffer;
pub use types::Position;
