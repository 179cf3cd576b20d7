// Chunk: docs/chunks/syntax_highlighting - Tree-sitter highlighter with incremental parsing

//! Tree-sitter backed [`Highlighter`].
//!
//! The highlighter keeps its own snapshot of the document and a parse tree
//! for it. On each `update` it first catches up with the document: if the
//! text changed since the last call, the difference becomes one
//! `InputEdit` and the tree is re-parsed incrementally. It then runs the
//! highlights query over the requested range with `QueryCursor` and
//! reports every capture as a style named after the capture
//! (`keyword`, `function.method`, ...).
//!
//! The document speaks character offsets and tree-sitter speaks bytes; a
//! byte line index of the snapshot converts between the two through the
//! document's own line index.

use std::time::Instant;

use sheen_buffer::TextBuffer;
use sheen_engine::{HighlightResult, Highlighter, StyleApplier};
use streaming_iterator::StreamingIterator;
use tracing::{trace, warn};
use tree_sitter::{Parser, Point, Query, QueryCursor, Tree};

use crate::edit::{diff_edit, line_offsets};
use crate::error::SyntaxError;
use crate::registry::LanguageConfig;

/// Lines handled per query pass; the deadline is checked between passes.
const WINDOW_LINES: usize = 256;

/// A capture entry: byte range, start point and capture index.
///
/// The capture index looks the name up in `Query::capture_names()` so no
/// `String` is allocated per capture.
#[derive(Debug, Clone, Copy)]
struct CaptureEntry {
    start_byte: usize,
    end_byte: usize,
    start: Point,
    end: Point,
    index: u32,
}

pub struct TreeSitterHighlighter {
    language_id: &'static str,
    parser: Parser,
    query: Query,
    tree: Option<Tree>,
    /// Snapshot the tree was parsed from
    source: String,
    /// Byte offset where each line of `source` starts
    line_offsets: Vec<usize>,
    /// Document revision `source` was taken at
    synced_revision: Option<u64>,
    /// Reusable buffer for captures
    captures: Vec<CaptureEntry>,
}

impl std::fmt::Debug for TreeSitterHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSitterHighlighter")
            .field("language", &self.language_id)
            .field("source_len", &self.source.len())
            .field("parsed", &self.tree.is_some())
            .finish()
    }
}

impl TreeSitterHighlighter {
    /// Creates a highlighter for `config`.
    ///
    /// Compiling the highlights query is the expensive part; it happens once
    /// per highlighter.
    pub fn new(config: &LanguageConfig) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&config.language)
            .map_err(|source| SyntaxError::Language {
                language: config.id.to_string(),
                source,
            })?;

        let query = Query::new(&config.language, &config.highlights_query).map_err(|source| {
            SyntaxError::Query {
                language: config.id.to_string(),
                source,
            }
        })?;

        Ok(Self {
            language_id: config.id,
            parser,
            query,
            tree: None,
            source: String::new(),
            line_offsets: vec![0],
            synced_revision: None,
            captures: Vec::new(),
        })
    }

    pub fn language_id(&self) -> &'static str {
        self.language_id
    }

    /// The current parse tree, once the first update has run.
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// The snapshot the tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Brings the snapshot and tree up to date with `text`.
    pub fn sync(&mut self, text: &TextBuffer) {
        if self.tree.is_some() && self.synced_revision == Some(text.revision()) {
            return;
        }

        let current = text.content();
        if let Some(tree) = self.tree.as_mut() {
            match diff_edit(&self.source, &current) {
                Some(edit) => tree.edit(&edit),
                None => {
                    self.synced_revision = Some(text.revision());
                    return;
                }
            }
        }

        let old_tree = self.tree.take();
        self.tree = self.parser.parse(&current, old_tree.as_ref());
        if self.tree.is_none() {
            warn!(target: "sheen::syntax", language = self.language_id, "parse failed");
        }
        trace!(
            target: "sheen::syntax",
            language = self.language_id,
            incremental = old_tree.is_some(),
            bytes = current.len(),
            "reparsed"
        );

        self.line_offsets = line_offsets(&current);
        self.source = current;
        self.synced_revision = Some(text.revision());
    }

    /// Byte offset in the snapshot of character `offset` in `text`.
    fn byte_of(&self, text: &TextBuffer, offset: usize) -> usize {
        let pos = text.offset_to_position(offset);
        let Some(&line_start) = self.line_offsets.get(pos.line) else {
            return self.source.len();
        };
        self.source[line_start..]
            .char_indices()
            .nth(pos.col)
            .map_or(self.source.len(), |(i, _)| line_start + i)
    }

    /// Character offset in `text` of the byte at `point`.
    fn char_of(&self, text: &TextBuffer, point: Point, byte: usize) -> usize {
        let Some(&line_start) = self.line_offsets.get(point.row) else {
            return text.len();
        };
        let col = self
            .source
            .get(line_start..byte)
            .map_or(0, |s| s.chars().count());
        text.line_start(point.row).map_or(text.len(), |start| start + col)
    }

    /// Collects captures overlapping `[start_byte, end_byte)`, sorted by start.
    fn collect_captures(&mut self, start_byte: usize, end_byte: usize) {
        self.captures.clear();
        let Some(tree) = self.tree.as_ref() else {
            return;
        };

        let mut cursor = QueryCursor::new();
        cursor.set_byte_range(start_byte..end_byte);

        let mut captures_iter = cursor.captures(&self.query, tree.root_node(), self.source.as_bytes());
        while let Some((mat, capture_idx)) = captures_iter.next() {
            let capture = &mat.captures[*capture_idx];
            let node = capture.node;
            self.captures.push(CaptureEntry {
                start_byte: node.start_byte(),
                end_byte: node.end_byte(),
                start: node.start_position(),
                end: node.end_position(),
                index: capture.index,
            });
        }

        // Captures may come out of order across patterns.
        self.captures.sort_by_key(|c| c.start_byte);
    }

    /// Applies captures inside `[begin, end)`.
    ///
    /// Returns where it stopped if the applier ran out of time.
    fn highlight_window(
        &mut self,
        text: &TextBuffer,
        styles: &mut StyleApplier<'_>,
        begin: usize,
        end: usize,
    ) -> Option<usize> {
        let start_byte = self.byte_of(text, begin);
        let end_byte = self.byte_of(text, end);
        self.collect_captures(start_byte, end_byte);

        let captures = std::mem::take(&mut self.captures);
        let mut stop_at: Option<usize> = None;

        for capture in &captures {
            let name = match self.query.capture_names().get(capture.index as usize) {
                Some(name) if !name.starts_with('_') => *name,
                _ => continue,
            };

            let cap_begin = self.char_of(text, capture.start, capture.start_byte).max(begin);
            let cap_end = self.char_of(text, capture.end, capture.end_byte).min(end);
            if cap_begin >= cap_end {
                continue;
            }
            // After a stop, only finish captures that overlap what is done.
            if stop_at.is_some_and(|stop| cap_begin >= stop) {
                break;
            }

            if styles.apply(cap_begin, cap_end, name) == HighlightResult::Stop && stop_at.is_none() {
                stop_at = Some(cap_end);
            }
        }

        self.captures = captures;
        stop_at
    }
}

impl Highlighter for TreeSitterHighlighter {
    fn update(
        &mut self,
        text: &TextBuffer,
        styles: &mut StyleApplier<'_>,
        begin: usize,
        end: usize,
    ) -> usize {
        self.sync(text);
        if self.tree.is_none() {
            return end;
        }

        let mut window_begin = begin;
        while window_begin < end {
            let line = text.line_at_offset(window_begin);
            let window_end = text
                .line_start(line + WINDOW_LINES)
                .map_or(end, |start| start.min(end));

            if let Some(stopped) = self.highlight_window(text, styles, window_begin, window_end) {
                return stopped;
            }
            window_begin = window_end;
            if Instant::now() >= styles.deadline() {
                return window_begin;
            }
        }
        end
    }
}
