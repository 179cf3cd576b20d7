// Chunk: docs/chunks/syntax_highlighting - Tree-sitter syntax highlighting

//! sheen-syntax: tree-sitter highlighters for the sheen engine.
//!
//! # Overview
//!
//! - [`TreeSitterHighlighter`]: owns a tree-sitter `Parser` and `Tree` and
//!   implements [`sheen_engine::Highlighter`], re-parsing incrementally as
//!   the document changes.
//! - [`LanguageRegistry`]: grammars and highlight queries for 14 languages,
//!   looked up by language id, file extension or common name.
//! - [`register_highlighters`]: installs a factory per language into a
//!   [`sheen_engine::HighlighterRegistry`].
//! - [`catppuccin_mocha`]: a style scheme covering the capture names the
//!   bundled queries emit.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use sheen_buffer::Document;
//! use sheen_engine::{HighlightEngine, HighlighterRegistry, Scheduler};
//!
//! let mut registry = HighlighterRegistry::new();
//! sheen_syntax::register_highlighters(&mut registry);
//!
//! let doc = Rc::new(RefCell::new(Document::from_str("fn main() {}")));
//! doc.borrow_mut().set_language(Some("rust"));
//! doc.borrow_mut()
//!     .set_style_scheme(Some(Rc::new(sheen_syntax::catppuccin_mocha())));
//!
//! let scheduler = Rc::new(Scheduler::new());
//! let engine = HighlightEngine::new(scheduler.clone(), Rc::new(registry));
//! engine.attach(&doc);
//! scheduler.run_until_idle(Duration::from_millis(5), 1000);
//!
//! let keyword = engine.private_tag("keyword").unwrap();
//! assert_eq!(doc.borrow().tags().ranges(keyword), &[0..2]);
//! ```

mod edit;
mod error;
mod highlighter;
mod registry;
mod theme;

pub use edit::{diff_edit, line_offsets, point_at};
pub use error::SyntaxError;
pub use highlighter::TreeSitterHighlighter;
pub use registry::{register_highlighters, LanguageConfig, LanguageRegistry};
pub use theme::{catppuccin_mocha, scheme_by_id, CATPPUCCIN_MOCHA, SCHEME_IDS};
