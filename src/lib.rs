// Chunk: docs/chunks/workspace - Workspace layout and command-line front end

//! sheen: incremental semantic highlighting for live documents.
//!
//! The work is split across three crates:
//!
//! - `sheen-buffer`: the document, its tag table and style schemes
//! - `sheen-engine`: the run-length region, the highlight engine and the
//!   cooperative scheduler that drives it
//! - `sheen-syntax`: tree-sitter highlighters and the built-in scheme
//!
//! This crate ties them together for one-shot use: [`highlight_to_idle`]
//! runs an engine over a document until every range is checked, and
//! [`render_line`] turns the result into terminal escape sequences.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use sheen::highlight_to_idle;
//! use sheen_buffer::Document;
//! use sheen_engine::EngineConfig;
//!
//! let doc = Rc::new(RefCell::new(Document::from_str("fn main() {}\n")));
//! doc.borrow_mut().set_language(Some("rust"));
//! doc.borrow_mut().set_style_scheme(Some(Rc::new(sheen_syntax::catppuccin_mocha())));
//!
//! let engine = highlight_to_idle(&doc, &EngineConfig::default());
//! assert!(engine.region().is_all_checked());
//! ```

mod render;

use std::rc::Rc;

use sheen_engine::{EngineConfig, HighlightEngine, HighlighterRegistry, Scheduler, SharedDocument};
use tracing::debug;

pub use render::{render_line, sgr_params, RESET};

/// Upper bound on scheduler rounds for one document.
const MAX_ROUNDS: usize = 1_000_000;

/// Attaches an engine with every built-in highlighter to `document` and
/// dispatches ticks until nothing is left to do.
///
/// The engine is returned so callers can keep it attached or inspect it.
pub fn highlight_to_idle(document: &SharedDocument, config: &EngineConfig) -> HighlightEngine {
    let mut registry = HighlighterRegistry::new();
    sheen_syntax::register_highlighters(&mut registry);

    let scheduler = Rc::new(Scheduler::new());
    let engine = HighlightEngine::with_config(scheduler.clone(), Rc::new(registry), config);
    engine.attach(document);

    let rounds = scheduler.run_until_idle(config.quanta(), MAX_ROUNDS);
    debug!(target: "sheen", rounds, state = ?engine.state(), "highlighting settled");
    engine
}
