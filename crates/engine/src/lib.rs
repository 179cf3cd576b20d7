// Chunk: docs/chunks/run_region - Checked/unchecked run bookkeeping
// Chunk: docs/chunks/scheduler - Cooperative deadline-driven task queue
// Chunk: docs/chunks/highlight_engine - Incremental, deadline-bounded highlighting engine
// Chunk: docs/chunks/engine_config - Engine settings and environment overrides

//! sheen-engine: incremental semantic highlighting.
//!
//! A [`HighlightEngine`] watches a [`Document`](sheen_buffer::Document) and
//! keeps its style tags in step with the text. Edits mark the affected
//! region as unchecked; ticks run a language [`Highlighter`] over unchecked
//! ranges until a deadline, and a [`Scheduler`] keeps calling back until
//! the whole document is checked.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use sheen_buffer::{Document, TextBuffer};
//! use sheen_engine::{
//!     HighlightEngine, Highlighter, HighlighterRegistry, Scheduler, StyleApplier,
//! };
//!
//! struct Digits;
//!
//! impl Highlighter for Digits {
//!     fn update(
//!         &mut self,
//!         text: &TextBuffer,
//!         styles: &mut StyleApplier<'_>,
//!         begin: usize,
//!         end: usize,
//!     ) -> usize {
//!         for (i, ch) in text.chars_range(begin, end).enumerate() {
//!             if ch.is_ascii_digit() {
//!                 styles.apply(begin + i, begin + i + 1, "number");
//!             }
//!         }
//!         end
//!     }
//! }
//!
//! let scheduler = Rc::new(Scheduler::new());
//! let mut registry = HighlighterRegistry::new();
//! registry.register("digits", || Some(Box::new(Digits) as Box<dyn Highlighter>));
//!
//! let doc = Rc::new(RefCell::new(Document::from_str("a1b2")));
//! doc.borrow_mut().set_language(Some("digits"));
//!
//! let engine = HighlightEngine::new(scheduler.clone(), Rc::new(registry));
//! engine.attach(&doc);
//! scheduler.run_until_idle(Duration::from_millis(5), 100);
//!
//! let number = engine.private_tag("number").unwrap();
//! assert_eq!(doc.borrow().tags().ranges(number), &[1..2, 3..4]);
//! ```

pub mod config;
mod engine;
mod error;
mod highlighter;
pub mod invalidation;
pub mod region;
mod registry;
mod scheduler;
pub mod tags;

pub use config::EngineConfig;
pub use engine::{EngineHandle, EngineState, HighlightEngine, SharedDocument};
pub use error::ConfigError;
pub use highlighter::{HighlightResult, Highlighter, StyleApplier};
pub use region::{RunRegion, RunSpan, RunState};
pub use registry::HighlighterRegistry;
pub use scheduler::{Scheduler, TaskControl, TaskHandle};
