// Chunk: docs/chunks/highlight_engine - Incremental, deadline-bounded highlighting engine

//! Language id → highlighter factory lookup.

use std::collections::HashMap;
use std::fmt;

use crate::highlighter::Highlighter;

type Factory = Box<dyn Fn() -> Option<Box<dyn Highlighter>>>;

/// Maps language ids to highlighter factories.
///
/// A factory may decline (return `None`), for instance when its grammar
/// fails to load; the engine then runs without a highlighter.
#[derive(Default)]
pub struct HighlighterRegistry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for HighlighterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut languages: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        languages.sort_unstable();
        f.debug_struct("HighlighterRegistry")
            .field("languages", &languages)
            .finish()
    }
}

impl HighlighterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for `language`, replacing any previous one.
    pub fn register<F>(&mut self, language: impl Into<String>, factory: F)
    where
        F: Fn() -> Option<Box<dyn Highlighter>> + 'static,
    {
        self.factories.insert(language.into(), Box::new(factory));
    }

    pub fn contains(&self, language: &str) -> bool {
        self.factories.contains_key(language)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds a fresh highlighter for `language`.
    pub fn create(&self, language: &str) -> Option<Box<dyn Highlighter>> {
        self.factories.get(language).and_then(|factory| factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighter::StyleApplier;
    use sheen_buffer::TextBuffer;

    struct Nothing;

    impl Highlighter for Nothing {
        fn update(
            &mut self,
            _text: &TextBuffer,
            _styles: &mut StyleApplier<'_>,
            _begin: usize,
            end: usize,
        ) -> usize {
            end
        }
    }

    #[test]
    fn test_create_registered_language() {
        let mut registry = HighlighterRegistry::new();
        registry.register("plain", || Some(Box::new(Nothing) as Box<dyn Highlighter>));
        assert!(registry.contains("plain"));
        assert!(registry.create("plain").is_some());
        assert!(registry.create("rust").is_none());
    }

    #[test]
    fn test_declining_factory() {
        let mut registry = HighlighterRegistry::new();
        registry.register("broken", || None);
        assert!(registry.contains("broken"));
        assert!(registry.create("broken").is_none());
    }
}
