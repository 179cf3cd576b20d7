// Chunk: docs/chunks/style_scheme - Style attributes and named style schemes

//! Named collections of styles.
//!
//! A [`StyleScheme`] maps style names to [`Style`]s. Names come in three
//! shapes:
//!
//! - bare: `keyword`, `function.method`
//! - language-qualified: `rust:keyword`
//! - the generic qualifier: `def:keyword`
//!
//! [`StyleScheme::resolve`] walks a fallback chain so that highlighters can
//! emit specific names and still pick up something sensible from a scheme
//! that only defines the generic ones.

use std::collections::HashMap;

use crate::style::Style;

/// Qualifier used for language-independent style definitions.
pub const DEFAULT_QUALIFIER: &str = "def";

#[derive(Debug, Clone, Default)]
pub struct StyleScheme {
    id: String,
    styles: HashMap<String, Style>,
}

impl StyleScheme {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            styles: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with_style(mut self, name: impl Into<String>, style: Style) -> Self {
        self.set(name, style);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Exact lookup, no fallback.
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Resolves `name` through the fallback chain.
    ///
    /// For each candidate, from most to least specific:
    ///
    /// 1. `lang:name` → `def:name` → `name`, or `name` → `def:name` for an
    ///    unqualified name
    /// 2. the same again for each dotted parent of `name`
    ///    (`function.method` → `function`)
    pub fn resolve(&self, name: &str) -> Option<&Style> {
        fallback_names(name).find_map(|candidate| self.styles.get(&candidate))
    }
}

/// Yields the lookup candidates for `name` in resolution order.
pub fn fallback_names(name: &str) -> impl Iterator<Item = String> + '_ {
    let (qualifier, rest) = match name.split_once(':') {
        Some((q, rest)) if !q.is_empty() && !rest.starts_with(':') => (Some(q), rest),
        _ => (None, name),
    };

    let mut stems = Vec::new();
    let mut stem = rest;
    loop {
        stems.push(stem);
        match stem.rfind('.') {
            Some(dot) => stem = &stem[..dot],
            None => break,
        }
    }

    stems.into_iter().flat_map(move |stem| {
        let mut candidates = Vec::with_capacity(3);
        match qualifier {
            Some(q) => {
                candidates.push(format!("{q}:{stem}"));
                if q != DEFAULT_QUALIFIER {
                    candidates.push(format!("{DEFAULT_QUALIFIER}:{stem}"));
                }
                candidates.push(stem.to_string());
            }
            None => {
                candidates.push(stem.to_string());
                candidates.push(format!("{DEFAULT_QUALIFIER}:{stem}"));
            }
        }
        candidates
    })
}
