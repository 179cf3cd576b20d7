// Chunk: docs/chunks/syntax_highlighting - Language registry for 14 languages

//! Language registry mapping language ids and file extensions to
//! tree-sitter configurations.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use sheen_engine::{Highlighter, HighlighterRegistry};
use tracing::warn;
use tree_sitter::Language;

use crate::error::SyntaxError;
use crate::highlighter::TreeSitterHighlighter;

/// A language's grammar and highlight query.
#[derive(Clone)]
pub struct LanguageConfig {
    /// Language id, as set on documents
    pub id: &'static str,
    pub language: Language,
    /// The highlights query (tree-sitter query syntax)
    pub highlights_query: Cow<'static, str>,
}

impl LanguageConfig {
    pub fn new(
        id: &'static str,
        language: Language,
        highlights_query: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            id,
            language,
            highlights_query: highlights_query.into(),
        }
    }
}

/// Registry of the built-in languages.
///
/// Supports 14 language ids: rust, c, cpp, python, javascript, typescript,
/// tsx, go, json, toml, markdown, html, css and sh.
pub struct LanguageRegistry {
    configs: HashMap<&'static str, LanguageConfig>,
    /// Extension (without leading dot) to language id
    extensions: HashMap<&'static str, &'static str>,
}

impl LanguageRegistry {
    pub fn empty() -> Self {
        Self {
            configs: HashMap::new(),
            extensions: HashMap::new(),
        }
    }

    /// Creates a registry with all supported languages.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.add(
            LanguageConfig::new(
                "rust",
                tree_sitter_rust::LANGUAGE.into(),
                tree_sitter_rust::HIGHLIGHTS_QUERY,
            ),
            &["rs"],
        );

        registry.add(
            LanguageConfig::new(
                "c",
                tree_sitter_c::LANGUAGE.into(),
                tree_sitter_c::HIGHLIGHT_QUERY,
            ),
            &["c"],
        );

        // The C++ query only covers C++-specific constructs; types, keywords
        // and functions come from the C query layered underneath.
        registry.add(
            LanguageConfig::new(
                "cpp",
                tree_sitter_cpp::LANGUAGE.into(),
                format!(
                    "{}\n{}",
                    tree_sitter_c::HIGHLIGHT_QUERY,
                    tree_sitter_cpp::HIGHLIGHT_QUERY
                ),
            ),
            &["cpp", "cc", "cxx", "hpp", "h"], // .h is ambiguous, default to C++
        );

        registry.add(
            LanguageConfig::new(
                "python",
                tree_sitter_python::LANGUAGE.into(),
                tree_sitter_python::HIGHLIGHTS_QUERY,
            ),
            &["py"],
        );

        registry.add(
            LanguageConfig::new(
                "javascript",
                tree_sitter_javascript::LANGUAGE.into(),
                tree_sitter_javascript::HIGHLIGHT_QUERY,
            ),
            &["js", "jsx", "mjs"],
        );

        // Same layering as C/C++: TypeScript extends the JavaScript query.
        let ts_query = format!(
            "{}\n{}",
            tree_sitter_javascript::HIGHLIGHT_QUERY,
            tree_sitter_typescript::HIGHLIGHTS_QUERY
        );
        registry.add(
            LanguageConfig::new(
                "typescript",
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                ts_query.clone(),
            ),
            &["ts"],
        );
        registry.add(
            LanguageConfig::new(
                "tsx",
                tree_sitter_typescript::LANGUAGE_TSX.into(),
                ts_query,
            ),
            &["tsx"],
        );

        registry.add(
            LanguageConfig::new(
                "go",
                tree_sitter_go::LANGUAGE.into(),
                tree_sitter_go::HIGHLIGHTS_QUERY,
            ),
            &["go"],
        );

        registry.add(
            LanguageConfig::new(
                "json",
                tree_sitter_json::LANGUAGE.into(),
                tree_sitter_json::HIGHLIGHTS_QUERY,
            ),
            &["json"],
        );

        registry.add(
            LanguageConfig::new(
                "toml",
                tree_sitter_toml_ng::LANGUAGE.into(),
                tree_sitter_toml_ng::HIGHLIGHTS_QUERY,
            ),
            &["toml"],
        );

        // Block grammar only; inline markup is not highlighted.
        registry.add(
            LanguageConfig::new(
                "markdown",
                tree_sitter_md::LANGUAGE.into(),
                tree_sitter_md::HIGHLIGHT_QUERY_BLOCK,
            ),
            &["md", "markdown"],
        );

        registry.add(
            LanguageConfig::new(
                "html",
                tree_sitter_html::LANGUAGE.into(),
                tree_sitter_html::HIGHLIGHTS_QUERY,
            ),
            &["html", "htm"],
        );

        registry.add(
            LanguageConfig::new(
                "css",
                tree_sitter_css::LANGUAGE.into(),
                tree_sitter_css::HIGHLIGHTS_QUERY,
            ),
            &["css"],
        );

        registry.add(
            LanguageConfig::new(
                "sh",
                tree_sitter_bash::LANGUAGE.into(),
                tree_sitter_bash::HIGHLIGHT_QUERY,
            ),
            &["sh", "bash", "zsh"],
        );

        registry
    }

    /// Adds a language under its id and the given extensions.
    pub fn add(&mut self, config: LanguageConfig, extensions: &[&'static str]) {
        for ext in extensions {
            self.extensions.insert(*ext, config.id);
        }
        self.configs.insert(config.id, config);
    }

    pub fn config(&self, id: &str) -> Option<&LanguageConfig> {
        self.configs.get(id)
    }

    /// Language id for a file extension, with or without the leading dot.
    pub fn language_for_extension(&self, ext: &str) -> Option<&'static str> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        self.extensions.get(ext).copied()
    }

    /// Language id for a file path, from its extension.
    pub fn language_for_path(&self, path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?;
        self.language_for_extension(&ext.to_ascii_lowercase())
    }

    /// Language id for a name as written by people (fenced code blocks,
    /// command lines): "Rust", "c++", "golang", "shell", "py", ...
    pub fn language_for_name(&self, name: &str) -> Option<&'static str> {
        let name = name.trim().to_lowercase();
        let id = match name.as_str() {
            "rs" => "rust",
            "py" => "python",
            "js" => "javascript",
            "ts" => "typescript",
            "c++" => "cpp",
            "golang" => "go",
            "md" => "markdown",
            "bash" | "shell" | "zsh" => "sh",
            other => other,
        };
        self.configs.get_key_value(id).map(|(id, _)| *id)
    }

    /// All language ids, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.configs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates over all supported extensions.
    pub fn supported_extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().copied()
    }

    /// Builds a highlighter for language `id`.
    pub fn create_highlighter(&self, id: &str) -> Result<TreeSitterHighlighter, SyntaxError> {
        let config = self
            .config(id)
            .ok_or_else(|| SyntaxError::UnknownLanguage(id.to_string()))?;
        TreeSitterHighlighter::new(config)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs a tree-sitter highlighter factory for every built-in language.
///
/// A grammar that fails to load is logged and leaves its documents
/// unhighlighted.
pub fn register_highlighters(registry: &mut HighlighterRegistry) {
    let languages = LanguageRegistry::new();
    for config in languages.configs.into_values() {
        let id = config.id;
        registry.register(id, move || match TreeSitterHighlighter::new(&config) {
            Ok(highlighter) => Some(Box::new(highlighter) as Box<dyn Highlighter>),
            Err(err) => {
                warn!(target: "sheen::syntax", language = config.id, error = %err, "highlighter setup failed");
                None
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_extension() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.language_for_extension("rs"), Some("rust"));
        assert_eq!(registry.language_for_extension(".rs"), Some("rust"));
    }

    #[test]
    fn test_cpp_extensions() {
        let registry = LanguageRegistry::new();
        for ext in ["cpp", "cc", "cxx", "hpp", "h"] {
            assert_eq!(
                registry.language_for_extension(ext),
                Some("cpp"),
                "Extension '{}' should be supported",
                ext
            );
        }
    }

    #[test]
    fn test_javascript_extensions() {
        let registry = LanguageRegistry::new();
        for ext in ["js", "jsx", "mjs"] {
            assert_eq!(registry.language_for_extension(ext), Some("javascript"));
        }
    }

    #[test]
    fn test_shell_extensions() {
        let registry = LanguageRegistry::new();
        for ext in ["sh", "bash", "zsh"] {
            assert_eq!(registry.language_for_extension(ext), Some("sh"));
        }
    }

    #[test]
    fn test_unknown_extension() {
        let registry = LanguageRegistry::new();
        assert!(registry.language_for_extension("xyz").is_none());
        assert!(registry.language_for_extension("txt").is_none());
    }

    #[test]
    fn test_language_for_path() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.language_for_path(Path::new("src/main.RS")), Some("rust"));
        assert_eq!(registry.language_for_path(Path::new("README.md")), Some("markdown"));
        assert_eq!(registry.language_for_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_language_for_name() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.language_for_name("Rust"), Some("rust"));
        assert_eq!(registry.language_for_name(" c++ "), Some("cpp"));
        assert_eq!(registry.language_for_name("golang"), Some("go"));
        assert_eq!(registry.language_for_name("shell"), Some("sh"));
        assert_eq!(registry.language_for_name("tsx"), Some("tsx"));
        assert_eq!(registry.language_for_name("cobol"), None);
    }

    #[test]
    fn test_ids() {
        let registry = LanguageRegistry::new();
        assert_eq!(
            registry.ids(),
            vec![
                "c", "cpp", "css", "go", "html", "javascript", "json", "markdown", "python",
                "rust", "sh", "toml", "tsx", "typescript",
            ]
        );
        assert!(registry.supported_extensions().count() >= 20);
    }

    #[test]
    fn test_every_language_compiles() {
        let registry = LanguageRegistry::new();
        for id in registry.ids() {
            assert!(
                registry.create_highlighter(id).is_ok(),
                "highlighter for {id} should build"
            );
        }
    }

    #[test]
    fn test_unknown_language_error() {
        let registry = LanguageRegistry::empty();
        assert!(matches!(
            registry.create_highlighter("rust"),
            Err(SyntaxError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_register_highlighters() {
        let mut registry = HighlighterRegistry::new();
        register_highlighters(&mut registry);
        assert_eq!(registry.len(), 14);
        assert!(registry.create("rust").is_some());
        assert!(registry.create("cobol").is_none());
    }
}
