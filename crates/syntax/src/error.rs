// Chunk: docs/chunks/syntax_highlighting - Grammar and query setup errors

use thiserror::Error;

/// Failure to set up a tree-sitter highlighter for a language.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("grammar for {language} is incompatible with this tree-sitter")]
    Language {
        language: String,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("highlight query for {language} does not compile")]
    Query {
        language: String,
        #[source]
        source: tree_sitter::QueryError,
    },

    #[error("unknown language {0:?}")]
    UnknownLanguage(String),
}
