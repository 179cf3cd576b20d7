// Chunk: docs/chunks/workspace - Workspace layout and command-line front end
//!
//! sheen: prints a source file with its semantic highlighting.
//!
//! # Usage
//!
//! ```bash
//! # Language from the file extension, Catppuccin Mocha colors
//! sheen src/main.rs
//!
//! # Force a language and disable colors
//! sheen notes.txt --language markdown --scheme none
//!
//! # Debug logging from the engine
//! SHEEN_LOG=sheen=debug sheen src/lib.rs
//! ```
//!
//! Settings are read from `<config dir>/sheen/config.json` when it exists,
//! then `SHEEN_SEMANTIC_HIGHLIGHTING` and `SHEEN_QUANTA_USEC` override them.

use std::cell::RefCell;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sheen::{highlight_to_idle, render_line};
use sheen_buffer::Document;
use sheen_engine::EngineConfig;
use sheen_syntax::{LanguageRegistry, CATPPUCCIN_MOCHA, SCHEME_IDS};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SHEEN_LOG";

/// Prints a source file with incremental semantic highlighting applied.
#[derive(Parser, Debug)]
#[command(name = "sheen", version, about)]
struct Args {
    /// File to highlight
    #[arg(required_unless_present = "list_languages")]
    file: Option<PathBuf>,

    /// Language id or alias (defaults to the file extension)
    #[arg(short, long)]
    language: Option<String>,

    /// Style scheme, or "none" to print without colors
    #[arg(short, long, default_value = CATPPUCCIN_MOCHA)]
    scheme: String,

    /// Settings file (defaults to <config dir>/sheen/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-tick time budget in microseconds
    #[arg(long)]
    quanta_usec: Option<u64>,

    /// List the supported language ids and exit
    #[arg(long)]
    list_languages: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let languages = LanguageRegistry::new();
    if args.list_languages {
        for id in languages.ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let Some(file) = args.file.as_deref() else {
        bail!("no file given");
    };
    let config = load_config(args.config.as_deref(), args.quanta_usec)?;
    let language = resolve_language(&languages, args.language.as_deref(), file)?;
    let scheme = match args.scheme.as_str() {
        "none" => None,
        id => Some(Rc::new(sheen_syntax::scheme_by_id(id).with_context(|| {
            format!("unknown style scheme {id:?} (expected one of: none, {})", SCHEME_IDS.join(", "))
        })?)),
    };

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    info!(file = %file.display(), language, chars = content.chars().count(), "highlighting");

    let doc = Rc::new(RefCell::new(Document::from_str(&content)));
    {
        let mut doc = doc.borrow_mut();
        doc.set_language(language);
        doc.set_style_scheme(scheme);
    }

    let engine = highlight_to_idle(&doc, &config);
    debug!(state = ?engine.state(), "engine settled");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let doc = doc.borrow();
    for line in 0..doc.line_count() {
        let Some(styled) = doc.styled_line(line) else {
            break;
        };
        // A trailing newline leaves an empty last line; don't print it twice.
        if line + 1 == doc.line_count() && styled.is_empty() {
            break;
        }
        writeln!(out, "{}", render_line(&styled))?;
    }
    out.flush()?;
    Ok(())
}

/// Reads settings from `explicit`, else the per-user file if present, then
/// applies environment and command-line overrides.
fn load_config(explicit: Option<&Path>, quanta_usec: Option<u64>) -> Result<EngineConfig> {
    let config = match explicit {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => match dirs::config_dir().map(|dir| dir.join("sheen").join("config.json")) {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "using per-user settings");
                EngineConfig::load(&path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?
            }
            _ => EngineConfig::default(),
        },
    };

    let mut config = config.with_env_overrides();
    if let Some(usec) = quanta_usec {
        if usec == 0 {
            bail!("--quanta-usec must be greater than zero");
        }
        config.quanta_usec = usec;
    }
    Ok(config)
}

fn resolve_language(
    languages: &LanguageRegistry,
    name: Option<&str>,
    file: &Path,
) -> Result<Option<&'static str>> {
    match name {
        Some(name) => match languages.language_for_name(name) {
            Some(id) => Ok(Some(id)),
            None => bail!(
                "unknown language {name:?} (supported: {})",
                languages.ids().join(", ")
            ),
        },
        None => Ok(languages.language_for_path(file)),
    }
}
