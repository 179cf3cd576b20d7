// Chunk: docs/chunks/engine_config - Engine settings and environment overrides

//! Engine settings.
//!
//! Settings come from JSON (a file or a string) and may be overridden by
//! environment variables:
//!
//! - `SHEEN_SEMANTIC_HIGHLIGHTING`: `1/true/yes/on` or `0/false/no/off`
//! - `SHEEN_QUANTA_USEC`: per-tick budget in microseconds

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default per-tick budget: 5ms.
pub const DEFAULT_QUANTA_USEC: u64 = 5_000;

pub const ENV_SEMANTIC_HIGHLIGHTING: &str = "SHEEN_SEMANTIC_HIGHLIGHTING";
pub const ENV_QUANTA_USEC: &str = "SHEEN_QUANTA_USEC";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Whether the engine highlights at all.
    pub semantic_highlighting: bool,
    /// Time budget for one tick, in microseconds.
    pub quanta_usec: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            semantic_highlighting: true,
            quanta_usec: DEFAULT_QUANTA_USEC,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Applies environment overrides. Unrecognized values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(enabled) = env::var(ENV_SEMANTIC_HIGHLIGHTING)
            .ok()
            .and_then(|v| parse_env_flag(&v))
        {
            self.semantic_highlighting = enabled;
        }
        if let Some(usec) = env::var(ENV_QUANTA_USEC)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|usec| *usec > 0)
        {
            self.quanta_usec = usec;
        }
        self
    }

    pub fn quanta(&self) -> Duration {
        Duration::from_micros(self.quanta_usec)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.quanta_usec == 0 {
            return Err(ConfigError::Invalid {
                field: "quanta-usec",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses a boolean environment flag.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.semantic_highlighting);
        assert_eq!(config.quanta(), Duration::from_millis(5));
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "semantic-highlighting": false }"#).unwrap();
        assert!(!config.semantic_highlighting);
        assert_eq!(config.quanta_usec, DEFAULT_QUANTA_USEC);
    }

    #[test]
    fn test_from_json_rejects_zero_quanta() {
        let err = EngineConfig::from_json(r#"{ "quanta-usec": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "quanta-usec", .. }));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            EngineConfig::from_json("{ nope").unwrap_err(),
            ConfigError::Json(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "quanta-usec": 2000 }}"#).unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.quanta(), Duration::from_millis(2));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/sheen.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
    }
}
