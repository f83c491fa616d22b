use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::{Result, FestlangError};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "festlang.toml";

fn default_timeout_secs() -> u64 {
    30
}

fn default_row_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub translate: TranslateConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation backend to call for every field
    pub backend: TranslationBackend,
    /// Base URL of the backend service
    pub endpoint: String,
    /// LLM model (Ollama backend only)
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationBackend {
    /// Google: public Google Translate web endpoint
    Google,
    /// Ollama: local LLM through the Ollama generate API
    Ollama,
    /// Passthrough: returns the source text unchanged (dry runs)
    Passthrough,
}

impl TranslationBackend {
    /// Endpoint used when switching backend from the command line
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Google => "https://translate.googleapis.com",
            Self::Ollama => "http://localhost:11434",
            Self::Passthrough => "",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Festival export to translate
    pub input: PathBuf,
    /// Multilingual CSV to write
    pub output: PathBuf,
    /// Pause before each row's translations, in milliseconds
    #[serde(default = "default_row_delay_ms")]
    pub row_delay_ms: u64,
}

impl BatchConfig {
    pub fn row_delay(&self) -> Duration {
        Duration::from_millis(self.row_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translate: TranslateConfig {
                backend: TranslationBackend::Google,
                endpoint: TranslationBackend::Google.default_endpoint().to_string(),
                model: "llama3.2:3b".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            batch: BatchConfig {
                input: PathBuf::from("file.csv"),
                output: PathBuf::from("festival_lang.csv"),
                row_delay_ms: default_row_delay_ms(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FestlangError::Config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FestlangError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| FestlangError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Explicit path first, then `festlang.toml` in the working directory, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("festlang.toml");

        let mut config = Config::default();
        config.translate.backend = TranslationBackend::Ollama;
        config.batch.row_delay_ms = 250;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.translate.backend, TranslationBackend::Ollama);
        assert_eq!(loaded.batch.row_delay(), Duration::from_millis(250));
        assert_eq!(loaded.batch.output, PathBuf::from("festival_lang.csv"));
    }

    #[test]
    fn test_optional_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [translate]
            backend = "Google"
            endpoint = "https://translate.googleapis.com"
            model = "unused"

            [batch]
            input = "in.csv"
            output = "out.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.translate.timeout_secs, 30);
        assert_eq!(config.batch.row_delay_ms, 1000);
    }

    #[test]
    fn test_invalid_toml_is_toml_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("festlang.toml");
        std::fs::write(&path, "[translate\nbackend = ").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, FestlangError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/festlang.toml").unwrap_err();
        assert!(matches!(err, FestlangError::Config(_)));
    }
}
