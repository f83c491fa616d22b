// Translation backends
//
// Every backend implements `Translator`, one field and one language at a time:
// - Google: public Google Translate web endpoint
// - Ollama: local LLM with a JSON-format prompt
// - Passthrough: returns the source text unchanged

pub mod common;
pub mod google;
pub mod ollama;
pub mod passthrough;

use async_trait::async_trait;

use crate::config::{TranslateConfig, TranslationBackend};
use crate::error::Result;
use crate::language::Language;

pub use google::GoogleTranslator;
pub use ollama::OllamaTranslator;
pub use passthrough::PassthroughTranslator;

/// Translation capability used by the batch job
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`. Errors are reported per call and never retried.
    async fn translate(&self, text: &str, target: Language) -> Result<String>;

    /// Short backend name for diagnostics
    fn name(&self) -> &'static str;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator for the configured backend
    pub fn create(config: &TranslateConfig) -> Result<Box<dyn Translator>> {
        let translator: Box<dyn Translator> = match config.backend {
            TranslationBackend::Google => Box::new(GoogleTranslator::new(config.clone())?),
            TranslationBackend::Ollama => Box::new(OllamaTranslator::new(config.clone())?),
            TranslationBackend::Passthrough => Box::new(PassthroughTranslator),
        };
        Ok(translator)
    }
}

/// Check that the configured backend answers
pub async fn check_availability(config: &TranslateConfig) -> Result<()> {
    match config.backend {
        TranslationBackend::Ollama => {
            common::check_ollama_availability(&config.endpoint, &config.model).await
        }
        TranslationBackend::Google => {
            let translator = GoogleTranslator::new(config.clone())?;
            let probe = translator.translate("festival", Language::Spanish).await?;
            tracing::info!("Google Translate answered probe: festival -> {}", probe);
            Ok(())
        }
        TranslationBackend::Passthrough => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_factory_selects_backend() {
        let mut config = Config::default().translate;

        config.backend = TranslationBackend::Google;
        assert_eq!(TranslatorFactory::create(&config).unwrap().name(), "google");

        config.backend = TranslationBackend::Ollama;
        assert_eq!(TranslatorFactory::create(&config).unwrap().name(), "ollama");

        config.backend = TranslationBackend::Passthrough;
        assert_eq!(TranslatorFactory::create(&config).unwrap().name(), "passthrough");
    }

    #[tokio::test]
    async fn test_passthrough_is_always_available() {
        let mut config = Config::default().translate;
        config.backend = TranslationBackend::Passthrough;
        assert!(check_availability(&config).await.is_ok());
    }
}
