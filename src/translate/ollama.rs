use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, FestlangError};
use crate::language::Language;
use super::{Translator, common::{base_url, build_client}};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
}

/// Translation through a local Ollama model
pub struct OllamaTranslator {
    client: Client,
    config: TranslateConfig,
}

impl OllamaTranslator {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(text, target),
            stream: false,
            format: "json".to_string(),
        };

        let url = format!("{}/api/generate", base_url(&self.config.endpoint));

        debug!("Sending translation request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| FestlangError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FestlangError::Translation(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let generated: GenerateResponse = response.json().await
            .map_err(|e| FestlangError::Translation(format!("Failed to parse response: {}", e)))?;

        let raw_response = generated.response.trim();

        debug!("Raw Ollama response: {}", raw_response);

        extract_translation(raw_response)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

fn build_prompt(text: &str, target: Language) -> String {
    let language_name = target.name();
    format!(
        "You are a professional translator working on festival listings.\n\
         \n\
         CRITICAL: You must translate the text to {} ONLY. Do not translate to any other language.\n\
         The target language is: {} (language code: {})\n\
         If the text is already in {}, return it unchanged.\n\
         \n\
         Return ONLY the translation in JSON format as {{\"text\":\"your {} translation here\"}}.\n\
         Do not include any explanations, alternatives, or text in other languages.\n\
         \n\
         [Text to translate]\n\
         {}\n",
        language_name, language_name, target.code(), language_name, language_name, text
    )
}

/// Reads `{"text": ...}` from the model output, else the first plausible line
fn extract_translation(raw_response: &str) -> Result<String> {
    if raw_response.is_empty() {
        return Err(FestlangError::Translation("Empty translation received".to_string()));
    }

    if let Ok(result) = serde_json::from_str::<TranslationResult>(raw_response) {
        let text = result.text.trim();
        if text.is_empty() {
            return Err(FestlangError::Translation("Empty translation received".to_string()));
        }
        return Ok(text.to_string());
    }

    Ok(clean_translation_response(raw_response))
}

/// Clean up translation response to extract just the translation
fn clean_translation_response(response: &str) -> String {
    for line in response.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty()
            || trimmed.starts_with("Here is")
            || trimmed.starts_with("Here are")
            || trimmed.starts_with("Translation:")
            || trimmed.starts_with("- ")
            || trimmed.starts_with("* ")
        {
            continue;
        }

        if trimmed.starts_with("**") && trimmed.ends_with("**") {
            continue;
        }

        return trimmed.to_string();
    }

    response.trim().to_string()
}
