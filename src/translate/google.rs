use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, FestlangError};
use crate::language::Language;
use super::{Translator, common::{base_url, build_client}};

/// Google Translate web endpoint (`client=gtx`), source language auto-detected
pub struct GoogleTranslator {
    client: Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        let url = format!("{}/translate_a/single", base_url(&self.config.endpoint));

        debug!("Sending translation request to: {} (tl={})", url, target.code());

        let response = self.client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| FestlangError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FestlangError::Translation(format!(
                "Google Translate error {}: {}", status, error_text
            )));
        }

        let text = response.text().await?;
        parse_body(&text)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// Decodes a raw response body and extracts the translation
pub fn parse_body(body: &str) -> Result<String> {
    let body: Value = serde_json::from_str(body)?;
    parse_response(&body)
}

/// Joins the translated sentence chunks of a `translate_a/single` response.
///
/// The body is a nested array; `body[0]` holds one `[translated, source, ...]`
/// entry per sentence.
pub fn parse_response(body: &Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| FestlangError::Translation("Unexpected response shape".to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(FestlangError::Translation("Empty translation received".to_string()));
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_joins_sentences() {
        let body = json!([
            [
                ["Great event. ", "Gran evento. ", null, null, 10],
                ["Come early.", "Ven temprano.", null, null, 10]
            ],
            null,
            "es"
        ]);
        assert_eq!(parse_response(&body).unwrap(), "Great event. Come early.");
    }

    #[test]
    fn test_parse_body_reports_invalid_json() {
        let err = parse_body("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, FestlangError::Json(_)));
        assert_eq!(parse_body(r#"[[["Fête","Fiesta"]],null,"es"]"#).unwrap(), "Fête");
    }

    #[test]
    fn test_parse_rejects_unexpected_shape() {
        assert!(parse_response(&json!({"error": "quota"})).is_err());
        assert!(parse_response(&json!([[], null, "es"])).is_err());
    }
}
