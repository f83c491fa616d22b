use std::time::Duration;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::TranslateConfig;
use crate::error::{Result, FestlangError};

/// HTTP client shared by the network backends
pub fn build_client(config: &TranslateConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Endpoint without trailing slash, so paths can be appended with `format!`
pub fn base_url(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/')
}

/// Check if Ollama is available and the model is loaded
pub async fn check_ollama_availability(endpoint: &str, model: &str) -> Result<()> {
    let client = Client::new();
    let url = format!("{}/api/show", base_url(endpoint));

    let request = json!({
        "name": model
    });

    let response = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| FestlangError::Translation(format!("Failed to connect to Ollama: {}", e)))?;

    if response.status().is_success() {
        info!("Ollama model '{}' is available", model);
        Ok(())
    } else {
        Err(FestlangError::Translation(format!(
            "Ollama model '{}' not found. Please pull the model first: ollama pull {}",
            model, model
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        assert_eq!(base_url("http://localhost:11434/"), "http://localhost:11434");
        assert_eq!(base_url("https://translate.googleapis.com"), "https://translate.googleapis.com");
    }
}
