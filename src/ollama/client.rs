use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::utils::{GatewayError, Result};

/// Thin client for Ollama's HTTP generate endpoint
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            temperature,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single non-streaming completion
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GatewayError::BackendUnavailable(format!(
                        "Ollama server not running at {}. Start it with: ollama serve",
                        self.base_url
                    ))
                } else {
                    GatewayError::Backend(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Backend(format!("{}: {}", status, text.trim())));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Backend(format!("invalid response from Ollama: {}", e)))?;

        match body.error {
            Some(error) => Err(GatewayError::Backend(error)),
            None => Ok(body.response),
        }
    }
}
