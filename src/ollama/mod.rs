/// Ollama integration module - Gateway
mod client;
mod detector;
mod installer;

pub use client::OllamaClient;
pub use detector::{is_installed, list_models};
pub use installer::install_model;

use async_trait::async_trait;

use crate::app::OllamaConfig;
use crate::backend::Backend;
use crate::utils::Result;

/// The local Ollama install: CLI for listing and pulling, HTTP for generation
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    binary: String,
    client: OllamaClient,
}

impl OllamaBackend {
    pub fn new(binary: impl Into<String>, client: OllamaClient) -> Self {
        Self {
            binary: binary.into(),
            client,
        }
    }

    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::new(
            config.binary.clone(),
            OllamaClient::new(config.base_url(), config.temperature),
        )
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    async fn list_installed(&self) -> Result<String> {
        list_models(&self.binary).await
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.client.generate(model, prompt).await
    }

    async fn pull(&self, model: &str) -> Result<String> {
        install_model(&self.binary, model).await
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
