use anyhow::{Context, Result};
use std::sync::Arc;

use crate::app::Config;
use crate::backend::{Backend, BackendAdapter, Timeouts};
use crate::gateway::{PromptTemplate, SessionGateway};
use crate::ollama::OllamaBackend;
use crate::registry::ModelRegistry;

/// Global application state shared by every transport
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<Config>,
    /// The one gateway; owns the registry
    pub gateway: Arc<SessionGateway>,
}

impl AppState {
    /// Wire a gateway around any backend
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Result<Self> {
        let prompt = PromptTemplate::new(config.prompt.template.clone())
            .context("Invalid prompt template in configuration")?;
        let registry = ModelRegistry::new(&config.models.default, &config.models.seed);
        let adapter = BackendAdapter::new(backend, Timeouts::from(&config.timeouts));

        Ok(Self {
            config: Arc::new(config),
            gateway: Arc::new(SessionGateway::new(registry, adapter, prompt)),
        })
    }

    /// State backed by the local Ollama install
    pub fn from_config(config: Config) -> Result<Self> {
        let backend = Arc::new(OllamaBackend::from_config(&config.ollama));
        Self::new(config, backend)
    }
}
