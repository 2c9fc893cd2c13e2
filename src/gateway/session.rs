use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::Instrument;

use super::prompt::PromptTemplate;
use super::resolver::Resolver;
use super::types::{CycleState, GatewayResult, Query, Resolution};
use crate::backend::{BackendAdapter, ModelDescriptor};
use crate::registry::{ModelRegistry, RegistrySnapshot};
use crate::utils::{GatewayError, Result};

/// Transport-agnostic driver of one query/result cycle.
///
/// Owns the registry; both transports call [`SessionGateway::handle`] and get
/// the same [`GatewayResult`] for the same query and backend state.
pub struct SessionGateway {
    registry: Arc<ModelRegistry>,
    backend: BackendAdapter,
    resolver: Resolver,
    prompt: PromptTemplate,
    cycles: AtomicU64,
}

impl SessionGateway {
    pub fn new(registry: ModelRegistry, backend: BackendAdapter, prompt: PromptTemplate) -> Self {
        let registry = Arc::new(registry);
        let resolver = Resolver::new(Arc::clone(&registry), backend.clone());
        Self {
            registry,
            backend,
            resolver,
            prompt,
            cycles: AtomicU64::new(0),
        }
    }

    /// Run one cycle: resolve, apply any switch, generate
    pub async fn handle(&self, query: Query) -> GatewayResult {
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        let span = tracing::info_span!("cycle", id = cycle);
        self.run_cycle(query).instrument(span).await
    }

    async fn run_cycle(&self, query: Query) -> GatewayResult {
        transition(CycleState::Received);

        let resolution = self.resolver.resolve(&query).await;
        transition(CycleState::Resolved);

        let model = match self.apply(resolution) {
            Ok(model) => model,
            Err(result) => return finish(result),
        };

        let prompt = match self.prompt.render(&query.text) {
            Ok(prompt) => prompt,
            Err(e) => return finish(GatewayResult::failed(&e)),
        };

        transition(CycleState::Dispatched);
        tracing::info!("Processing query with model: {}", model);

        match self.backend.generate(&model, &prompt).await {
            Ok(text) => {
                tracing::debug!("Got response (length: {})", text.len());
                finish(GatewayResult::completed(text))
            }
            Err(e) => {
                tracing::error!("Generation with {} failed: {}", model, e);
                finish(GatewayResult::failed(&e))
            }
        }
    }

    /// Model to dispatch to, or the result that ends the cycle early.
    ///
    /// `UseActive` keeps the model seen at resolution time even if another
    /// cycle has switched since.
    fn apply(&self, resolution: Resolution) -> std::result::Result<String, GatewayResult> {
        match resolution {
            Resolution::UseActive(model) => Ok(model),
            Resolution::SwitchTo(model) => {
                self.registry.activate(&model);
                tracing::info!("Switched active model to {}", model);
                Ok(model)
            }
            Resolution::InstallNeeded(model) => {
                tracing::info!("Model {} is not installed, suggesting a pull", model);
                Err(GatewayResult::install_suggested(&model))
            }
            Resolution::Error(reason) => {
                Err(GatewayResult::failed(&GatewayError::InvalidQuery(reason)))
            }
        }
    }

    /// Install a model and make it active.
    ///
    /// The registry is only touched when the pull succeeds.
    pub async fn pull_model(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GatewayError::InvalidQuery("model_name must be non-empty".to_string()));
        }

        tracing::info!("Attempting to pull model: {}", name);
        let log = self.backend.pull(name).await?;
        self.registry.activate(name);
        tracing::info!("Pulled {}, now active", name);
        Ok(log)
    }

    pub fn registry_snapshot(&self) -> RegistrySnapshot {
        self.registry.snapshot()
    }

    pub async fn installed_models(&self) -> Result<Vec<ModelDescriptor>> {
        self.backend.list_installed().await
    }

    /// Whether the backend answers a listing call
    pub async fn backend_health(&self) -> Result<()> {
        self.backend.list_installed().await.map(|_| ())
    }

    pub fn backend(&self) -> &BackendAdapter {
        &self.backend
    }
}

fn transition(state: CycleState) {
    tracing::debug!(%state, "cycle transition");
}

fn finish(result: GatewayResult) -> GatewayResult {
    transition(result.outcome.state());
    result
}
