//! Shared fixtures: an in-process backend and gateway state builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ollama_gateway::{
    app::{AppState, Config},
    backend::{Backend, BackendAdapter, Timeouts},
    constants::DEFAULT_PROMPT_TEMPLATE,
    gateway::{PromptTemplate, SessionGateway},
    registry::ModelRegistry,
    utils::{GatewayError, Result},
};

pub const LISTING: &str = "NAME        SIZE      MODIFIED
gemma3      3.3GB     2 weeks ago
llama4      67GB      3 days ago
";

/// Scriptable backend that records every generation call
pub struct FakeBackend {
    listing: Mutex<Option<String>>,
    generate_delay: Mutex<Option<Duration>>,
    pull_result: Mutex<std::result::Result<String, String>>,
    generated: Mutex<Vec<(String, String)>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            listing: Mutex::new(Some(LISTING.to_string())),
            generate_delay: Mutex::new(None),
            pull_result: Mutex::new(Ok(
                "pulling manifest\nverifying sha256 digest\nsuccess\n".to_string(),
            )),
            generated: Mutex::new(Vec::new()),
        })
    }

    /// `None` makes the listing call fail as if the CLI were missing
    pub fn set_listing(&self, listing: Option<&str>) {
        *self.listing.lock().unwrap() = listing.map(str::to_string);
    }

    pub fn set_generate_delay(&self, delay: Option<Duration>) {
        *self.generate_delay.lock().unwrap() = delay;
    }

    pub fn fail_pulls(&self, diagnostic: &str) {
        *self.pull_result.lock().unwrap() = Err(diagnostic.to_string());
    }

    /// Models passed to `generate`, in call order
    pub fn generated_models(&self) -> Vec<String> {
        self.generated
            .lock()
            .unwrap()
            .iter()
            .map(|(model, _)| model.clone())
            .collect()
    }

    pub fn generated_prompts(&self) -> Vec<String> {
        self.generated
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_installed(&self) -> Result<String> {
        self.listing
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| {
                GatewayError::BackendUnavailable("failed to run ollama list".to_string())
            })
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.generated
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        let delay = *self.generate_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let question = prompt
            .lines()
            .find_map(|line| line.strip_prefix("User Query: "))
            .unwrap_or_default();
        Ok(format!("[{}] answer to: {}", model, question))
    }

    async fn pull(&self, _model: &str) -> Result<String> {
        self.pull_result
            .lock()
            .unwrap()
            .clone()
            .map_err(GatewayError::PullFailed)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn fast_timeouts() -> Timeouts {
    Timeouts {
        list: Duration::from_secs(2),
        generate: Duration::from_millis(200),
        pull: Duration::from_secs(2),
    }
}

/// Registry seeded with `knownModels={"gemma3"}`, `activeModel="gemma3"`
pub fn state_with(backend: Arc<FakeBackend>) -> AppState {
    let gateway = SessionGateway::new(
        ModelRegistry::new("gemma3", ["gemma3"]),
        BackendAdapter::new(backend, fast_timeouts()),
        PromptTemplate::new(DEFAULT_PROMPT_TEMPLATE).expect("default template"),
    );
    AppState {
        config: Arc::new(Config::default()),
        gateway: Arc::new(gateway),
    }
}
