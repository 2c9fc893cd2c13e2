use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::listing::{parse_descriptors, parse_names};
use super::traits::Backend;
use super::types::{ModelDescriptor, Timeouts};
use crate::utils::{GatewayError, Result};

/// Uniform, deadline-bounded access to a [`Backend`].
///
/// This is the only place that parses the backend listing and the only place
/// that decides what an elapsed deadline means for each capability.
#[derive(Clone)]
pub struct BackendAdapter {
    backend: Arc<dyn Backend>,
    timeouts: Timeouts,
}

impl BackendAdapter {
    pub fn new(backend: Arc<dyn Backend>, timeouts: Timeouts) -> Self {
        Self { backend, timeouts }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    async fn raw_listing(&self) -> Result<String> {
        let limit = self.timeouts.list;
        bounded(limit, self.backend.list_installed())
            .await
            .unwrap_or_else(|| {
                Err(GatewayError::BackendUnavailable(format!(
                    "model listing timed out after {}",
                    describe(limit)
                )))
            })
    }

    /// Installed models with name, size and modification time
    pub async fn list_installed(&self) -> Result<Vec<ModelDescriptor>> {
        Ok(parse_descriptors(&self.raw_listing().await?))
    }

    /// Names of installed models, used for resolution
    pub async fn installed_names(&self) -> Result<Vec<String>> {
        Ok(parse_names(&self.raw_listing().await?))
    }

    /// One generation call, no retry
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let limit = self.timeouts.generate;
        match bounded(limit, self.backend.generate(model, prompt)).await {
            Some(result) => result,
            None => {
                tracing::warn!(model, "generation abandoned after {}", describe(limit));
                Err(GatewayError::GenerationTimeout(describe(limit)))
            }
        }
    }

    /// Install a model. Registration is the caller's job.
    pub async fn pull(&self, model: &str) -> Result<String> {
        let limit = self.timeouts.pull;
        match bounded(limit, self.backend.pull(model)).await {
            Some(Ok(log)) => Ok(log),
            Some(Err(GatewayError::PullFailed(reason))) => Err(GatewayError::PullFailed(reason)),
            Some(Err(other)) => Err(GatewayError::PullFailed(other.to_string())),
            None => Err(GatewayError::PullFailed(format!(
                "pull of {} timed out after {}",
                model,
                describe(limit)
            ))),
        }
    }
}

/// `None` when the deadline elapses; the inner future is dropped
async fn bounded<T>(limit: Duration, fut: impl Future<Output = T>) -> Option<T> {
    tokio::time::timeout(limit, fut).await.ok()
}

fn describe(limit: Duration) -> String {
    if limit.as_secs() > 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{}ms", limit.as_millis())
    }
}
