use async_trait::async_trait;

use crate::utils::Result;

/// Raw capabilities of a text-generation backend.
///
/// Implementations do no timeout handling and no parsing; both live in
/// [`BackendAdapter`](super::BackendAdapter).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Tabular listing of installed models, header row first
    async fn list_installed(&self) -> Result<String>;

    /// Generate a completion for an already formatted prompt
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Install a model, returning the installer's log output
    async fn pull(&self, model: &str) -> Result<String>;

    /// Human readable backend name for logs
    fn name(&self) -> &'static str;
}
