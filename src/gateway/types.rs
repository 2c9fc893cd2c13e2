use std::fmt;

use crate::constants::PULL_ACTION_PREFIX;
use crate::utils::GatewayError;

/// One inbound chat message, independent of the transport it arrived on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    /// Empty means "whatever is active"
    pub requested_model: String,
}

impl Query {
    pub fn new(text: impl Into<String>, requested_model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requested_model: requested_model.into(),
        }
    }
}

/// What to do with a query's model before generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the model that was active when the query was resolved
    UseActive(String),
    SwitchTo(String),
    InstallNeeded(String),
    Error(String),
}

/// Per-cycle states. Only the last three are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Received,
    Resolved,
    Dispatched,
    Completed,
    InstallSuggested,
    Failed,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleState::Received => "received",
            CycleState::Resolved => "resolved",
            CycleState::Dispatched => "dispatched",
            CycleState::Completed => "completed",
            CycleState::InstallSuggested => "install_suggested",
            CycleState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Why a cycle ended in `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Decode,
    InvalidQuery,
    Backend,
    Timeout,
    Prompt,
}

impl FailureKind {
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::Decode => "decode_error",
            FailureKind::InvalidQuery => "invalid_query",
            FailureKind::Backend => "backend_failure",
            FailureKind::Timeout => "generation_timeout",
            FailureKind::Prompt => "prompt_error",
        }
    }
}

impl From<&GatewayError> for FailureKind {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::Decode(_) => FailureKind::Decode,
            GatewayError::InvalidQuery(_) => FailureKind::InvalidQuery,
            GatewayError::GenerationTimeout(_) => FailureKind::Timeout,
            GatewayError::Prompt(_) => FailureKind::Prompt,
            GatewayError::BackendUnavailable(_)
            | GatewayError::Backend(_)
            | GatewayError::PullFailed(_) => FailureKind::Backend,
        }
    }
}

/// Terminal outcome of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    InstallSuggested,
    Failed(FailureKind),
}

impl Outcome {
    pub fn state(&self) -> CycleState {
        match self {
            Outcome::Completed => CycleState::Completed,
            Outcome::InstallSuggested => CycleState::InstallSuggested,
            Outcome::Failed(_) => CycleState::Failed,
        }
    }
}

/// What a transport sends back for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResult {
    pub text: String,
    /// Suggested follow-up, e.g. `pull:llama4`
    pub action_hint: Option<String>,
    pub outcome: Outcome,
}

impl GatewayResult {
    pub fn completed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action_hint: None,
            outcome: Outcome::Completed,
        }
    }

    pub fn install_suggested(model: &str) -> Self {
        Self {
            text: format!(
                "Model {} is not available. Would you like to pull it from Ollama's repository?",
                model
            ),
            action_hint: Some(format!("{}{}", PULL_ACTION_PREFIX, model)),
            outcome: Outcome::InstallSuggested,
        }
    }

    pub fn failed(err: &GatewayError) -> Self {
        Self {
            text: err.to_string(),
            action_hint: None,
            outcome: Outcome::Failed(FailureKind::from(err)),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }
}
