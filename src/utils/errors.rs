use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Error parsing request: {0}")]
    Decode(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Error generating response: {0}")]
    Backend(String),

    #[error("Generation timed out after {0}")]
    GenerationTimeout(String),

    #[error("Failed to pull model: {0}")]
    PullFailed(String),

    #[error("Prompt template error: {0}")]
    Prompt(String),
}

impl From<minijinja::Error> for GatewayError {
    fn from(err: minijinja::Error) -> Self {
        GatewayError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
