// Gateway module for the session gateway - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod prompt;
mod resolver;
mod session;
mod types;

// Public re-exports - the ONLY way to access gateway functionality
pub use prompt::PromptTemplate;
pub use resolver::Resolver;
pub use session::SessionGateway;
pub use types::{CycleState, FailureKind, GatewayResult, Outcome, Query, Resolution};
