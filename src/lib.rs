pub mod app;
pub mod backend;
pub mod cli;
pub mod constants;
pub mod gateway;
pub mod ollama;
pub mod registry;
pub mod transport;
pub mod utils;

pub use app::{load_config, AppState, Config};
pub use backend::{Backend, BackendAdapter, ModelDescriptor, Timeouts};
pub use gateway::{GatewayResult, Query, Resolution, SessionGateway};
pub use registry::ModelRegistry;
pub use transport::router;
pub use utils::GatewayError;
