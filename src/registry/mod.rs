// Gateway module for the model registry - follows the Train Station Pattern
// All external access must go through this gateway

mod store;

pub use store::{ModelRegistry, RegistrySnapshot};
