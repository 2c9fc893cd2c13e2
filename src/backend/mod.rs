// Gateway module for backends - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod adapter;
mod listing;
mod traits;
mod types;

// Public re-exports - the ONLY way to access backend functionality
pub use adapter::BackendAdapter;
pub use listing::{parse_descriptors, parse_names};
pub use traits::Backend;
#[cfg(test)]
pub use traits::MockBackend;
pub use types::{ModelDescriptor, Timeouts};
