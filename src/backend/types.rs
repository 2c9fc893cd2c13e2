use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{GENERATE_TIMEOUT_SECS, LIST_TIMEOUT_SECS, PULL_TIMEOUT_SECS};

/// One installed model as reported by the backend listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(rename = "size")]
    pub size_label: String,
    #[serde(rename = "modified")]
    pub installed_at: String,
}

/// Deadlines applied to each backend capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub list: Duration,
    pub generate: Duration,
    pub pull: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            list: Duration::from_secs(LIST_TIMEOUT_SECS),
            generate: Duration::from_secs(GENERATE_TIMEOUT_SECS),
            pull: Duration::from_secs(PULL_TIMEOUT_SECS),
        }
    }
}
