use std::sync::Arc;

use super::types::{Query, Resolution};
use crate::backend::BackendAdapter;
use crate::registry::ModelRegistry;

/// Decides which model answers a query.
///
/// Reads the registry but never mutates it; applying a `SwitchTo` is the
/// session gateway's job. The registry lock is released before the backend
/// listing is consulted.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<ModelRegistry>,
    backend: BackendAdapter,
}

impl Resolver {
    pub fn new(registry: Arc<ModelRegistry>, backend: BackendAdapter) -> Self {
        Self { registry, backend }
    }

    pub async fn resolve(&self, query: &Query) -> Resolution {
        if let Err(reason) = validate(query) {
            return Resolution::Error(reason);
        }

        let requested = query.requested_model.trim();
        let snapshot = self.registry.snapshot();

        if requested.is_empty() || requested == snapshot.active_model {
            return Resolution::UseActive(snapshot.active_model);
        }

        if snapshot.is_known(requested) {
            return Resolution::SwitchTo(requested.to_string());
        }

        match self.backend.installed_names().await {
            Ok(names) => match names.into_iter().find(|n| n.eq_ignore_ascii_case(requested)) {
                // Registered under the backend's spelling
                Some(installed) => {
                    tracing::info!("{} is installed but was not registered", installed);
                    Resolution::SwitchTo(installed)
                }
                None => Resolution::InstallNeeded(requested.to_string()),
            },
            Err(e) => {
                // Treated as "not installed" so the caller still gets a pull suggestion
                tracing::warn!(
                    "Could not list installed models, assuming {} is absent: {}",
                    requested,
                    e
                );
                Resolution::InstallNeeded(requested.to_string())
            }
        }
    }
}

fn validate(query: &Query) -> Result<(), String> {
    if query.text.trim().is_empty() {
        return Err("message must be non-empty".to_string());
    }

    let model = query.requested_model.trim();
    if model.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!("model name {:?} must not contain whitespace", model));
    }

    Ok(())
}
