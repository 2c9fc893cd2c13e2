use parking_lot::Mutex;
use serde::Serialize;

/// Point-in-time copy of the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub known_models: Vec<String>,
    pub active_model: String,
}

impl RegistrySnapshot {
    pub fn is_known(&self, name: &str) -> bool {
        self.known_models.iter().any(|m| m == name)
    }
}

#[derive(Debug)]
struct RegistryInner {
    // Insertion ordered, never shrinks
    known: Vec<String>,
    active: String,
}

impl RegistryInner {
    fn add_known(&mut self, name: &str) -> bool {
        if self.known.iter().any(|m| m == name) {
            return false;
        }
        self.known.push(name.to_string());
        true
    }
}

/// The models the gateway considers available plus the single active model.
///
/// Every read and write goes through one mutex. The lock is only held for the
/// in-memory operation itself, so callers must never await while using it.
#[derive(Debug)]
pub struct ModelRegistry {
    inner: Mutex<RegistryInner>,
}

impl ModelRegistry {
    /// Create a registry seeded with `seed`, `default_model` active.
    ///
    /// A blank default falls back to the first seed entry.
    pub fn new<I, S>(default_model: &str, seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = RegistryInner {
            known: Vec::new(),
            active: String::new(),
        };
        for name in seed {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                inner.add_known(name);
            }
        }

        let default_model = default_model.trim();
        inner.active = if default_model.is_empty() {
            inner
                .known
                .first()
                .cloned()
                .unwrap_or_else(|| crate::constants::DEFAULT_MODEL.to_string())
        } else {
            default_model.to_string()
        };

        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.lock();
        RegistrySnapshot {
            known_models: inner.known.clone(),
            active_model: inner.active.clone(),
        }
    }

    pub fn active_model(&self) -> String {
        self.inner.lock().active.clone()
    }

    /// Idempotent insert. Returns whether the name was new.
    pub fn add_known(&self, name: &str) -> bool {
        self.inner.lock().add_known(name)
    }

    /// Overwrite the active model without checking membership.
    ///
    /// Blank names are ignored so the active model is never empty.
    pub fn set_active(&self, name: &str) {
        if name.trim().is_empty() {
            tracing::warn!("ignoring attempt to activate a blank model name");
            return;
        }
        self.inner.lock().active = name.to_string();
    }

    /// Register and activate in one critical section.
    pub fn activate(&self, name: &str) {
        if name.trim().is_empty() {
            tracing::warn!("ignoring attempt to activate a blank model name");
            return;
        }
        let mut inner = self.inner.lock();
        inner.add_known(name);
        inner.active = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn seeded() -> ModelRegistry {
        ModelRegistry::new("gemma3", ["gemma3", "mistral"])
    }

    #[test]
    fn test_new_registry_snapshot() {
        let registry = seeded();
        assert_eq!(
            registry.snapshot(),
            RegistrySnapshot {
                known_models: vec!["gemma3".to_string(), "mistral".to_string()],
                active_model: "gemma3".to_string(),
            }
        );
    }

    #[test]
    fn test_seed_duplicates_and_blanks_are_dropped() {
        let registry = ModelRegistry::new("phi4", ["phi4", "", "phi4", "  "]);
        assert_eq!(registry.snapshot().known_models, vec!["phi4".to_string()]);
    }

    #[test]
    fn test_blank_default_falls_back_to_first_seed() {
        let registry = ModelRegistry::new("  ", ["qwen3", "phi4"]);
        assert_eq!(registry.active_model(), "qwen3");
    }

    #[test]
    fn test_add_known_is_idempotent() {
        let registry = seeded();
        assert!(registry.add_known("llama4"));
        assert!(!registry.add_known("llama4"));
        assert_eq!(registry.snapshot().known_models.len(), 3);
    }

    #[test]
    fn test_set_active_does_not_validate_membership() {
        let registry = seeded();
        registry.set_active("not-yet-installed");

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.active_model, "not-yet-installed");
        assert!(!snapshot.is_known("not-yet-installed"));
    }

    #[test]
    fn test_set_active_ignores_blank_name() {
        let registry = seeded();
        registry.set_active("");
        registry.set_active("   ");
        assert_eq!(registry.active_model(), "gemma3");
    }

    #[test]
    fn test_activate_registers_and_switches() {
        let registry = seeded();
        registry.activate("llama4");
        registry.activate("llama4");

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.active_model, "llama4");
        assert_eq!(
            snapshot.known_models,
            vec!["gemma3".to_string(), "mistral".to_string(), "llama4".to_string()]
        );
    }

    #[test]
    fn test_concurrent_activation_keeps_known_models_consistent() {
        let registry = Arc::new(seeded());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.activate("llama4");
                        registry.activate(&format!("model-{}", i % 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        let llama_entries = snapshot
            .known_models
            .iter()
            .filter(|m| m.as_str() == "llama4")
            .count();
        assert_eq!(llama_entries, 1);
        assert_eq!(snapshot.known_models.len(), 5);
        assert!(snapshot.is_known(&snapshot.active_model));
    }
}
