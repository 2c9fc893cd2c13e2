use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::Timeouts;
use crate::constants::{
    DEFAULT_MODEL, DEFAULT_OLLAMA_BINARY, DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_PORT,
    DEFAULT_PROMPT_TEMPLATE, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TEMPERATURE,
    GENERATE_TIMEOUT_SECS, LIST_TIMEOUT_SECS, PULL_TIMEOUT_SECS, SEED_MODELS,
};

/// Environment variable prefix; nested keys are split on `__`
pub const ENV_PREFIX: &str = "OLLAMA_GATEWAY_";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Registry seed
    #[serde(default)]
    pub models: ModelsConfig,

    /// Backend call deadlines
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Prompt template
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ollama configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    pub host: String,
    /// Ollama server port
    pub port: u16,
    /// CLI used for `list` and `pull`
    pub binary: String,
    /// Temperature for generation
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            port: DEFAULT_OLLAMA_PORT,
            binary: DEFAULT_OLLAMA_BINARY.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl OllamaConfig {
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            format!("{}:{}", self.host.trim_end_matches('/'), self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model active at startup
    pub default: String,
    /// Models known at startup
    pub seed: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_MODEL.to_string(),
            seed: SEED_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub list_secs: u64,
    pub generate_secs: u64,
    pub pull_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            list_secs: LIST_TIMEOUT_SECS,
            generate_secs: GENERATE_TIMEOUT_SECS,
            pull_secs: PULL_TIMEOUT_SECS,
        }
    }
}

impl From<&TimeoutConfig> for Timeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Timeouts {
            list: Duration::from_secs(config.list_secs),
            generate: Duration::from_secs(config.generate_secs),
            pull: Duration::from_secs(config.pull_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// minijinja source, `query` is the only variable
    pub template: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

/// Layer defaults, config files and environment, lowest priority first
pub fn build_figment(global: Option<&Path>, local: &Path, explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(global) = global.filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(global));
    }

    if local.exists() {
        figment = figment.merge(Toml::file(local));
    }

    if let Some(explicit) = explicit {
        figment = figment.merge(Toml::file(explicit));
    }

    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load configuration from multiple sources
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file {} does not exist", path.display());
        }
    }

    let global_config = get_config_dir().ok().map(|dir| dir.join("config.toml"));
    let local_config = PathBuf::from(".ollama-gateway/config.toml");

    build_figment(global_config.as_deref(), &local_config, explicit)
        .extract()
        .context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ollama-gateway") {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join("ollama-gateway"))
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(path)
}

/// Create a default configuration file if it doesn't exist.
///
/// Returns the path when a file was written.
pub fn init_config(path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let path = match path {
        Some(p) => p,
        None => get_config_dir()?.join("config.toml"),
    };

    if path.exists() {
        return Ok(None);
    }

    save_config(&Config::default(), Some(path)).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8888");
        assert_eq!(config.ollama.base_url(), "http://localhost:11434");
        assert_eq!(config.models.default, "gemma3");
        assert!(config.models.seed.contains(&"llama4".to_string()));
        assert_eq!(Timeouts::from(&config.timeouts).generate, Duration::from_secs(60));
    }

    #[test]
    fn test_base_url_keeps_scheme() {
        let ollama = OllamaConfig {
            host: "https://ollama.internal/".to_string(),
            ..OllamaConfig::default()
        };
        assert_eq!(ollama.base_url(), "https://ollama.internal:11434");
    }

    #[test]
    fn test_layering_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "global.toml",
                r#"
                [server]
                port = 9000

                [models]
                default = "phi4"
                seed = ["phi4"]
                "#,
            )?;
            jail.create_file(
                "local.toml",
                r#"
                [server]
                port = 9100
                "#,
            )?;
            jail.set_env("OLLAMA_GATEWAY_TIMEOUTS__GENERATE_SECS", "5");

            let config: Config = build_figment(
                Some(Path::new("global.toml")),
                Path::new("local.toml"),
                None,
            )
            .extract()?;

            assert_eq!(config.server.port, 9100);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.models.default, "phi4");
            assert_eq!(config.models.seed, vec!["phi4".to_string()]);
            assert_eq!(config.timeouts.generate_secs, 5);
            assert_eq!(config.timeouts.list_secs, LIST_TIMEOUT_SECS);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_local() {
        Jail::expect_with(|jail| {
            jail.create_file("local.toml", "[ollama]\nbinary = \"local-ollama\"\n")?;
            jail.create_file("explicit.toml", "[ollama]\nbinary = \"/opt/ollama\"\n")?;

            let config: Config = build_figment(
                None,
                Path::new("local.toml"),
                Some(Path::new("explicit.toml")),
            )
            .extract()?;

            assert_eq!(config.ollama.binary, "/opt/ollama");
            Ok(())
        });
    }

    #[test]
    fn test_save_then_init_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = init_config(Some(path.clone())).unwrap();
        assert_eq!(written, Some(path.clone()));
        assert!(init_config(Some(path.clone())).unwrap().is_none());

        let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
