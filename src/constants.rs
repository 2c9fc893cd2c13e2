/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8888;
pub const DEFAULT_OLLAMA_HOST: &str = "localhost";
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;
pub const DEFAULT_OLLAMA_BINARY: &str = "ollama";

// Timeouts
pub const LIST_TIMEOUT_SECS: u64 = 10;
pub const GENERATE_TIMEOUT_SECS: u64 = 60;
pub const PULL_TIMEOUT_SECS: u64 = 1800; // 30 minutes, large models take a while

// Default Model Configuration
pub const DEFAULT_MODEL: &str = "gemma3";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Models the registry knows about before anything is pulled
pub const SEED_MODELS: &[&str] = &[
    "gemma3",
    "qwen3",
    "devstral",
    "deepseek-r1",
    "deepseek-coder-v2",
    "llama4",
    "qwen2.5vl",
    "llama3.3",
    "codellama",
    "starcoder2",
    "codegemma",
    "phi4",
    "mistral",
];

// Wire protocol
pub const PULL_ACTION_PREFIX: &str = "pull:";

// Prompt
pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"You are a helpful coding assistant. When providing code examples:
1. Always use proper markdown formatting with language-specific syntax highlighting
2. Use triple backticks with the language name for code blocks (e.g. "```python")
3. Format code in a clean, readable way with proper indentation
4. Use VSCode-style syntax highlighting conventions

User Query: {{ query }}
"#;
