use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ollama-gateway")]
#[command(version)]
#[command(about = "Chat gateway in front of a local Ollama backend", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "OLLAMA_GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP/WebSocket server (default)
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the models the gateway starts with
    Models,
    /// List models installed on the backend
    Installed,
    /// Pull a model onto the backend
    Pull {
        /// Model name, e.g. llama4
        model: String,
    },
    /// Check status of dependencies
    Status,
    /// Write a default configuration file
    Init,
}
