use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::{
    app::{get_config_dir, init_config, AppState, Config},
    ollama::is_installed as is_ollama_installed,
    transport::run_http,
};

use super::Commands;

/// Handle CLI subcommands
pub async fn handle_command(
    command: Commands,
    mut config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let bind_addr = config.server.bind_addr();
            let state = AppState::from_config(config)?;
            run_http(state, &bind_addr).await
        }
        Commands::Models => {
            list_models(&config);
            Ok(())
        }
        Commands::Installed => list_installed(config).await,
        Commands::Pull { model } => pull_model(config, &model).await,
        Commands::Status => show_status(config, config_path).await,
        Commands::Init => {
            match init_config(config_path)? {
                Some(path) => println!("Created default configuration at: {}", path.display()),
                None => println!("Configuration already exists, leaving it untouched"),
            }
            Ok(())
        }
    }
}

/// List the configured registry seed
pub fn list_models(config: &Config) {
    println!("Available models:");
    for model in &config.models.seed {
        if *model == config.models.default {
            println!("  • {} {}", model.green(), "(default)".dimmed());
        } else {
            println!("  • {}", model.green());
        }
    }
    if !config.models.seed.contains(&config.models.default) {
        println!("  • {} {}", config.models.default.green(), "(default)".dimmed());
    }
}

async fn list_installed(config: Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let models = state
        .gateway
        .installed_models()
        .await
        .context("Failed to get models")?;

    if models.is_empty() {
        println!("No models installed");
        return Ok(());
    }

    println!("Installed models:");
    for model in models {
        println!(
            "  • {} {} {}",
            model.name.green(),
            model.size_label,
            model.installed_at.dimmed()
        );
    }
    Ok(())
}

async fn pull_model(config: Config, model: &str) -> Result<()> {
    let state = AppState::from_config(config)?;
    println!("[DOWNLOADING] Pulling {} model...", model);
    let log = state.gateway.pull_model(model).await?;
    print!("{}", log);
    println!("{} {} installed", "[OK]".green(), model);
    Ok(())
}

/// Show status of all dependencies
async fn show_status(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    println!("Gateway Status:");
    println!();

    let binary = config.ollama.binary.clone();
    if is_ollama_installed(&binary) {
        println!("  {} Ollama binary: {}", "[OK]".green(), binary);
    } else {
        println!("  {} Ollama binary: {} not found on PATH", "[ERROR]".red(), binary);
    }

    println!("  • Ollama API: {}", config.ollama.base_url());
    println!("  • Listening on: {}", config.server.bind_addr());

    let state = AppState::from_config(config)?;
    match state.gateway.installed_models().await {
        Ok(models) if models.is_empty() => {
            println!("  {} Backend: reachable (no models)", "[WARNING]".yellow());
        }
        Ok(models) => {
            println!("  {} Backend: {} models installed", "[OK]".green(), models.len());
            for model in models.iter().take(3) {
                println!("      • {}", model.name);
            }
            if models.len() > 3 {
                println!("      ... and {} more", models.len() - 3);
            }
        }
        Err(e) => println!("  {} Backend: {}", "[ERROR]".red(), e),
    }

    let config_file = match config_path {
        Some(path) => Some(path),
        None => get_config_dir().ok().map(|dir| dir.join("config.toml")),
    };
    match config_file {
        Some(path) if path.exists() => {
            println!("  {} Configuration: {}", "[OK]".green(), path.display())
        }
        _ => println!(
            "  {} Configuration: Not found (using defaults)",
            "[WARNING]".yellow()
        ),
    }

    println!();
    Ok(())
}
