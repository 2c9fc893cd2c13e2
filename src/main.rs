use anyhow::Result;
use clap::Parser;

use ollama_gateway::{
    app::{load_config, Config},
    cli::{handle_command, Cli, Commands},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // No subcommand means serve with the configured address
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    // init may target a config file that does not exist yet
    let config = if command == Commands::Init {
        Config::default()
    } else {
        load_config(cli.config.as_deref())?
    };

    handle_command(command, config, cli.config).await
}
