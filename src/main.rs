//! fieldcheck CLI - Drive and inspect guided shelf-inspection sessions

use clap::Parser;
use fieldcheck::cli::{Cli, Commands};
use fieldcheck::errors::to_exit_code;
use fieldcheck::fs::resolve_cwd;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = fieldcheck::config::load_config(&resolve_cwd(cli.cwd.as_deref()));

    // Initialize tracing
    let default_level = match (&config, cli.log_level_override()) {
        (_, Some(level)) => level.to_string(),
        (Ok(config), None) => config.log_level.clone(),
        (Err(_), None) => "info".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli, config: fieldcheck::Config) -> fieldcheck::Result<()> {
    match cli.command {
        Some(Commands::Steps { json }) => fieldcheck::cli::commands::steps::run(json).await,
        Some(Commands::Merge { previous, incoming }) => {
            fieldcheck::cli::commands::merge::run(cli.cwd.as_deref(), &previous, &incoming).await
        }
        Some(Commands::Replay {
            script,
            output,
            wait_reset,
            json,
        }) => {
            fieldcheck::cli::commands::replay::run(
                cli.cwd.as_deref(),
                &config,
                &script,
                output.as_deref(),
                wait_reset,
                json,
            )
            .await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
