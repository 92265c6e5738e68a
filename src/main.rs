// src/main.rs — ChicLens entry point

use clap::Parser;

use chiclens::cli::{Cli, Commands};
use chiclens::core::session::SessionState;
use chiclens::infra::config::Config;
use chiclens::infra::logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Respects RUST_LOG
    logger::init_logging(if cli.verbose { "debug" } else { "warn" });

    match run(cli).await {
        Ok(SessionState::Error) => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<SessionState> {
    // Load config (falls back to defaults if no config.toml)
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(Commands::Brands) = cli.command {
        chiclens::cli::run::run_brands(&config);
        return Ok(SessionState::Idle);
    }

    let Some(image_path) = cli.image.clone() else {
        anyhow::bail!("Usage: chiclens <IMAGE>. Run chiclens --help for all options.");
    };

    chiclens::cli::run::run_analyze(&cli, &config, &image_path).await
}
