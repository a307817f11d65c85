// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use carbontrack::CarbonConfig;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = CarbonConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        #[cfg(feature = "server")]
        Some(Commands::Serve {
            bind,
            db_path,
            factors,
        }) => commands::cmd_serve(&config, bind, db_path, factors),
        Some(Commands::Init { db_path }) => commands::cmd_init(&config, db_path),
        Some(Commands::Categories { factors }) => commands::cmd_categories(&config, factors),
        Some(Commands::Calculate {
            category,
            activity,
            amount,
            unit,
            db_path,
            factors,
        }) => commands::cmd_calculate(
            &config,
            &category,
            &activity,
            amount,
            unit.as_deref(),
            db_path,
            factors,
        ),
        Some(Commands::History { limit, db_path }) => {
            commands::cmd_history(&config, limit, db_path)
        }
        Some(Commands::Stats { db_path }) => commands::cmd_stats(&config, db_path),
        None => {
            println!("CarbonTrack - carbon emission calculator");
            println!("Run 'carbontrack --help' for usage information.");
            Ok(())
        }
    }
}
