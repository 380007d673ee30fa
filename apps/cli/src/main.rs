mod cli;
mod commands;
mod config;
mod main_lib;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use main_lib::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.ledger, cli.targets, cli.history);
    init_tracing(config.log_format)?;
    tracing::debug!("Ledger path in use: {}", config.ledger_path.display());

    match &cli.command {
        Commands::Allocation(args) => commands::allocation(&config, args),
        Commands::Deviation => commands::deviation_report(&config),
        Commands::Project(args) => commands::project(&config, args),
        Commands::Export(args) => commands::export(&config, args),
        Commands::Import(args) => commands::import(&config, args),
        Commands::Snapshot(args) => commands::snapshot(&config, args),
        Commands::Trend(args) => commands::trend(&config, args),
    }
}
