mod rank;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::rank::RankArgs;
use crate::simulate::SimulateArgs;

#[derive(Debug, Parser)]
#[command(name = "redaccel")]
#[command(about = "Rank Reddit threads and simulate product feedback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank discussion threads for a keyword
    Rank(RankArgs),
    /// Simulate persona feedback for a product and project revenue
    Simulate(SimulateArgs),
    /// List the persona catalog
    Personas {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = redaccel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Rank(args) => rank::run_rank(&config, &args).await,
        Commands::Simulate(args) => simulate::run_simulate(&config, &args).await,
        Commands::Personas { json } => simulate::run_personas(json),
    }
}

#[cfg(test)]
mod tests;
