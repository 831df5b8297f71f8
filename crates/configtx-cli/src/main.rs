//! configtx CLI
//!
//! Command-line interface for channel configuration transactions

use clap::{Parser, Subcommand};
use configtx_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "configtx")]
#[command(about = "configtx - Channel configuration blocks and updates", long_about = None)]
struct Cli {
    /// Emit operation logs to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a genesis block from a profile
    Genesis(commands::genesis::GenesisArgs),
    /// Build an unsigned channel creation transaction from a profile
    CreateChannelTx(commands::create_channel_tx::CreateChannelTxArgs),
    /// Diff two configurations into a config update
    ComputeUpdate(commands::compute_update::ComputeUpdateArgs),
    /// Print the descriptor projection of a configuration
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Genesis(args) => commands::genesis::execute(args),
        Commands::CreateChannelTx(args) => commands::create_channel_tx::execute(args),
        Commands::ComputeUpdate(args) => commands::compute_update::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
