//! Config update command
//!
//! Usage: configtx compute-update --original <PATH> --updated <PATH> --channel-id <ID> [--output <PATH>]

use clap::Args;
use configtx_core::compute_config_update;
use std::path::PathBuf;

use super::{read_config, write_json};

#[derive(Debug, Args)]
pub struct ComputeUpdateArgs {
    /// JSON config currently in force
    #[arg(long)]
    pub original: PathBuf,

    /// JSON config to move to
    #[arg(long)]
    pub updated: PathBuf,

    /// Channel the update targets
    #[arg(long)]
    pub channel_id: String,

    /// Where to write the JSON config update (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute compute-update command
pub fn execute(args: ComputeUpdateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(!args.channel_id.is_empty(), "channel id must not be empty");

    let original = read_config(&args.original)?;
    let updated = read_config(&args.updated)?;

    let mut update = compute_config_update(&original, &updated)?;
    update.channel_id = args.channel_id;

    if update.is_empty() {
        eprintln!("No differences between the two configurations");
    }

    write_json(&update, args.output.as_ref())
}
