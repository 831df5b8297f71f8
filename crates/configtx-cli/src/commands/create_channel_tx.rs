//! Channel creation transaction command
//!
//! Usage: configtx create-channel-tx --profile <PATH> --channel-id <ID> [--output <PATH>]

use anyhow::Context;
use clap::Args;
use configtx_core::new_create_channel_tx;
use std::path::PathBuf;

use super::write_json;

#[derive(Debug, Args)]
pub struct CreateChannelTxArgs {
    /// Path to the profile YAML file
    #[arg(long)]
    pub profile: PathBuf,

    /// Channel to create
    #[arg(long)]
    pub channel_id: String,

    /// Where to write the JSON envelope (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute create-channel-tx command
pub fn execute(args: CreateChannelTxArgs) -> anyhow::Result<()> {
    let channel = configtx_profile::load_channel_file(&args.profile)
        .with_context(|| format!("loading profile {}", args.profile.display()))?;

    let envelope = new_create_channel_tx(&channel, &args.channel_id)?;

    write_json(&envelope, args.output.as_ref())
}
