//! Genesis block command
//!
//! Usage: configtx genesis --profile <PATH> --channel-id <ID> [--application] [--output <PATH>]

use anyhow::Context;
use clap::Args;
use configtx_core::{new_application_channel_genesis_block, new_system_channel_genesis_block};
use std::path::PathBuf;

use super::write_json;

#[derive(Debug, Args)]
pub struct GenesisArgs {
    /// Path to the profile YAML file
    #[arg(long)]
    pub profile: PathBuf,

    /// Channel the block belongs to
    #[arg(long)]
    pub channel_id: String,

    /// Build an application channel root instead of a network root
    #[arg(long)]
    pub application: bool,

    /// Where to write the JSON block (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute genesis command
pub fn execute(args: GenesisArgs) -> anyhow::Result<()> {
    let channel = configtx_profile::load_channel_file(&args.profile)
        .with_context(|| format!("loading profile {}", args.profile.display()))?;

    let block = if args.application {
        new_application_channel_genesis_block(&channel, &args.channel_id)?
    } else {
        new_system_channel_genesis_block(&channel, &args.channel_id)?
    };

    write_json(&block, args.output.as_ref())
}
