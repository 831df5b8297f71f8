//! Inspect command
//!
//! Usage: configtx inspect --config <PATH>

use clap::Args;
use configtx_core::ChannelView;
use std::path::PathBuf;

use super::{read_config, write_json};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// JSON config to project
    #[arg(long)]
    pub config: PathBuf,
}

/// Execute inspect command
pub fn execute(args: InspectArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let channel = ChannelView::new(&config.channel_group).channel_configuration()?;
    write_json(&channel, None)
}
