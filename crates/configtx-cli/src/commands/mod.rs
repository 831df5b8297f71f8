pub mod compute_update;
pub mod create_channel_tx;
pub mod genesis;
pub mod inspect;

use anyhow::Context;
use configtx_core::Config;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write `value` as pretty JSON to `output`, or to stdout when absent
pub(crate) fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Read a JSON-encoded configuration
pub(crate) fn read_config(path: &Path) -> anyhow::Result<Config> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("decoding config {}", path.display()))
}
