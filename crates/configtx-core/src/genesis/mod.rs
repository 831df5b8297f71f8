//! Genesis Constructor.
//!
//! The first block of a channel holds one unsigned CONFIG transaction
//! carrying the whole tree. Its data hash is taken over the exact marshaled
//! envelope bytes stored in the block.

mod block;

pub use block::{
    block_data_hash, Block, BlockData, BlockHeader, BlockMetadata, BlockMetadataIndex, LastConfig,
    Metadata, MetadataSignature, OrdererBlockMetadata, METADATA_SLOTS,
};

use std::time::Instant;

use crate::builder::{new_application_channel_group, new_system_channel_group};
use crate::codec;
use crate::descriptor::Channel;
use crate::errors::{ConfigError, Result};
use crate::model::{Config, ConfigEnvelope, ConfigGroup};
use crate::txn::{Framer, HeaderType};
use crate::{log_op_end, log_op_error, log_op_start};

/// Genesis block for a network (system) channel
///
/// # Errors
///
/// `InvalidChannelId` for an empty channel id; otherwise any builder or
/// serialization error.
pub fn new_system_channel_genesis_block(channel: &Channel, channel_id: &str) -> Result<Block> {
    new_system_channel_genesis_block_with(&Framer::system(), channel, channel_id)
}

/// [`new_system_channel_genesis_block`] with an explicit framer
///
/// # Errors
///
/// Same as [`new_system_channel_genesis_block`].
pub fn new_system_channel_genesis_block_with(
    framer: &Framer,
    channel: &Channel,
    channel_id: &str,
) -> Result<Block> {
    instrumented("new_system_channel_genesis_block", channel_id, || {
        let root = new_system_channel_group(channel)?;
        genesis_block(framer, root, channel_id)
    })
}

/// Genesis block for an application channel created without a system
/// channel
///
/// # Errors
///
/// `InvalidChannelId` for an empty channel id; otherwise any builder or
/// serialization error.
pub fn new_application_channel_genesis_block(
    channel: &Channel,
    channel_id: &str,
) -> Result<Block> {
    new_application_channel_genesis_block_with(&Framer::system(), channel, channel_id)
}

/// [`new_application_channel_genesis_block`] with an explicit framer
///
/// # Errors
///
/// Same as [`new_application_channel_genesis_block`].
pub fn new_application_channel_genesis_block_with(
    framer: &Framer,
    channel: &Channel,
    channel_id: &str,
) -> Result<Block> {
    instrumented("new_application_channel_genesis_block", channel_id, || {
        let root = new_application_channel_group(channel)?;
        genesis_block(framer, root, channel_id)
    })
}

fn instrumented(
    op: &'static str,
    channel_id: &str,
    build: impl FnOnce() -> Result<Block>,
) -> Result<Block> {
    log_op_start!(op, channel_id = channel_id);
    let start = Instant::now();

    let result = if channel_id.is_empty() {
        Err(ConfigError::EmptyChannelId.into())
    } else {
        build()
    };

    match result {
        Ok(block) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                channel_id = channel_id
            );
            Ok(block)
        }
        Err(e) => {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                channel_id = channel_id
            );
            Err(e)
        }
    }
}

/// Frame `root` as block 0 of `channel_id`
fn genesis_block(framer: &Framer, root: ConfigGroup, channel_id: &str) -> Result<Block> {
    let config_envelope = ConfigEnvelope {
        config: Config::new(root),
        last_update: None,
    };
    let envelope = framer.frame(
        HeaderType::Config,
        channel_id,
        &[],
        "ConfigEnvelope",
        &config_envelope,
    )?;

    let mut block = Block::new(0, Vec::new());
    block.data.data = vec![codec::marshal("Envelope", &envelope)?];
    block.header.data_hash = block_data_hash(&block.data);

    let last_config = Metadata {
        value: codec::marshal("LastConfig", &LastConfig { index: 0 })?,
        signatures: Vec::new(),
    };
    block.metadata.metadata[BlockMetadataIndex::LastConfig as usize] =
        codec::marshal("Metadata", &last_config)?;

    let signatures = Metadata {
        value: codec::marshal(
            "OrdererBlockMetadata",
            &OrdererBlockMetadata {
                last_config: LastConfig { index: 0 },
                consenter_metadata: Vec::new(),
            },
        )?,
        signatures: Vec::new(),
    };
    block.metadata.metadata[BlockMetadataIndex::Signatures as usize] =
        codec::marshal("Metadata", &signatures)?;

    Ok(block)
}
