#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{application_channel, pinned_framer, system_channel};
use configtx_core::builder::{new_application_channel_group, new_system_channel_group};
use configtx_core::codec;
use configtx_core::genesis::{
    block_data_hash, new_application_channel_genesis_block_with,
    new_system_channel_genesis_block_with, BlockMetadataIndex, LastConfig, Metadata,
    OrdererBlockMetadata, METADATA_SLOTS,
};
use configtx_core::model::ConfigEnvelope;
use configtx_core::txn::{compute_tx_id, FixedClock, FixedNonce, Framer, HeaderType};
use configtx_core::{new_system_channel_genesis_block, ExErrorKind};

#[test]
fn test_system_genesis_block_shape() {
    let block =
        new_system_channel_genesis_block_with(&pinned_framer(), &system_channel(), "system-channel")
            .unwrap();

    assert_eq!(block.header.number, 0);
    assert!(block.header.previous_hash.is_empty());
    assert_eq!(block.data.data.len(), 1);
    assert_eq!(block.metadata.metadata.len(), METADATA_SLOTS);
    assert_eq!(block.header.data_hash, block_data_hash(&block.data));
}

#[test]
fn test_genesis_envelope_carries_the_built_tree() {
    let channel = system_channel();
    let block =
        new_system_channel_genesis_block_with(&pinned_framer(), &channel, "system-channel")
            .unwrap();

    let envelope = block.envelope(0).unwrap();
    assert!(!envelope.is_signed());

    let payload = envelope.open().unwrap();
    let header = payload.channel_header().unwrap();
    assert_eq!(header.header_type, HeaderType::Config);
    assert_eq!(header.channel_id, "system-channel");
    assert_eq!(header.timestamp.seconds, 1_700_000_000);
    assert_eq!(header.epoch, 0);

    let signature_header = payload.signature_header().unwrap();
    assert!(signature_header.creator.is_empty());
    assert_eq!(
        header.tx_id,
        compute_tx_id(&signature_header.nonce, &signature_header.creator)
    );

    let config_envelope: ConfigEnvelope =
        codec::unmarshal("ConfigEnvelope", &payload.data).unwrap();
    assert_eq!(config_envelope.config.sequence, 0);
    assert!(config_envelope.last_update.is_none());
    assert_eq!(
        config_envelope.config.channel_group,
        new_system_channel_group(&channel).unwrap()
    );
}

#[test]
fn test_genesis_metadata_points_at_block_zero() {
    let block =
        new_system_channel_genesis_block_with(&pinned_framer(), &system_channel(), "system-channel")
            .unwrap();

    let last_config: Metadata =
        codec::unmarshal("Metadata", block.metadata_slot(BlockMetadataIndex::LastConfig).unwrap())
            .unwrap();
    let index: LastConfig = codec::unmarshal("LastConfig", &last_config.value).unwrap();
    assert_eq!(index.index, 0);

    let signatures: Metadata =
        codec::unmarshal("Metadata", block.metadata_slot(BlockMetadataIndex::Signatures).unwrap())
            .unwrap();
    assert!(signatures.signatures.is_empty());
    let orderer_metadata: OrdererBlockMetadata =
        codec::unmarshal("OrdererBlockMetadata", &signatures.value).unwrap();
    assert_eq!(orderer_metadata.last_config.index, 0);

    assert!(block
        .metadata_slot(BlockMetadataIndex::TransactionsFilter)
        .unwrap()
        .is_empty());
}

#[test]
fn test_pinned_sources_make_genesis_deterministic() {
    let channel = system_channel();
    let a = new_system_channel_genesis_block_with(&pinned_framer(), &channel, "system-channel")
        .unwrap();
    let b = new_system_channel_genesis_block_with(&pinned_framer(), &channel, "system-channel")
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_different_nonce_changes_data_hash() {
    let channel = system_channel();
    let other = Framer::with_sources(FixedClock(1_700_000_000), FixedNonce(vec![0x01]));

    let a = new_system_channel_genesis_block_with(&pinned_framer(), &channel, "system-channel")
        .unwrap();
    let b = new_system_channel_genesis_block_with(&other, &channel, "system-channel").unwrap();

    assert_ne!(a.header.data_hash, b.header.data_hash);
}

#[test]
fn test_system_randomness_yields_distinct_tx_ids() {
    let channel = system_channel();
    let a = new_system_channel_genesis_block(&channel, "system-channel").unwrap();
    let b = new_system_channel_genesis_block(&channel, "system-channel").unwrap();

    let tx_id = |block: &configtx_core::Block| {
        block
            .envelope(0)
            .unwrap()
            .open()
            .unwrap()
            .channel_header()
            .unwrap()
            .tx_id
    };
    assert_ne!(tx_id(&a), tx_id(&b));
}

#[test]
fn test_application_genesis_block_carries_application_root() {
    let channel = application_channel();
    let block =
        new_application_channel_genesis_block_with(&pinned_framer(), &channel, "mychannel")
            .unwrap();

    let payload = block.envelope(0).unwrap().open().unwrap();
    let config_envelope: ConfigEnvelope =
        codec::unmarshal("ConfigEnvelope", &payload.data).unwrap();
    let root = config_envelope.config.channel_group;

    assert_eq!(root, new_application_channel_group(&channel).unwrap());
    assert!(root.group("Application").is_some());
    assert!(root.group("Consortiums").is_none());
    assert!(root.value("Consortium").is_none());
}

#[test]
fn test_genesis_rejects_empty_channel_id() {
    let err = new_system_channel_genesis_block_with(&pinned_framer(), &system_channel(), "")
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidChannelId);
}

#[test]
fn test_genesis_propagates_builder_errors() {
    let mut channel = system_channel();
    channel.capabilities.clear();

    let err =
        new_system_channel_genesis_block_with(&pinned_framer(), &channel, "system-channel")
            .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingField);
}
