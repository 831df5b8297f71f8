//! configtx core - channel configuration trees, diffs and transactions
//!
//! This crate provides:
//! - The versioned configuration tree model (groups, values, policies)
//! - The tree builder that compiles a typed channel descriptor into a tree
//! - The diff engine computing minimal read/write-set config updates
//! - Envelope framing and genesis block construction
//! - The `ConfigTx` facade with typed accessors and setters
//!
//! Payload encoding, policy evaluation, signing and transport are left to
//! collaborators.

pub use configtx_core_types as core_types;

pub mod address;
pub mod builder;
pub mod codec;
pub mod descriptor;
pub mod diff;
pub mod duration;
pub mod errors;
pub mod facade;
pub mod genesis;
pub mod logging_facility;
pub mod model;
pub mod payload;
pub mod policy;
pub mod txn;

// Re-export commonly used types
pub use address::{parse_address, Address};
pub use descriptor::Channel;
pub use diff::compute_config_update;
pub use errors::{ConfigError, ExError, ExErrorKind, Result};
pub use facade::{ChannelView, ConfigTx};
pub use genesis::{
    new_application_channel_genesis_block, new_system_channel_genesis_block, Block,
};
pub use model::{Config, ConfigGroup, ConfigPolicy, ConfigUpdate, ConfigValue};
pub use policy::{implicit_meta_from_string, PolicyType};
pub use txn::{new_create_channel_tx, Envelope, Framer};
