//! Typed payloads stored under well-known value keys.
//!
//! | key | payload |
//! |---|---|
//! | `Consortium` | [`ConsortiumName`] |
//! | `HashingAlgorithm` | [`HashingAlgorithm`] |
//! | `BlockDataHashingStructure` | [`BlockDataHashingStructure`] |
//! | `OrdererAddresses`, `Endpoints` | [`OrdererAddresses`] |
//! | `Capabilities` | [`Capabilities`] |
//! | `MSP` | [`MspConfig`] |
//! | `AnchorPeers` | [`AnchorPeers`] |
//! | `ACLs` | [`Acls`] |
//! | `ConsensusType` | [`ConsensusType`] |
//! | `BatchSize` | [`BatchSize`] |
//! | `BatchTimeout` | [`BatchTimeout`] |
//! | `ChannelRestrictions` | [`ChannelRestrictions`] |
//! | `KafkaBrokers` | [`KafkaBrokers`] |
//! | `ChannelCreationPolicy` | [`Policy`] |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::address::Address;
use crate::codec;
use crate::descriptor::{ConsensusState, Msp};

pub use crate::descriptor::{BatchSize, Policy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsortiumName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingAlgorithm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDataHashingStructure {
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrdererAddresses {
    pub addresses: Vec<String>,
}

/// Marker for an enabled capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capability {}

/// Enabled capabilities as a set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub capabilities: BTreeMap<String, Capability>,
}

impl Capabilities {
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        Self {
            capabilities: names
                .into_iter()
                .map(|name| (name.clone(), Capability {}))
                .collect(),
        }
    }

    /// Enabled capability names in order
    pub fn names(&self) -> Vec<String> {
        self.capabilities.keys().cloned().collect()
    }
}

/// MSP type tag for the standard X.509 provider
pub const FABRIC_MSP_TYPE: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MspConfig {
    pub msp_type: u32,
    pub config: Msp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnchorPeers {
    pub anchor_peers: Vec<Address>,
}

/// Reference from an API resource to the policy guarding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    pub policy_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Acls {
    pub acls: BTreeMap<String, ApiResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusType {
    #[serde(rename = "type")]
    pub consensus_type: String,
    /// Consensus-specific metadata; marshaled `EtcdRaft` for `etcdraft`
    #[serde(with = "codec::base64_bytes", default)]
    pub metadata: Vec<u8>,
    #[serde(default)]
    pub state: ConsensusState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTimeout {
    /// Duration text, e.g. `2s`
    pub timeout: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KafkaBrokers {
    pub brokers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelRestrictions {
    pub max_count: u64,
}
