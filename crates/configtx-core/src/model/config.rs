use serde::{Deserialize, Serialize};

use crate::codec;
use crate::model::group::ConfigGroup;
use crate::txn::Envelope;

/// A complete channel configuration: the root group plus its sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sequence: u64,
    pub channel_group: ConfigGroup,
}

impl Config {
    pub fn new(channel_group: ConfigGroup) -> Self {
        Self {
            sequence: 0,
            channel_group,
        }
    }
}

/// The minimal delta between two configurations.
///
/// `read_set` pins the versions the update is conditioned on; `write_set`
/// carries every added or changed element at its new version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub channel_id: String,
    pub read_set: ConfigGroup,
    pub write_set: ConfigGroup,
}

impl ConfigUpdate {
    /// True when the write set authorizes nothing
    pub fn is_empty(&self) -> bool {
        self.write_set.is_empty() && self.write_set.version == self.read_set.version
    }
}

/// Data section of a CONFIG transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEnvelope {
    pub config: Config,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<Envelope>,
}

/// Data section of a CONFIG_UPDATE transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigUpdateEnvelope {
    /// Marshaled `ConfigUpdate`
    #[serde(with = "codec::base64_bytes")]
    pub config_update: Vec<u8>,
    #[serde(default)]
    pub signatures: Vec<ConfigSignature>,
}

/// One collected signature over a config update; produced externally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigSignature {
    #[serde(with = "codec::base64_bytes")]
    pub signature_header: Vec<u8>,
    #[serde(with = "codec::base64_bytes")]
    pub signature: Vec<u8>,
}
