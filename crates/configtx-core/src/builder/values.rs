//! One small function per typed leaf: descriptor field in, `{key, payload}`
//! out. Nothing here touches a tree.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::address::{parse_address, Address};
use crate::codec;
use crate::core_types::keys;
use crate::descriptor::{BatchSize, Msp, Orderer, Policy};
use crate::duration::format_duration;
use crate::errors::{ConfigError, Result};
use crate::payload::{
    Acls, AnchorPeers, ApiResource, BatchTimeout, BlockDataHashingStructure, Capabilities,
    ChannelRestrictions, ConsensusType, ConsortiumName, HashingAlgorithm, KafkaBrokers, MspConfig,
    OrdererAddresses, FABRIC_MSP_TYPE,
};

/// A marshaled leaf ready for insertion under `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardValue {
    pub key: &'static str,
    pub value: Vec<u8>,
}

impl StandardValue {
    fn new<T: Serialize>(key: &'static str, payload: &T) -> Result<Self> {
        Ok(Self {
            key,
            value: codec::marshal(key, payload)?,
        })
    }
}

pub fn consortium_value(name: &str) -> Result<StandardValue> {
    StandardValue::new(
        keys::CONSORTIUM_KEY,
        &ConsortiumName {
            name: name.to_string(),
        },
    )
}

pub fn hashing_algorithm_value() -> Result<StandardValue> {
    StandardValue::new(
        keys::HASHING_ALGORITHM_KEY,
        &HashingAlgorithm {
            name: keys::DEFAULT_HASHING_ALGORITHM.to_string(),
        },
    )
}

pub fn block_data_hashing_structure_value() -> Result<StandardValue> {
    StandardValue::new(
        keys::BLOCK_DATA_HASHING_STRUCTURE_KEY,
        &BlockDataHashingStructure {
            width: keys::DEFAULT_BLOCK_DATA_HASHING_WIDTH,
        },
    )
}

/// Channel-level orderer endpoints, rendered `host:port`
pub fn orderer_addresses_value(addresses: &[Address]) -> Result<StandardValue> {
    StandardValue::new(
        keys::ORDERER_ADDRESSES_KEY,
        &OrdererAddresses {
            addresses: addresses.iter().map(Address::to_string).collect(),
        },
    )
}

/// Per-organization orderer endpoints; each must parse as `host:port`
pub fn endpoints_value(endpoints: &[String]) -> Result<StandardValue> {
    for endpoint in endpoints {
        parse_address(endpoint)?;
    }
    StandardValue::new(
        keys::ENDPOINTS_KEY,
        &OrdererAddresses {
            addresses: endpoints.to_vec(),
        },
    )
}

pub fn capabilities_value(capabilities: &[String]) -> Result<StandardValue> {
    StandardValue::new(keys::CAPABILITIES_KEY, &Capabilities::from_names(capabilities))
}

pub fn msp_value(msp: &Msp) -> Result<StandardValue> {
    StandardValue::new(
        keys::MSP_KEY,
        &MspConfig {
            msp_type: FABRIC_MSP_TYPE,
            config: msp.clone(),
        },
    )
}

pub fn anchor_peers_value(anchor_peers: &[Address]) -> Result<StandardValue> {
    StandardValue::new(
        keys::ANCHOR_PEERS_KEY,
        &AnchorPeers {
            anchor_peers: anchor_peers.to_vec(),
        },
    )
}

pub fn acls_value(acls: &BTreeMap<String, String>) -> Result<StandardValue> {
    StandardValue::new(
        keys::ACLS_KEY,
        &Acls {
            acls: acls
                .iter()
                .map(|(resource, policy_ref)| {
                    (
                        resource.clone(),
                        ApiResource {
                            policy_ref: policy_ref.clone(),
                        },
                    )
                })
                .collect(),
        },
    )
}

/// Consensus type and its metadata; only `etcdraft` carries metadata
///
/// # Errors
///
/// `UnknownOrdererType` for anything but solo, kafka or etcdraft.
pub fn consensus_type_value(orderer: &Orderer) -> Result<StandardValue> {
    let metadata = match orderer.orderer_type.as_str() {
        keys::CONSENSUS_TYPE_SOLO | keys::CONSENSUS_TYPE_KAFKA => Vec::new(),
        keys::CONSENSUS_TYPE_ETCDRAFT => codec::marshal("EtcdRaft", &orderer.etcd_raft)?,
        other => {
            return Err(ConfigError::UnknownOrdererType {
                orderer_type: other.to_string(),
            }
            .into())
        }
    };
    StandardValue::new(
        keys::CONSENSUS_TYPE_KEY,
        &ConsensusType {
            consensus_type: orderer.orderer_type.clone(),
            metadata,
            state: orderer.state,
        },
    )
}

pub fn batch_size_value(batch_size: &BatchSize) -> Result<StandardValue> {
    StandardValue::new(keys::BATCH_SIZE_KEY, batch_size)
}

pub fn batch_timeout_value(timeout: Duration) -> Result<StandardValue> {
    StandardValue::new(
        keys::BATCH_TIMEOUT_KEY,
        &BatchTimeout {
            timeout: format_duration(timeout),
        },
    )
}

pub fn channel_restrictions_value(max_count: u64) -> Result<StandardValue> {
    StandardValue::new(
        keys::CHANNEL_RESTRICTIONS_KEY,
        &ChannelRestrictions { max_count },
    )
}

pub fn kafka_brokers_value(brokers: &[String]) -> Result<StandardValue> {
    StandardValue::new(
        keys::KAFKA_BROKERS_KEY,
        &KafkaBrokers {
            brokers: brokers.to_vec(),
        },
    )
}

/// Who may create channels within a consortium
pub fn channel_creation_policy_value(policy: &Policy) -> Result<StandardValue> {
    StandardValue::new(keys::CHANNEL_CREATION_POLICY_KEY, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_orderer_addresses_render_host_port() {
        let value =
            orderer_addresses_value(&[Address::new("orderer.example.com", 7050)]).unwrap();
        let decoded: OrdererAddresses = codec::unmarshal(value.key, &value.value).unwrap();
        assert_eq!(decoded.addresses, vec!["orderer.example.com:7050".to_string()]);
    }

    #[test]
    fn test_endpoints_reject_malformed_address() {
        let err = endpoints_value(&["orderer.example.com".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidAddress);
    }

    #[test]
    fn test_consensus_type_rejects_unknown_orderer() {
        let orderer = Orderer {
            orderer_type: "pbft".to_string(),
            ..Orderer::default()
        };
        let err = consensus_type_value(&orderer).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_batch_timeout_is_duration_text() {
        let value = batch_timeout_value(Duration::from_secs(2)).unwrap();
        let decoded: BatchTimeout = codec::unmarshal(value.key, &value.value).unwrap();
        assert_eq!(decoded.timeout, "2s");
    }
}
