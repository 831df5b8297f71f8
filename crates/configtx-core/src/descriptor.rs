//! Typed, in-memory description of a channel's intended configuration.
//!
//! This is the tree builder's input and the facade's read-back output.
//! Unpopulated sections are `None`; empty collections mean "not set".
//! Organization, consortium and capability lists read back from a tree are
//! in name order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::address::Address;
use crate::policy::PolicyType;

/// A channel configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channel {
    pub consortium: String,
    pub application: Option<Application>,
    pub orderer: Option<Orderer>,
    pub consortiums: Vec<Consortium>,
    pub capabilities: Vec<String>,
    pub policies: BTreeMap<String, Policy>,
}

/// An access rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub policy_type: PolicyType,
    pub rule: String,
}

impl Policy {
    pub fn implicit_meta(rule: impl Into<String>) -> Self {
        Self {
            policy_type: PolicyType::ImplicitMeta,
            rule: rule.into(),
        }
    }

    pub fn signature(rule: impl Into<String>) -> Self {
        Self {
            policy_type: PolicyType::Signature,
            rule: rule.into(),
        }
    }
}

/// Application (peer) section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Application {
    pub organizations: Vec<Organization>,
    pub capabilities: Vec<String>,
    pub policies: BTreeMap<String, Policy>,
    /// Resource name to policy reference
    pub acls: BTreeMap<String, String>,
}

/// Ordering section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Orderer {
    /// One of `solo`, `kafka`, `etcdraft`
    pub orderer_type: String,
    /// Channel-level orderer endpoints
    pub addresses: Vec<Address>,
    pub batch_timeout: Duration,
    pub batch_size: BatchSize,
    pub kafka: Kafka,
    pub etcd_raft: EtcdRaft,
    pub organizations: Vec<Organization>,
    pub max_channels: u64,
    pub capabilities: Vec<String>,
    pub policies: BTreeMap<String, Policy>,
    pub state: ConsensusState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSize {
    pub max_message_count: u32,
    pub absolute_max_bytes: u32,
    pub preferred_max_bytes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kafka {
    pub brokers: Vec<String>,
}

/// Raft consensus metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EtcdRaft {
    pub consenters: Vec<Consenter>,
    pub options: EtcdRaftOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consenter {
    pub address: Address,
    /// PEM
    pub client_tls_cert: String,
    /// PEM
    pub server_tls_cert: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EtcdRaftOptions {
    pub tick_interval: String,
    pub election_tick: u32,
    pub heartbeat_tick: u32,
    pub max_inflight_blocks: u32,
    pub snapshot_interval_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConsensusState {
    #[default]
    Normal,
    Maintenance,
}

/// A named set of organizations allowed to create channels together
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Consortium {
    pub name: String,
    pub organizations: Vec<Organization>,
}

/// An organization in any section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub policies: BTreeMap<String, Policy>,
    pub msp: Msp,
    /// Application organizations only
    pub anchor_peers: Vec<Address>,
    /// Orderer organizations only, as `host:port`
    pub orderer_endpoints: Vec<String>,
}

/// Membership service provider definition.
///
/// Certificates are opaque PEM text; nothing here inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Msp {
    /// MSP identifier
    pub name: String,
    pub root_certs: Vec<String>,
    pub intermediate_certs: Vec<String>,
    pub admins: Vec<String>,
    pub revocation_list: Vec<String>,
    pub organizational_unit_identifiers: Vec<OuIdentifier>,
    pub crypto_config: CryptoConfig,
    pub tls_root_certs: Vec<String>,
    pub tls_intermediate_certs: Vec<String>,
    pub node_ous: Option<NodeOus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OuIdentifier {
    pub certificate: String,
    pub organizational_unit_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoConfig {
    pub signature_hash_family: String,
    pub identity_identifier_hash_function: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            signature_hash_family: "SHA2".to_string(),
            identity_identifier_hash_function: "SHA256".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeOus {
    pub enable: bool,
    pub client_ou_identifier: Option<OuIdentifier>,
    pub peer_ou_identifier: Option<OuIdentifier>,
    pub admin_ou_identifier: Option<OuIdentifier>,
    pub orderer_ou_identifier: Option<OuIdentifier>,
}
