//! Profile Format v0 schema
//!
//! Defines the YAML structure for channel profiles. Addresses are written
//! as `host:port` strings and durations as Go-style text (`2s`, `500ms`).

use configtx_core::descriptor::{ConsensusState, CryptoConfig, NodeOus, OuIdentifier};
use configtx_core::PolicyType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level profile file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// The channel being described
    pub channel: ProfileChannel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileChannel {
    /// Consortium name, for standard channels
    pub consortium: String,
    pub application: Option<ProfileApplication>,
    pub orderer: Option<ProfileOrderer>,
    pub consortiums: Vec<ProfileConsortium>,
    pub capabilities: Vec<String>,
    pub policies: BTreeMap<String, ProfilePolicy>,
}

/// Policy definition in profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePolicy {
    /// `Signature` or `ImplicitMeta`
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub rule: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileApplication {
    pub organizations: Vec<ProfileOrganization>,
    pub capabilities: Vec<String>,
    pub policies: BTreeMap<String, ProfilePolicy>,
    /// Resource name to policy reference
    pub acls: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOrderer {
    /// One of `solo`, `kafka`, `etcdraft`
    #[serde(rename = "type")]
    pub orderer_type: String,
    /// `host:port` endpoints
    pub addresses: Vec<String>,
    /// Duration text
    pub batch_timeout: String,
    pub batch_size: ProfileBatchSize,
    pub kafka: ProfileKafka,
    pub etcd_raft: ProfileEtcdRaft,
    pub organizations: Vec<ProfileOrganization>,
    pub max_channels: u64,
    pub capabilities: Vec<String>,
    pub policies: BTreeMap<String, ProfilePolicy>,
    pub state: ConsensusState,
}

impl Default for ProfileOrderer {
    fn default() -> Self {
        Self {
            orderer_type: "solo".to_string(),
            addresses: Vec::new(),
            batch_timeout: "2s".to_string(),
            batch_size: ProfileBatchSize::default(),
            kafka: ProfileKafka::default(),
            etcd_raft: ProfileEtcdRaft::default(),
            organizations: Vec::new(),
            max_channels: 0,
            capabilities: Vec::new(),
            policies: BTreeMap::new(),
            state: ConsensusState::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileBatchSize {
    pub max_message_count: u32,
    pub absolute_max_bytes: u32,
    pub preferred_max_bytes: u32,
}

impl Default for ProfileBatchSize {
    fn default() -> Self {
        Self {
            max_message_count: 500,
            absolute_max_bytes: 10 * 1024 * 1024,
            preferred_max_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileKafka {
    pub brokers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEtcdRaft {
    pub consenters: Vec<ProfileConsenter>,
    pub options: ProfileEtcdRaftOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConsenter {
    /// `host:port`
    pub address: String,
    #[serde(default)]
    pub client_tls_cert: String,
    #[serde(default)]
    pub server_tls_cert: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEtcdRaftOptions {
    /// Duration text
    pub tick_interval: String,
    pub election_tick: u32,
    pub heartbeat_tick: u32,
    pub max_inflight_blocks: u32,
    pub snapshot_interval_size: u32,
}

impl Default for ProfileEtcdRaftOptions {
    fn default() -> Self {
        Self {
            tick_interval: "500ms".to_string(),
            election_tick: 10,
            heartbeat_tick: 1,
            max_inflight_blocks: 5,
            snapshot_interval_size: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConsortium {
    pub name: String,
    #[serde(default)]
    pub organizations: Vec<ProfileOrganization>,
}

/// Organization definition in profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOrganization {
    pub name: String,
    pub msp: ProfileMsp,
    #[serde(default)]
    pub policies: BTreeMap<String, ProfilePolicy>,
    /// `host:port`, application organizations only
    #[serde(default)]
    pub anchor_peers: Vec<String>,
    /// `host:port`, orderer organizations only
    #[serde(default)]
    pub orderer_endpoints: Vec<String>,
}

/// MSP definition in profile; certificates are PEM text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMsp {
    /// MSP identifier
    pub id: String,
    #[serde(default)]
    pub root_certs: Vec<String>,
    #[serde(default)]
    pub intermediate_certs: Vec<String>,
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default)]
    pub revocation_list: Vec<String>,
    #[serde(default)]
    pub organizational_unit_identifiers: Vec<OuIdentifier>,
    #[serde(default)]
    pub crypto_config: Option<CryptoConfig>,
    #[serde(default)]
    pub tls_root_certs: Vec<String>,
    #[serde(default)]
    pub tls_intermediate_certs: Vec<String>,
    #[serde(default)]
    pub node_ous: Option<NodeOus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_profile() {
        let yaml = r#"
schema_version: 0
channel:
  consortium: SampleConsortium
  application:
    organizations:
      - name: Org1
        msp:
          id: Org1MSP
"#;

        let profile: ProfileV0 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.schema_version, 0);
        assert_eq!(profile.channel.consortium, "SampleConsortium");
        let app = profile.channel.application.unwrap();
        assert_eq!(app.organizations.len(), 1);
        assert_eq!(app.organizations[0].msp.id, "Org1MSP");
        assert!(app.acls.is_empty());
        assert!(profile.channel.orderer.is_none());
    }

    #[test]
    fn test_orderer_defaults() {
        let yaml = r#"
schema_version: 0
channel:
  orderer:
    addresses: ["orderer.example.com:7050"]
"#;

        let profile: ProfileV0 = serde_yaml::from_str(yaml).unwrap();
        let orderer = profile.channel.orderer.unwrap();
        assert_eq!(orderer.orderer_type, "solo");
        assert_eq!(orderer.batch_timeout, "2s");
        assert_eq!(orderer.batch_size.max_message_count, 500);
        assert_eq!(orderer.state, ConsensusState::Normal);
    }

    #[test]
    fn test_policy_type_tag() {
        let yaml = r#"
type: ImplicitMeta
rule: "MAJORITY Admins"
"#;

        let policy: ProfilePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.policy_type, PolicyType::ImplicitMeta);
        assert_eq!(policy.rule, "MAJORITY Admins");
    }
}
