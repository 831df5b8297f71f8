//! Typed read accessors projecting a tree back into descriptor values.
//!
//! Optional leaves that are absent read back as empty; a group or leaf the
//! accessor requires is a `NotFound` error carrying its path and key.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use crate::address::{parse_address, Address};
use crate::core_types::keys::{
    ACLS_KEY, ANCHOR_PEERS_KEY, APPLICATION_GROUP_KEY, BATCH_SIZE_KEY, BATCH_TIMEOUT_KEY,
    CAPABILITIES_KEY, CHANNEL_RESTRICTIONS_KEY, CONSENSUS_TYPE_ETCDRAFT, CONSENSUS_TYPE_KEY,
    CONSORTIUMS_GROUP_KEY, CONSORTIUM_KEY, ENDPOINTS_KEY, KAFKA_BROKERS_KEY, MSP_KEY,
    ORDERER_ADDRESSES_KEY, ORDERER_GROUP_KEY,
};
use crate::codec;
use crate::descriptor::{
    Application, Channel, Consortium, EtcdRaft, Kafka, Msp, Orderer, Organization, Policy,
};
use crate::duration::parse_duration;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::facade::group_path;
use crate::model::ConfigGroup;
use crate::payload::{
    Acls, AnchorPeers, BatchSize, BatchTimeout, Capabilities, ChannelRestrictions, ConsensusType,
    ConsortiumName, KafkaBrokers, MspConfig, OrdererAddresses,
};

/// Read-only projection over one channel root
#[derive(Debug, Clone, Copy)]
pub struct ChannelView<'a> {
    root: &'a ConfigGroup,
}

impl<'a> ChannelView<'a> {
    pub fn new(root: &'a ConfigGroup) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'a ConfigGroup {
        self.root
    }

    fn group(&self, path: &[&str]) -> Result<&'a ConfigGroup> {
        self.root.group_at(path).ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("read_config")
                .with_path(group_path(path))
                .with_message("group does not exist")
        })
    }

    fn required<T: DeserializeOwned>(&self, path: &[&str], key: &str) -> Result<T> {
        self.optional(path, key)?.ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("read_config")
                .with_key(key)
                .with_path(group_path(path))
                .with_message(format!("config does not contain value for {}", key))
        })
    }

    fn optional<T: DeserializeOwned>(&self, path: &[&str], key: &str) -> Result<Option<T>> {
        let group = self.group(path)?;
        group
            .value(key)
            .map(|value| {
                codec::unmarshal(key, &value.value).map_err(|e| e.with_path(group_path(path)))
            })
            .transpose()
    }

    fn policies_at(&self, path: &[&str]) -> Result<BTreeMap<String, Policy>> {
        Ok(self
            .group(path)?
            .policies
            .iter()
            .map(|(name, policy)| {
                (
                    name.clone(),
                    Policy {
                        policy_type: policy.policy_type,
                        rule: policy.rule.clone(),
                    },
                )
            })
            .collect())
    }

    fn capabilities_at(&self, path: &[&str]) -> Result<Vec<String>> {
        Ok(self
            .optional::<Capabilities>(path, CAPABILITIES_KEY)?
            .map(|caps| caps.names())
            .unwrap_or_default())
    }

    fn organization_at(&self, path: &[&str]) -> Result<Organization> {
        let name = path.last().copied().unwrap_or_default().to_string();
        let anchor_peers = self
            .optional::<AnchorPeers>(path, ANCHOR_PEERS_KEY)?
            .map(|peers| peers.anchor_peers)
            .unwrap_or_default();
        let orderer_endpoints = self
            .optional::<OrdererAddresses>(path, ENDPOINTS_KEY)?
            .map(|endpoints| endpoints.addresses)
            .unwrap_or_default();

        Ok(Organization {
            name,
            policies: self.policies_at(path)?,
            msp: self.msp_configuration(path)?,
            anchor_peers,
            orderer_endpoints,
        })
    }

    fn organizations_in(&self, path: &[&str]) -> Result<Vec<Organization>> {
        let group = self.group(path)?;
        group
            .groups
            .keys()
            .map(|name| {
                let mut org_path = path.to_vec();
                org_path.push(name.as_str());
                self.organization_at(&org_path)
            })
            .collect()
    }

    /// The whole channel, section by section as present
    ///
    /// # Errors
    ///
    /// Any error from a present section's accessor.
    pub fn channel_configuration(&self) -> Result<Channel> {
        let consortium = self
            .optional::<ConsortiumName>(&[], CONSORTIUM_KEY)?
            .map(|c| c.name)
            .unwrap_or_default();
        let application = match self.root.group(APPLICATION_GROUP_KEY) {
            Some(_) => Some(self.application_configuration()?),
            None => None,
        };
        let orderer = match self.root.group(ORDERER_GROUP_KEY) {
            Some(_) => Some(self.orderer_configuration()?),
            None => None,
        };
        let consortiums = match self.root.group(CONSORTIUMS_GROUP_KEY) {
            Some(_) => self.consortiums()?,
            None => Vec::new(),
        };

        Ok(Channel {
            consortium,
            application,
            orderer,
            consortiums,
            capabilities: self.capabilities_at(&[])?,
            policies: self.channel_policies()?,
        })
    }

    /// # Errors
    ///
    /// `NotFound` if there is no Application group.
    pub fn application_configuration(&self) -> Result<Application> {
        let path = [APPLICATION_GROUP_KEY];
        let acls = self
            .optional::<Acls>(&path, ACLS_KEY)?
            .map(|acls| {
                acls.acls
                    .into_iter()
                    .map(|(resource, api)| (resource, api.policy_ref))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Application {
            organizations: self.organizations_in(&path)?,
            capabilities: self.capabilities_at(&path)?,
            policies: self.policies_at(&path)?,
            acls,
        })
    }

    /// # Errors
    ///
    /// `NotFound` if the organization does not exist.
    pub fn application_org(&self, name: &str) -> Result<Organization> {
        self.organization_at(&[APPLICATION_GROUP_KEY, name])
    }

    /// # Errors
    ///
    /// `NotFound` if the organization does not exist.
    pub fn anchor_peers(&self, org: &str) -> Result<Vec<Address>> {
        Ok(self
            .optional::<AnchorPeers>(&[APPLICATION_GROUP_KEY, org], ANCHOR_PEERS_KEY)?
            .map(|peers| peers.anchor_peers)
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// `NotFound` if there is no Orderer group or it lacks ConsensusType,
    /// BatchSize or BatchTimeout; `InvalidInput` for an unreadable batch
    /// timeout.
    pub fn orderer_configuration(&self) -> Result<Orderer> {
        let path = [ORDERER_GROUP_KEY];

        let consensus: ConsensusType = self.required(&path, CONSENSUS_TYPE_KEY)?;
        let etcd_raft = if consensus.consensus_type == CONSENSUS_TYPE_ETCDRAFT {
            codec::unmarshal::<EtcdRaft>("EtcdRaft", &consensus.metadata)
                .map_err(|e| e.with_path(group_path(&path)))?
        } else {
            EtcdRaft::default()
        };

        let batch_size: BatchSize = self.required(&path, BATCH_SIZE_KEY)?;
        let batch_timeout: BatchTimeout = self.required(&path, BATCH_TIMEOUT_KEY)?;
        let batch_timeout = parse_duration(&batch_timeout.timeout).map_err(|e| {
            ExError::from(e)
                .with_key(BATCH_TIMEOUT_KEY)
                .with_path(group_path(&path))
        })?;

        let max_channels = self
            .optional::<ChannelRestrictions>(&path, CHANNEL_RESTRICTIONS_KEY)?
            .map(|r| r.max_count)
            .unwrap_or_default();
        let brokers = self
            .optional::<KafkaBrokers>(&path, KAFKA_BROKERS_KEY)?
            .map(|k| k.brokers)
            .unwrap_or_default();

        let addresses = self
            .optional::<OrdererAddresses>(&[], ORDERER_ADDRESSES_KEY)?
            .map(|a| a.addresses)
            .unwrap_or_default()
            .iter()
            .map(|address| {
                parse_address(address)
                    .map_err(|e| ExError::from(e).with_key(ORDERER_ADDRESSES_KEY))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Orderer {
            orderer_type: consensus.consensus_type,
            addresses,
            batch_timeout,
            batch_size,
            kafka: Kafka { brokers },
            etcd_raft,
            organizations: self.organizations_in(&path)?,
            max_channels,
            capabilities: self.capabilities_at(&path)?,
            policies: self.policies_at(&path)?,
            state: consensus.state,
        })
    }

    /// # Errors
    ///
    /// `NotFound` if the organization does not exist.
    pub fn orderer_org(&self, name: &str) -> Result<Organization> {
        self.organization_at(&[ORDERER_GROUP_KEY, name])
    }

    /// Every consortium in name order
    ///
    /// # Errors
    ///
    /// `NotFound` if there is no Consortiums group.
    pub fn consortiums(&self) -> Result<Vec<Consortium>> {
        self.group(&[CONSORTIUMS_GROUP_KEY])?
            .groups
            .keys()
            .map(|name| self.consortium(name))
            .collect()
    }

    /// # Errors
    ///
    /// `NotFound` if the consortium does not exist.
    pub fn consortium(&self, name: &str) -> Result<Consortium> {
        Ok(Consortium {
            name: name.to_string(),
            organizations: self.organizations_in(&[CONSORTIUMS_GROUP_KEY, name])?,
        })
    }

    /// # Errors
    ///
    /// `NotFound` if the channel root has no Capabilities value.
    pub fn channel_capabilities(&self) -> Result<Vec<String>> {
        self.required::<Capabilities>(&[], CAPABILITIES_KEY)
            .map(|caps| caps.names())
    }

    /// # Errors
    ///
    /// None for a well-formed view; the root group always exists.
    pub fn channel_policies(&self) -> Result<BTreeMap<String, Policy>> {
        self.policies_at(&[])
    }

    /// # Errors
    ///
    /// `NotFound` if there is no Application group.
    pub fn application_policies(&self) -> Result<BTreeMap<String, Policy>> {
        self.policies_at(&[APPLICATION_GROUP_KEY])
    }

    /// # Errors
    ///
    /// `NotFound` if there is no Orderer group.
    pub fn orderer_policies(&self) -> Result<BTreeMap<String, Policy>> {
        self.policies_at(&[ORDERER_GROUP_KEY])
    }

    /// MSP definition of the organization group at `org_path`, e.g.
    /// `["Application", "Org1"]`
    ///
    /// # Errors
    ///
    /// `NotFound` if the group or its MSP value is absent.
    pub fn msp_configuration(&self, org_path: &[&str]) -> Result<Msp> {
        self.required::<MspConfig>(org_path, MSP_KEY)
            .map(|msp| msp.config)
    }
}
