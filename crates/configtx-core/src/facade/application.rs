use std::collections::BTreeMap;

use crate::address::Address;
use crate::builder::{new_application_org_group, values};
use crate::core_types::keys::{ACLS_KEY, ANCHOR_PEERS_KEY, APPLICATION_GROUP_KEY};
use crate::descriptor::{Organization, Policy};
use crate::errors::{ConfigError, ExError, Result};

use super::{
    add_capability, group_path, put_policy, put_value, remove_capability, take_policy, ConfigTx,
};

const APPLICATION: &[&str] = &[APPLICATION_GROUP_KEY];

impl ConfigTx {
    /// Add an organization to the Application group.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the name is taken, `NotFound` if there is no
    /// Application group, or any builder error for the organization.
    pub fn add_application_org(&mut self, org: &Organization) -> Result<()> {
        let org_group = new_application_org_group(org)?;
        let group = self.updated_group_mut(APPLICATION)?;
        if group.group(&org.name).is_some() {
            return Err(ExError::from(ConfigError::AlreadyExists {
                what: "organization".to_string(),
                name: org.name.clone(),
            })
            .with_path(group_path(APPLICATION)));
        }
        group.insert_group(org.name.clone(), org_group);
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if the organization does not exist.
    pub fn remove_application_org(&mut self, name: &str) -> Result<()> {
        let group = self.updated_group_mut(APPLICATION)?;
        group.remove_group(name).map(|_| ()).ok_or_else(|| {
            ExError::from(ConfigError::NotFound {
                what: "organization".to_string(),
                name: name.to_string(),
            })
            .with_path(group_path(APPLICATION))
        })
    }

    /// # Errors
    ///
    /// `NotFound` if the organization does not exist, `AlreadyExists` if
    /// the peer is already an anchor peer.
    pub fn add_anchor_peer(&mut self, org: &str, peer: &Address) -> Result<()> {
        let path = [APPLICATION_GROUP_KEY, org];
        let mut peers = self.view_updated().anchor_peers(org)?;
        if peers.contains(peer) {
            return Err(ExError::from(ConfigError::AlreadyExists {
                what: "anchor peer".to_string(),
                name: peer.to_string(),
            })
            .with_path(group_path(&path)));
        }
        peers.push(peer.clone());

        let value = values::anchor_peers_value(&peers)?;
        put_value(self.updated_group_mut(&path)?, value);
        Ok(())
    }

    /// Remove an anchor peer; the AnchorPeers value goes away with the
    /// last one.
    ///
    /// # Errors
    ///
    /// `NotFound` if the organization or the peer does not exist.
    pub fn remove_anchor_peer(&mut self, org: &str, peer: &Address) -> Result<()> {
        let path = [APPLICATION_GROUP_KEY, org];
        let peers = self.view_updated().anchor_peers(org)?;
        if !peers.contains(peer) {
            return Err(ExError::from(ConfigError::NotFound {
                what: "anchor peer".to_string(),
                name: peer.to_string(),
            })
            .with_path(group_path(&path)));
        }
        let remaining: Vec<Address> = peers.into_iter().filter(|p| p != peer).collect();

        let group = self.updated_group_mut(&path)?;
        if remaining.is_empty() {
            group.remove_value(ANCHOR_PEERS_KEY);
        } else {
            put_value(group, values::anchor_peers_value(&remaining)?);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// `AlreadyExists` if the capability is already enabled.
    pub fn add_application_capability(&mut self, capability: &str) -> Result<()> {
        let group = self.updated_group_mut(APPLICATION)?;
        add_capability(group, capability, APPLICATION)
    }

    /// # Errors
    ///
    /// `NotFound` if the capability is not enabled.
    pub fn remove_application_capability(&mut self, capability: &str) -> Result<()> {
        let group = self.updated_group_mut(APPLICATION)?;
        remove_capability(group, capability, APPLICATION)
    }

    /// # Errors
    ///
    /// `InvalidPolicy` if the rule does not parse.
    pub fn set_application_policy(&mut self, name: &str, policy: &Policy) -> Result<()> {
        let group = self.updated_group_mut(APPLICATION)?;
        put_policy(group, name, policy, APPLICATION)
    }

    /// # Errors
    ///
    /// `NotFound` if there is no such policy.
    pub fn remove_application_policy(&mut self, name: &str) -> Result<()> {
        let group = self.updated_group_mut(APPLICATION)?;
        take_policy(group, name, APPLICATION)
    }

    /// Replace the ACL table; an empty table removes the ACLs value.
    ///
    /// # Errors
    ///
    /// `NotFound` if there is no Application group.
    pub fn set_application_acls(&mut self, acls: &BTreeMap<String, String>) -> Result<()> {
        let value = values::acls_value(acls)?;
        let group = self.updated_group_mut(APPLICATION)?;
        if acls.is_empty() {
            group.remove_value(ACLS_KEY);
        } else {
            put_value(group, value);
        }
        Ok(())
    }
}
