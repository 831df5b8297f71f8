use std::time::Duration;

use crate::address::parse_address;
use crate::builder::{new_orderer_org_group, values};
use crate::core_types::keys::{ENDPOINTS_KEY, ORDERER_GROUP_KEY};
use crate::descriptor::{BatchSize, Organization, Policy};
use crate::errors::{ConfigError, ExError, Result};

use super::{add_capability, group_path, put_policy, put_value, ConfigTx};

const ORDERER: &[&str] = &[ORDERER_GROUP_KEY];

impl ConfigTx {
    /// Add an organization to the Orderer group.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the name is taken, `NotFound` if there is no
    /// Orderer group, or any builder error for the organization.
    pub fn add_orderer_org(&mut self, org: &Organization) -> Result<()> {
        let org_group = new_orderer_org_group(org)?;
        let group = self.updated_group_mut(ORDERER)?;
        if group.group(&org.name).is_some() {
            return Err(ExError::from(ConfigError::AlreadyExists {
                what: "organization".to_string(),
                name: org.name.clone(),
            })
            .with_path(group_path(ORDERER)));
        }
        group.insert_group(org.name.clone(), org_group);
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if the organization does not exist.
    pub fn remove_orderer_org(&mut self, name: &str) -> Result<()> {
        let group = self.updated_group_mut(ORDERER)?;
        group.remove_group(name).map(|_| ()).ok_or_else(|| {
            ExError::from(ConfigError::NotFound {
                what: "organization".to_string(),
                name: name.to_string(),
            })
            .with_path(group_path(ORDERER))
        })
    }

    /// Add a `host:port` endpoint to an orderer organization.
    ///
    /// # Errors
    ///
    /// `InvalidAddress` for a malformed endpoint, `NotFound` if the
    /// organization does not exist, `AlreadyExists` for a duplicate.
    pub fn add_orderer_endpoint(&mut self, org: &str, endpoint: &str) -> Result<()> {
        parse_address(endpoint)?;
        let path = [ORDERER_GROUP_KEY, org];
        let mut endpoints = self.view_updated().orderer_org(org)?.orderer_endpoints;
        if endpoints.iter().any(|e| e == endpoint) {
            return Err(ExError::from(ConfigError::AlreadyExists {
                what: "orderer endpoint".to_string(),
                name: endpoint.to_string(),
            })
            .with_path(group_path(&path)));
        }
        endpoints.push(endpoint.to_string());

        let value = values::endpoints_value(&endpoints)?;
        put_value(self.updated_group_mut(&path)?, value);
        Ok(())
    }

    /// Remove an endpoint; the Endpoints value goes away with the last one.
    ///
    /// # Errors
    ///
    /// `NotFound` if the organization or the endpoint does not exist.
    pub fn remove_orderer_endpoint(&mut self, org: &str, endpoint: &str) -> Result<()> {
        let path = [ORDERER_GROUP_KEY, org];
        let endpoints = self.view_updated().orderer_org(org)?.orderer_endpoints;
        if !endpoints.iter().any(|e| e == endpoint) {
            return Err(ExError::from(ConfigError::NotFound {
                what: "orderer endpoint".to_string(),
                name: endpoint.to_string(),
            })
            .with_path(group_path(&path)));
        }
        let remaining: Vec<String> = endpoints.into_iter().filter(|e| e != endpoint).collect();

        let group = self.updated_group_mut(&path)?;
        if remaining.is_empty() {
            group.remove_value(ENDPOINTS_KEY);
        } else {
            put_value(group, values::endpoints_value(&remaining)?);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if there is no Orderer group.
    pub fn set_batch_size(&mut self, batch_size: &BatchSize) -> Result<()> {
        let value = values::batch_size_value(batch_size)?;
        put_value(self.updated_group_mut(ORDERER)?, value);
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if there is no Orderer group.
    pub fn set_batch_timeout(&mut self, timeout: Duration) -> Result<()> {
        let value = values::batch_timeout_value(timeout)?;
        put_value(self.updated_group_mut(ORDERER)?, value);
        Ok(())
    }

    /// # Errors
    ///
    /// `AlreadyExists` if the capability is already enabled.
    pub fn add_orderer_capability(&mut self, capability: &str) -> Result<()> {
        let group = self.updated_group_mut(ORDERER)?;
        add_capability(group, capability, ORDERER)
    }

    /// # Errors
    ///
    /// `InvalidPolicy` if the rule does not parse.
    pub fn set_orderer_policy(&mut self, name: &str, policy: &Policy) -> Result<()> {
        let group = self.updated_group_mut(ORDERER)?;
        put_policy(group, name, policy, ORDERER)
    }
}
