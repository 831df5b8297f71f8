use crate::builder::new_consortium_org_group;
use crate::core_types::keys::CONSORTIUMS_GROUP_KEY;
use crate::descriptor::Organization;
use crate::errors::{ConfigError, ExError, Result};

use super::{group_path, ConfigTx};

impl ConfigTx {
    /// Add an organization to an existing consortium.
    ///
    /// # Errors
    ///
    /// `NotFound` if the consortium does not exist, `AlreadyExists` if the
    /// organization is already a member.
    pub fn add_consortium_org(&mut self, consortium: &str, org: &Organization) -> Result<()> {
        let path = [CONSORTIUMS_GROUP_KEY, consortium];
        let org_group = new_consortium_org_group(consortium, org)?;
        let group = self.updated_group_mut(&path)?;
        if group.group(&org.name).is_some() {
            return Err(ExError::from(ConfigError::AlreadyExists {
                what: "organization".to_string(),
                name: org.name.clone(),
            })
            .with_path(group_path(&path)));
        }
        group.insert_group(org.name.clone(), org_group);
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if there is no such consortium.
    pub fn remove_consortium(&mut self, name: &str) -> Result<()> {
        let path = [CONSORTIUMS_GROUP_KEY];
        let group = self.updated_group_mut(&path)?;
        group.remove_group(name).map(|_| ()).ok_or_else(|| {
            ExError::from(ConfigError::NotFound {
                what: "consortium".to_string(),
                name: name.to_string(),
            })
            .with_path(group_path(&path))
        })
    }
}
