use crate::descriptor::Policy;
use crate::errors::Result;

use super::{add_capability, put_policy, remove_capability, take_policy, ConfigTx};

impl ConfigTx {
    /// # Errors
    ///
    /// `AlreadyExists` if the capability is already enabled.
    pub fn add_channel_capability(&mut self, capability: &str) -> Result<()> {
        let group = self.updated_group_mut(&[])?;
        add_capability(group, capability, &[])
    }

    /// # Errors
    ///
    /// `NotFound` if the capability is not enabled.
    pub fn remove_channel_capability(&mut self, capability: &str) -> Result<()> {
        let group = self.updated_group_mut(&[])?;
        remove_capability(group, capability, &[])
    }

    /// # Errors
    ///
    /// `InvalidPolicy` if the rule does not parse.
    pub fn set_channel_policy(&mut self, name: &str, policy: &Policy) -> Result<()> {
        let group = self.updated_group_mut(&[])?;
        put_policy(group, name, policy, &[])
    }

    /// # Errors
    ///
    /// `NotFound` if there is no such policy.
    pub fn remove_channel_policy(&mut self, name: &str) -> Result<()> {
        let group = self.updated_group_mut(&[])?;
        take_policy(group, name, &[])
    }
}
