//! Configuration Facade.
//!
//! A [`ConfigTx`] holds the original tree and a working copy. Setters only
//! ever touch the working copy, and every setter validates its input before
//! mutating anything. [`ConfigTx::compute_update`] diffs the two.
//!
//! Setters replace leaves in place and keep the replaced leaf's version and
//! mod policy; version bumps are computed by the diff, never here.

mod application;
mod channel;
mod consortiums;
mod orderer;
mod view;

pub use view::ChannelView;

use std::collections::BTreeMap;
use std::time::Instant;

use crate::address::Address;
use crate::builder::values::{self, StandardValue};
use crate::core_types::keys::{CAPABILITIES_KEY, CHANNEL_GROUP_KEY, DEFAULT_MOD_POLICY};
use crate::descriptor::{
    Application, Channel, Consortium, Msp, Orderer, Organization, Policy,
};
use crate::diff::compute_config_update;
use crate::errors::{ConfigError, ExError, ExErrorKind, Result};
use crate::model::{Config, ConfigGroup, ConfigPolicy, ConfigSignature, ConfigUpdate, ConfigValue};
use crate::payload::Capabilities;
use crate::policy::validate_rule;
use crate::txn::{new_config_update_envelope, Envelope, Framer};
use crate::{log_op_end, log_op_error, log_op_start};

/// Render a group path below the channel root, e.g. `/Channel/Application`
pub(crate) fn group_path(path: &[&str]) -> String {
    let mut rendered = format!("/{}", CHANNEL_GROUP_KEY);
    for segment in path {
        rendered.push('/');
        rendered.push_str(segment);
    }
    rendered
}

/// An original configuration and the working copy being edited
#[derive(Debug, Clone)]
pub struct ConfigTx {
    original: Config,
    updated: Config,
}

impl ConfigTx {
    pub fn new(config: Config) -> Self {
        Self {
            updated: config.clone(),
            original: config,
        }
    }

    pub fn original_config(&self) -> &Config {
        &self.original
    }

    pub fn updated_config(&self) -> &Config {
        &self.updated
    }

    pub fn view_original(&self) -> ChannelView<'_> {
        ChannelView::new(&self.original.channel_group)
    }

    pub fn view_updated(&self) -> ChannelView<'_> {
        ChannelView::new(&self.updated.channel_group)
    }

    /// Diff the working copy against the original for `channel_id`.
    ///
    /// # Errors
    ///
    /// `InvalidChannelId` for an empty id, checked before any diffing;
    /// otherwise any diff error.
    pub fn compute_update(&self, channel_id: &str) -> Result<ConfigUpdate> {
        log_op_start!("compute_update", channel_id = channel_id);
        let start = Instant::now();

        let result = if channel_id.is_empty() {
            Err(ExError::from(ConfigError::EmptyChannelId).with_op("compute_update"))
        } else {
            compute_config_update(&self.original, &self.updated)
                .map_err(|e| e.context("compute_update", "failed to compute update"))
        };

        match result {
            Ok(mut update) => {
                update.channel_id = channel_id.to_string();
                log_op_end!(
                    "compute_update",
                    duration_ms = start.elapsed().as_millis() as u64,
                    channel_id = channel_id
                );
                Ok(update)
            }
            Err(e) => {
                log_op_error!(
                    "compute_update",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    channel_id = channel_id
                );
                Err(e)
            }
        }
    }

    /// Wrap a computed update and its collected signatures in an unsigned
    /// CONFIG_UPDATE envelope.
    ///
    /// # Errors
    ///
    /// `InvalidChannelId` if the update has no channel id.
    pub fn new_envelope(
        &self,
        update: &ConfigUpdate,
        signatures: Vec<ConfigSignature>,
    ) -> Result<Envelope> {
        self.new_envelope_with(&Framer::system(), update, signatures)
    }

    /// [`ConfigTx::new_envelope`] with an explicit framer
    ///
    /// # Errors
    ///
    /// Same as [`ConfigTx::new_envelope`].
    pub fn new_envelope_with(
        &self,
        framer: &Framer,
        update: &ConfigUpdate,
        signatures: Vec<ConfigSignature>,
    ) -> Result<Envelope> {
        new_config_update_envelope(framer, update, signatures)
    }

    // ---- reads over the original configuration; use `view_updated` for pending edits ----

    /// # Errors
    ///
    /// See [`ChannelView::channel_configuration`].
    pub fn channel_configuration(&self) -> Result<Channel> {
        self.view_original().channel_configuration()
    }

    /// # Errors
    ///
    /// See [`ChannelView::application_configuration`].
    pub fn application_configuration(&self) -> Result<Application> {
        self.view_original().application_configuration()
    }

    /// # Errors
    ///
    /// See [`ChannelView::application_org`].
    pub fn application_org(&self, name: &str) -> Result<Organization> {
        self.view_original().application_org(name)
    }

    /// # Errors
    ///
    /// See [`ChannelView::anchor_peers`].
    pub fn anchor_peers(&self, org: &str) -> Result<Vec<Address>> {
        self.view_original().anchor_peers(org)
    }

    /// # Errors
    ///
    /// See [`ChannelView::orderer_configuration`].
    pub fn orderer_configuration(&self) -> Result<Orderer> {
        self.view_original().orderer_configuration()
    }

    /// # Errors
    ///
    /// See [`ChannelView::orderer_org`].
    pub fn orderer_org(&self, name: &str) -> Result<Organization> {
        self.view_original().orderer_org(name)
    }

    /// # Errors
    ///
    /// See [`ChannelView::consortiums`].
    pub fn consortiums(&self) -> Result<Vec<Consortium>> {
        self.view_original().consortiums()
    }

    /// # Errors
    ///
    /// See [`ChannelView::consortium`].
    pub fn consortium(&self, name: &str) -> Result<Consortium> {
        self.view_original().consortium(name)
    }

    /// # Errors
    ///
    /// See [`ChannelView::channel_capabilities`].
    pub fn channel_capabilities(&self) -> Result<Vec<String>> {
        self.view_original().channel_capabilities()
    }

    /// # Errors
    ///
    /// See [`ChannelView::channel_policies`].
    pub fn channel_policies(&self) -> Result<BTreeMap<String, Policy>> {
        self.view_original().channel_policies()
    }

    /// # Errors
    ///
    /// See [`ChannelView::application_policies`].
    pub fn application_policies(&self) -> Result<BTreeMap<String, Policy>> {
        self.view_original().application_policies()
    }

    /// # Errors
    ///
    /// See [`ChannelView::orderer_policies`].
    pub fn orderer_policies(&self) -> Result<BTreeMap<String, Policy>> {
        self.view_original().orderer_policies()
    }

    /// # Errors
    ///
    /// See [`ChannelView::msp_configuration`].
    pub fn msp_configuration(&self, org_path: &[&str]) -> Result<Msp> {
        self.view_original().msp_configuration(org_path)
    }

    // ---- working copy plumbing shared by the setters ----

    fn updated_group_mut(&mut self, path: &[&str]) -> Result<&mut ConfigGroup> {
        self.updated
            .channel_group
            .group_at_mut(path)
            .ok_or_else(|| not_found_group(path))
    }
}

fn not_found_group(path: &[&str]) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("update_config")
        .with_path(group_path(path))
        .with_message("group does not exist")
}

/// Replace or insert a leaf, keeping an existing leaf's version and mod
/// policy
fn put_value(group: &mut ConfigGroup, value: StandardValue) {
    let (version, mod_policy) = match group.value(value.key) {
        Some(existing) => (existing.version, existing.mod_policy.clone()),
        None => (0, DEFAULT_MOD_POLICY.to_string()),
    };
    group.insert_value(
        value.key,
        ConfigValue {
            version,
            value: value.value,
            mod_policy,
        },
    );
}

/// Validate and set a policy, keeping an existing policy's version and mod
/// policy
fn put_policy(group: &mut ConfigGroup, name: &str, policy: &Policy, path: &[&str]) -> Result<()> {
    validate_rule(policy.policy_type, &policy.rule)
        .map_err(|e| ExError::from(e).with_key(name).with_path(group_path(path)))?;
    let (version, mod_policy) = match group.policy(name) {
        Some(existing) => (existing.version, existing.mod_policy.clone()),
        None => (0, DEFAULT_MOD_POLICY.to_string()),
    };
    group.insert_policy(
        name,
        ConfigPolicy {
            version,
            policy_type: policy.policy_type,
            rule: policy.rule.clone(),
            mod_policy,
        },
    );
    Ok(())
}

fn take_policy(group: &mut ConfigGroup, name: &str, path: &[&str]) -> Result<()> {
    group
        .remove_policy(name)
        .map(|_| ())
        .ok_or_else(|| {
            ExError::from(ConfigError::NotFound {
                what: "policy".to_string(),
                name: name.to_string(),
            })
            .with_path(group_path(path))
        })
}

fn current_capabilities(group: &ConfigGroup, path: &[&str]) -> Result<Capabilities> {
    match group.value(CAPABILITIES_KEY) {
        Some(value) => value
            .decode(CAPABILITIES_KEY)
            .map_err(|e| e.with_path(group_path(path))),
        None => Ok(Capabilities::default()),
    }
}

fn add_capability(group: &mut ConfigGroup, capability: &str, path: &[&str]) -> Result<()> {
    let current = current_capabilities(group, path)?;
    let mut names = current.names();
    if names.iter().any(|name| name == capability) {
        return Err(ExError::from(ConfigError::AlreadyExists {
            what: "capability".to_string(),
            name: capability.to_string(),
        })
        .with_path(group_path(path)));
    }
    names.push(capability.to_string());
    put_value(group, values::capabilities_value(&names)?);
    Ok(())
}

fn remove_capability(group: &mut ConfigGroup, capability: &str, path: &[&str]) -> Result<()> {
    let current = current_capabilities(group, path)?;
    let names = current.names();
    if !names.iter().any(|name| name == capability) {
        return Err(ExError::from(ConfigError::NotFound {
            what: "capability".to_string(),
            name: capability.to_string(),
        })
        .with_path(group_path(path)));
    }
    let remaining: Vec<String> = names.into_iter().filter(|name| name != capability).collect();
    put_value(group, values::capabilities_value(&remaining)?);
    Ok(())
}
