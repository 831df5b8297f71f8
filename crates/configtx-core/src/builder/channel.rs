use crate::core_types::keys::{
    ADMINS_POLICY_KEY, APPLICATION_GROUP_KEY, CHANNEL_GROUP_KEY, CONSORTIUMS_GROUP_KEY,
    ORDERER_ADMINS_POLICY_NAME, ORDERER_GROUP_KEY,
};
use crate::descriptor::{Application, Channel, Orderer};
use crate::errors::{ConfigError, ExError, Result};
use crate::model::ConfigGroup;

use super::{
    at, new_application_group, new_consortiums_group, new_orderer_group, set_policies,
    set_value, values,
};

fn root_path() -> String {
    format!("/{}", CHANNEL_GROUP_KEY)
}

fn finish(mut root: ConfigGroup) -> Result<ConfigGroup> {
    root.mod_policy = ADMINS_POLICY_KEY.to_string();
    root.validate_mod_policies(&root_path())?;
    Ok(root)
}

fn missing_section(section: &str) -> ExError {
    at(&root_path())(
        ConfigError::MissingSection {
            section: section.to_string(),
        }
        .into(),
    )
}

fn require_orderer(channel: &Channel) -> Result<&Orderer> {
    channel
        .orderer
        .as_ref()
        .ok_or_else(|| missing_section(ORDERER_GROUP_KEY))
}

fn require_application(channel: &Channel) -> Result<&Application> {
    channel
        .application
        .as_ref()
        .ok_or_else(|| missing_section(APPLICATION_GROUP_KEY))
}

/// Standard channel root: the Consortium value plus the Application group
/// when one is described.
///
/// # Errors
///
/// `MissingField` if no consortium is named; otherwise any error from the
/// Application section.
pub fn new_channel_group(channel: &Channel) -> Result<ConfigGroup> {
    if channel.consortium.is_empty() {
        return Err(at(&root_path())(ConfigError::MissingConsortium.into()));
    }

    let mut root = ConfigGroup::new();
    set_value(&mut root, values::consortium_value(&channel.consortium)?, "");

    if let Some(application) = &channel.application {
        root.insert_group(APPLICATION_GROUP_KEY, new_application_group(application)?);
    }

    finish(root)
}

/// Network genesis root: channel policies, orderer endpoints,
/// capabilities, hashing parameters, the Orderer group and the
/// Consortiums group.
///
/// # Errors
///
/// - `MissingField` when orderer endpoints or capabilities are absent
/// - `InvalidPolicy` for a malformed channel policy
/// - any error from the Orderer or Consortiums sections
pub fn new_system_channel_group(channel: &Channel) -> Result<ConfigGroup> {
    let path = root_path();
    let mut root = ConfigGroup::new();
    set_policies(&mut root, &channel.policies, ADMINS_POLICY_KEY).map_err(at(&path))?;

    let orderer = match &channel.orderer {
        Some(orderer) if !orderer.addresses.is_empty() => orderer,
        _ => return Err(at(&path)(ConfigError::MissingOrdererAddresses.into())),
    };
    set_value(
        &mut root,
        values::orderer_addresses_value(&orderer.addresses)?,
        ORDERER_ADMINS_POLICY_NAME,
    );

    if channel.capabilities.is_empty() {
        return Err(at(&path)(ConfigError::MissingCapabilities.into()));
    }
    set_value(
        &mut root,
        values::capabilities_value(&channel.capabilities)?,
        ADMINS_POLICY_KEY,
    );
    set_value(&mut root, values::hashing_algorithm_value()?, ADMINS_POLICY_KEY);
    set_value(
        &mut root,
        values::block_data_hashing_structure_value()?,
        ADMINS_POLICY_KEY,
    );

    root.insert_group(ORDERER_GROUP_KEY, new_orderer_group(orderer)?);
    root.insert_group(
        CONSORTIUMS_GROUP_KEY,
        new_consortiums_group(&channel.consortiums)?,
    );

    finish(root)
}

/// Application channel root for channels bootstrapped without a system
/// channel: policies, capabilities, hashing parameters, the Orderer group
/// and the Application group. No consortium is recorded.
///
/// # Errors
///
/// `MissingField` if the Orderer or Application section is absent;
/// otherwise any section error.
pub fn new_application_channel_group(channel: &Channel) -> Result<ConfigGroup> {
    let path = root_path();
    let orderer = require_orderer(channel)?;
    let application = require_application(channel)?;

    let mut root = ConfigGroup::new();
    set_policies(&mut root, &channel.policies, ADMINS_POLICY_KEY).map_err(at(&path))?;

    if !orderer.addresses.is_empty() {
        set_value(
            &mut root,
            values::orderer_addresses_value(&orderer.addresses)?,
            ORDERER_ADMINS_POLICY_NAME,
        );
    }
    if !channel.capabilities.is_empty() {
        set_value(
            &mut root,
            values::capabilities_value(&channel.capabilities)?,
            ADMINS_POLICY_KEY,
        );
    }
    set_value(&mut root, values::hashing_algorithm_value()?, ADMINS_POLICY_KEY);
    set_value(
        &mut root,
        values::block_data_hashing_structure_value()?,
        ADMINS_POLICY_KEY,
    );

    root.insert_group(ORDERER_GROUP_KEY, new_orderer_group(orderer)?);
    root.insert_group(APPLICATION_GROUP_KEY, new_application_group(application)?);

    finish(root)
}

/// Channel creation template: the standard root with the Application
/// group's own values and policies stripped, leaving its organizations.
///
/// # Errors
///
/// `MissingField` if the channel has no Application section; otherwise
/// any error from [`new_channel_group`].
pub fn default_config_template(channel: &Channel) -> Result<ConfigGroup> {
    let mut root = new_channel_group(channel)?;
    let application = root
        .group_mut(APPLICATION_GROUP_KEY)
        .ok_or_else(|| missing_section(APPLICATION_GROUP_KEY))?;
    application.values.clear();
    application.policies.clear();
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_standard_root_requires_consortium() {
        let err = new_channel_group(&Channel::default()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MissingField);
        assert_eq!(err.key(), Some("Consortium"));
    }

    #[test]
    fn test_standard_root_without_application() {
        let channel = Channel {
            consortium: "SampleConsortium".to_string(),
            ..Channel::default()
        };
        let root = new_channel_group(&channel).unwrap();
        assert!(root.value("Consortium").is_some());
        assert!(root.groups.is_empty());
        assert_eq!(root.mod_policy, "Admins");
    }

    #[test]
    fn test_system_root_requires_orderer_addresses_then_capabilities() {
        let err = new_system_channel_group(&Channel::default()).unwrap_err();
        assert_eq!(err.key(), Some("OrdererAddresses"));

        let channel = Channel {
            orderer: Some(Orderer {
                addresses: vec![crate::address::Address::new("orderer", 7050)],
                ..Orderer::default()
            }),
            ..Channel::default()
        };
        let err = new_system_channel_group(&channel).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MissingField);
        assert_eq!(err.key(), Some("Capabilities"));
    }

    #[test]
    fn test_template_requires_application() {
        let channel = Channel {
            consortium: "SampleConsortium".to_string(),
            ..Channel::default()
        };
        let err = default_config_template(&channel).unwrap_err();
        assert_eq!(err.key(), Some("Application"));
    }
}
