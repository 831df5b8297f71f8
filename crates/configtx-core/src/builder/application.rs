use crate::core_types::keys::{ADMINS_POLICY_KEY, APPLICATION_GROUP_KEY, CHANNEL_GROUP_KEY};
use crate::descriptor::{Application, Organization};
use crate::errors::Result;
use crate::model::ConfigGroup;

use super::organization::new_org_group;
use super::{at, ensure_unique_orgs, set_policies, set_value, values};

/// Build `/Channel/Application`.
///
/// # Errors
///
/// Fails on a malformed policy rule, a malformed anchor peer, or a
/// duplicate organization name.
pub fn new_application_group(application: &Application) -> Result<ConfigGroup> {
    let path = format!("/{}/{}", CHANNEL_GROUP_KEY, APPLICATION_GROUP_KEY);
    ensure_unique_orgs(&application.organizations, APPLICATION_GROUP_KEY).map_err(at(&path))?;

    let mut group = ConfigGroup::with_mod_policy(ADMINS_POLICY_KEY);
    set_policies(&mut group, &application.policies, ADMINS_POLICY_KEY).map_err(at(&path))?;

    if !application.acls.is_empty() {
        set_value(&mut group, values::acls_value(&application.acls)?, ADMINS_POLICY_KEY);
    }
    if !application.capabilities.is_empty() {
        set_value(
            &mut group,
            values::capabilities_value(&application.capabilities)?,
            ADMINS_POLICY_KEY,
        );
    }

    for org in &application.organizations {
        group.insert_group(org.name.clone(), new_application_org_group(org)?);
    }

    Ok(group)
}

/// Build `/Channel/Application/<org>`: policies, MSP and anchor peers.
///
/// # Errors
///
/// Fails on a malformed policy rule or a payload that cannot be marshaled.
pub fn new_application_org_group(org: &Organization) -> Result<ConfigGroup> {
    let path = format!(
        "/{}/{}/{}",
        CHANNEL_GROUP_KEY, APPLICATION_GROUP_KEY, org.name
    );
    let mut group = new_org_group(org, &path)?;
    if !org.anchor_peers.is_empty() {
        set_value(
            &mut group,
            values::anchor_peers_value(&org.anchor_peers)?,
            ADMINS_POLICY_KEY,
        );
    }
    Ok(group)
}
