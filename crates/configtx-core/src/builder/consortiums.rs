use crate::core_types::keys::{
    ACCEPT_ALL_POLICY_RULE, ADMINS_POLICY_KEY, CHANNEL_GROUP_KEY, CONSORTIUMS_GROUP_KEY,
    ORDERER_ADMINS_POLICY_NAME,
};
use crate::descriptor::{Consortium, Organization, Policy};
use crate::errors::{ConfigError, Result};
use crate::model::{ConfigGroup, ConfigPolicy};
use crate::policy::PolicyType;

use super::organization::new_org_group;
use super::{at, ensure_unique_orgs, set_value, values};

/// Build `/Channel/Consortiums`.
///
/// The group and its accept-all `Admins` policy are governed by the
/// orderer admins.
///
/// # Errors
///
/// Fails on a duplicate consortium or organization name, or on a
/// malformed organization policy.
pub fn new_consortiums_group(consortiums: &[Consortium]) -> Result<ConfigGroup> {
    let path = format!("/{}/{}", CHANNEL_GROUP_KEY, CONSORTIUMS_GROUP_KEY);

    let mut group = ConfigGroup::with_mod_policy(ORDERER_ADMINS_POLICY_NAME);
    group.insert_policy(
        ADMINS_POLICY_KEY,
        ConfigPolicy::new(
            PolicyType::Signature,
            ACCEPT_ALL_POLICY_RULE,
            ORDERER_ADMINS_POLICY_NAME,
        ),
    );

    for consortium in consortiums {
        if group.group(&consortium.name).is_some() {
            return Err(at(&path)(
                ConfigError::AlreadyExists {
                    what: "consortium".to_string(),
                    name: consortium.name.clone(),
                }
                .into(),
            ));
        }
        group.insert_group(consortium.name.clone(), new_consortium_group(consortium)?);
    }

    Ok(group)
}

/// Build `/Channel/Consortiums/<name>` with its organizations and an
/// `ANY Admins` channel creation policy.
///
/// # Errors
///
/// Fails on a duplicate organization name or malformed organization policy.
pub fn new_consortium_group(consortium: &Consortium) -> Result<ConfigGroup> {
    let path = format!(
        "/{}/{}/{}",
        CHANNEL_GROUP_KEY, CONSORTIUMS_GROUP_KEY, consortium.name
    );
    ensure_unique_orgs(&consortium.organizations, &consortium.name).map_err(at(&path))?;

    let mut group = ConfigGroup::with_mod_policy(ORDERER_ADMINS_POLICY_NAME);
    set_value(
        &mut group,
        values::channel_creation_policy_value(&Policy::implicit_meta("ANY Admins"))?,
        ORDERER_ADMINS_POLICY_NAME,
    );

    for org in &consortium.organizations {
        group.insert_group(
            org.name.clone(),
            new_consortium_org_group(&consortium.name, org)?,
        );
    }

    Ok(group)
}

/// Build `/Channel/Consortiums/<consortium>/<org>`: policies and MSP only.
///
/// # Errors
///
/// Fails on a malformed policy rule.
pub fn new_consortium_org_group(consortium: &str, org: &Organization) -> Result<ConfigGroup> {
    let path = format!(
        "/{}/{}/{}/{}",
        CHANNEL_GROUP_KEY, CONSORTIUMS_GROUP_KEY, consortium, org.name
    );
    new_org_group(org, &path)
}
