use crate::core_types::keys::{
    ADMINS_POLICY_KEY, BLOCK_VALIDATION_POLICY_KEY, CHANNEL_GROUP_KEY, CONSENSUS_TYPE_KAFKA,
    ORDERER_GROUP_KEY,
};
use crate::descriptor::{Orderer, Organization};
use crate::errors::{ConfigError, Result};
use crate::model::ConfigGroup;

use super::organization::new_org_group;
use super::{at, ensure_unique_orgs, set_policies, set_value, values};

/// Build `/Channel/Orderer`.
///
/// # Errors
///
/// - `MissingField` if no `BlockValidation` policy is given
/// - `InvalidInput` for an unknown orderer type or duplicate organization
/// - `InvalidPolicy`/`InvalidAddress` from policies and org endpoints
pub fn new_orderer_group(orderer: &Orderer) -> Result<ConfigGroup> {
    let path = format!("/{}/{}", CHANNEL_GROUP_KEY, ORDERER_GROUP_KEY);

    if !orderer.policies.contains_key(BLOCK_VALIDATION_POLICY_KEY) {
        return Err(at(&path)(
            ConfigError::MissingPolicy {
                policy: BLOCK_VALIDATION_POLICY_KEY.to_string(),
            }
            .into(),
        ));
    }
    ensure_unique_orgs(&orderer.organizations, ORDERER_GROUP_KEY).map_err(at(&path))?;

    let mut group = ConfigGroup::with_mod_policy(ADMINS_POLICY_KEY);
    set_policies(&mut group, &orderer.policies, ADMINS_POLICY_KEY).map_err(at(&path))?;

    set_value(
        &mut group,
        values::consensus_type_value(orderer).map_err(at(&path))?,
        ADMINS_POLICY_KEY,
    );
    set_value(
        &mut group,
        values::batch_size_value(&orderer.batch_size)?,
        ADMINS_POLICY_KEY,
    );
    set_value(
        &mut group,
        values::batch_timeout_value(orderer.batch_timeout)?,
        ADMINS_POLICY_KEY,
    );
    if orderer.max_channels > 0 {
        set_value(
            &mut group,
            values::channel_restrictions_value(orderer.max_channels)?,
            ADMINS_POLICY_KEY,
        );
    }
    if orderer.orderer_type == CONSENSUS_TYPE_KAFKA {
        set_value(
            &mut group,
            values::kafka_brokers_value(&orderer.kafka.brokers)?,
            ADMINS_POLICY_KEY,
        );
    }
    if !orderer.capabilities.is_empty() {
        set_value(
            &mut group,
            values::capabilities_value(&orderer.capabilities)?,
            ADMINS_POLICY_KEY,
        );
    }

    for org in &orderer.organizations {
        group.insert_group(org.name.clone(), new_orderer_org_group(org)?);
    }

    Ok(group)
}

/// Build `/Channel/Orderer/<org>`: policies, MSP and endpoints.
///
/// # Errors
///
/// Fails on a malformed policy rule or an endpoint that is not `host:port`.
pub fn new_orderer_org_group(org: &Organization) -> Result<ConfigGroup> {
    let path = format!("/{}/{}/{}", CHANNEL_GROUP_KEY, ORDERER_GROUP_KEY, org.name);
    let mut group = new_org_group(org, &path)?;
    if !org.orderer_endpoints.is_empty() {
        set_value(
            &mut group,
            values::endpoints_value(&org.orderer_endpoints).map_err(at(&path))?,
            ADMINS_POLICY_KEY,
        );
    }
    Ok(group)
}
