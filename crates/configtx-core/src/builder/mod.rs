//! Tree Builder: compiles a [`Channel`](crate::descriptor::Channel)
//! descriptor into a configuration tree.
//!
//! Every constructor builds a fresh group and returns it whole, so a failed
//! build never leaves a half-populated tree behind. Leaves inserted without
//! a mod policy get [`DEFAULT_MOD_POLICY`]. Finished roots are checked so
//! that no element is left without a mod policy.

pub mod application;
pub mod channel;
pub mod consortiums;
pub mod orderer;
mod organization;
pub mod values;

use std::collections::BTreeMap;

use crate::core_types::keys::DEFAULT_MOD_POLICY;
use crate::descriptor::{Organization, Policy};
use crate::errors::{ConfigError, ExError, Result};
use crate::model::{ConfigGroup, ConfigPolicy, ConfigValue};
use crate::policy::validate_rule;

pub use application::{new_application_group, new_application_org_group};
pub use channel::{
    default_config_template, new_application_channel_group, new_channel_group,
    new_system_channel_group,
};
pub use consortiums::{new_consortium_group, new_consortium_org_group, new_consortiums_group};
pub use orderer::{new_orderer_group, new_orderer_org_group};
pub use values::StandardValue;

fn or_default(mod_policy: &str) -> &str {
    if mod_policy.is_empty() {
        DEFAULT_MOD_POLICY
    } else {
        mod_policy
    }
}

/// Insert a leaf at version 0
pub fn set_value(group: &mut ConfigGroup, value: StandardValue, mod_policy: &str) {
    group.insert_value(value.key, ConfigValue::new(value.value, or_default(mod_policy)));
}

/// Insert every policy at version 0 after validating its rule.
///
/// # Errors
///
/// Returns `InvalidPolicy` keyed by the first policy whose rule does not
/// parse; the group is left unchanged in that case.
pub fn set_policies(
    group: &mut ConfigGroup,
    policies: &BTreeMap<String, Policy>,
    mod_policy: &str,
) -> Result<()> {
    for (name, policy) in policies {
        validate_rule(policy.policy_type, &policy.rule)
            .map_err(|e| ExError::from(e).with_key(name.clone()))?;
    }
    for (name, policy) in policies {
        group.insert_policy(
            name.clone(),
            ConfigPolicy::new(policy.policy_type, policy.rule.clone(), or_default(mod_policy)),
        );
    }
    Ok(())
}

/// Attach `path` to an error that has none yet
pub(crate) fn at(path: &str) -> impl Fn(ExError) -> ExError + '_ {
    move |err| {
        if err.path().is_some() {
            err
        } else {
            err.with_path(path)
        }
    }
}

/// Reject a section that names the same organization twice
pub(crate) fn ensure_unique_orgs(orgs: &[Organization], section: &str) -> Result<()> {
    let mut seen = std::collections::BTreeSet::new();
    for org in orgs {
        if !seen.insert(org.name.as_str()) {
            return Err(ConfigError::DuplicateOrganization {
                name: org.name.clone(),
                section: section.to_string(),
            }
            .into());
        }
    }
    Ok(())
}
