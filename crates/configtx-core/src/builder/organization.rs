use crate::core_types::keys::ADMINS_POLICY_KEY;
use crate::descriptor::Organization;
use crate::errors::Result;
use crate::model::ConfigGroup;

use super::{at, set_policies, set_value, values};

/// The part every organization group shares: its policies and MSP
pub(crate) fn new_org_group(org: &Organization, path: &str) -> Result<ConfigGroup> {
    let mut group = ConfigGroup::with_mod_policy(ADMINS_POLICY_KEY);
    set_policies(&mut group, &org.policies, ADMINS_POLICY_KEY).map_err(at(path))?;
    set_value(
        &mut group,
        values::msp_value(&org.msp).map_err(at(path))?,
        ADMINS_POLICY_KEY,
    );
    Ok(group)
}
