use std::collections::BTreeMap;
use std::time::Instant;

use crate::errors::Result;
use crate::model::{Config, ConfigGroup, ConfigPolicy, ConfigUpdate, ConfigValue};
use crate::{log_op_end, log_op_start};

/// Compute the minimal update that turns `original` into `updated`.
///
/// The returned update has an empty `channel_id`; callers stamp it.
///
/// Versions carried by `updated` are ignored: every read and write version is
/// derived from `original`, so an element removed and re-added at version 0
/// is still written at its original version + 1.
///
/// # Errors
///
/// Does not currently fail for any pair of trees.
pub fn compute_config_update(original: &Config, updated: &Config) -> Result<ConfigUpdate> {
    log_op_start!("compute_config_update");
    let start = Instant::now();

    let delta = diff_group(&original.channel_group, &updated.channel_group);

    let update = ConfigUpdate {
        channel_id: String::new(),
        read_set: delta.read,
        write_set: delta.write,
    };

    log_op_end!(
        "compute_config_update",
        duration_ms = start.elapsed().as_millis() as u64,
        read_set_len = update.read_set.entry_count() as u64,
        write_set_len = update.write_set.entry_count() as u64
    );

    Ok(update)
}

struct GroupDelta {
    read: ConfigGroup,
    write: ConfigGroup,
    changed: bool,
}

trait Leaf: Clone {
    fn version(&self) -> u64;
    fn set_version(&mut self, version: u64);
    fn mod_policy(&self) -> &str;
    fn same_content(&self, other: &Self) -> bool;
}

impl Leaf for ConfigValue {
    fn version(&self) -> u64 {
        self.version
    }
    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
    fn mod_policy(&self) -> &str {
        &self.mod_policy
    }
    fn same_content(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl Leaf for ConfigPolicy {
    fn version(&self) -> u64 {
        self.version
    }
    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
    fn mod_policy(&self) -> &str {
        &self.mod_policy
    }
    fn same_content(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

fn diff_group(base: &ConfigGroup, target: &ConfigGroup) -> GroupDelta {
    let mut read = ConfigGroup {
        version: base.version,
        mod_policy: base.mod_policy.clone(),
        ..ConfigGroup::default()
    };
    let mut write = ConfigGroup {
        version: base.version,
        mod_policy: target.mod_policy.clone(),
        ..ConfigGroup::default()
    };

    let values_removed = diff_leaves(
        &base.values,
        &target.values,
        &mut read.values,
        &mut write.values,
    );
    let policies_removed = diff_leaves(
        &base.policies,
        &target.policies,
        &mut read.policies,
        &mut write.policies,
    );

    let mut groups_removed = false;
    for (name, base_child) in &base.groups {
        match target.groups.get(name) {
            None => groups_removed = true,
            Some(target_child) => {
                let child = diff_group(base_child, target_child);
                if child.changed {
                    write.groups.insert(name.clone(), child.write);
                }
                read.groups.insert(name.clone(), child.read);
            }
        }
    }
    for (name, target_child) in &target.groups {
        if !base.groups.contains_key(name) {
            write.groups.insert(name.clone(), fresh(target_child));
        }
    }

    let changed = values_removed
        || policies_removed
        || groups_removed
        || !write.is_empty()
        || base.mod_policy != target.mod_policy;
    if changed {
        write.version = base.version + 1;
    }

    GroupDelta {
        read,
        write,
        changed,
    }
}

/// Sort one leaf map into read and write sets; returns true if any base key
/// is missing from the target.
fn diff_leaves<T: Leaf>(
    base: &BTreeMap<String, T>,
    target: &BTreeMap<String, T>,
    read: &mut BTreeMap<String, T>,
    write: &mut BTreeMap<String, T>,
) -> bool {
    let mut removed = false;

    for (key, base_leaf) in base {
        let Some(target_leaf) = target.get(key) else {
            removed = true;
            continue;
        };
        if target_leaf.same_content(base_leaf) && target_leaf.mod_policy() == base_leaf.mod_policy()
        {
            read.insert(key.clone(), base_leaf.clone());
        } else {
            let mut next = target_leaf.clone();
            next.set_version(base_leaf.version() + 1);
            write.insert(key.clone(), next);
        }
    }

    for (key, target_leaf) in target {
        if !base.contains_key(key) {
            let mut added = target_leaf.clone();
            added.set_version(0);
            write.insert(key.clone(), added);
        }
    }

    removed
}

/// Deep copy of an added subtree with every version reset to 0
fn fresh(group: &ConfigGroup) -> ConfigGroup {
    ConfigGroup {
        version: 0,
        groups: group
            .groups
            .iter()
            .map(|(name, child)| (name.clone(), fresh(child)))
            .collect(),
        values: group
            .values
            .iter()
            .map(|(key, value)| {
                let mut value = value.clone();
                value.version = 0;
                (key.clone(), value)
            })
            .collect(),
        policies: group
            .policies
            .iter()
            .map(|(name, policy)| {
                let mut policy = policy.clone();
                policy.version = 0;
                (name.clone(), policy)
            })
            .collect(),
        mod_policy: group.mod_policy.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyType;

    fn value(bytes: &[u8]) -> ConfigValue {
        ConfigValue::new(bytes.to_vec(), "Admins")
    }

    fn sample() -> Config {
        let mut org1 = ConfigGroup::with_mod_policy("Admins");
        org1.insert_value("MSP", value(b"org1"));
        org1.insert_policy(
            "Admins",
            ConfigPolicy::new(PolicyType::Signature, "OR('Org1MSP.admin')", "Admins"),
        );

        let mut app = ConfigGroup::with_mod_policy("Admins");
        app.insert_group("Org1", org1);
        app.insert_value("ACLs", value(b"acls"));

        let mut root = ConfigGroup::with_mod_policy("Admins");
        root.insert_group("Application", app);
        root.insert_value("Consortium", value(b"SampleConsortium"));
        Config::new(root)
    }

    #[test]
    fn test_identical_trees_produce_empty_write_set() {
        let config = sample();
        let update = compute_config_update(&config, &config).unwrap();

        assert!(update.write_set.is_empty());
        assert_eq!(update.write_set.version, config.channel_group.version);
        assert_eq!(update.read_set, config.channel_group);
        assert!(update.is_empty());
    }

    #[test]
    fn test_changed_leaf_bumps_leaf_and_ancestors() {
        let original = sample();
        let mut updated = original.clone();
        updated
            .channel_group
            .group_at_mut(&["Application", "Org1"])
            .unwrap()
            .insert_value("MSP", value(b"org1-rotated"));

        let update = compute_config_update(&original, &updated).unwrap();
        let ws = &update.write_set;

        assert_eq!(ws.version, 1);
        let app = ws.group("Application").unwrap();
        assert_eq!(app.version, 1);
        let org1 = app.group("Org1").unwrap();
        assert_eq!(org1.version, 1);
        assert_eq!(org1.value("MSP").unwrap().version, 1);
        assert_eq!(org1.value("MSP").unwrap().value, b"org1-rotated".to_vec());
        assert!(org1.policies.is_empty());
        assert!(app.values.is_empty());
        assert!(ws.values.is_empty());

        let rs = &update.read_set;
        assert_eq!(rs.value("Consortium").unwrap().version, 0);
        assert!(rs.group_at(&["Application"]).unwrap().value("ACLs").is_some());
        let org1_pin = rs.group_at(&["Application", "Org1"]).unwrap();
        assert!(org1_pin.value("MSP").is_none());
        assert!(org1_pin.policy("Admins").is_some());
    }

    #[test]
    fn test_added_leaf_is_version_zero() {
        let original = sample();
        let mut updated = original.clone();
        updated
            .channel_group
            .insert_value("Capabilities", value(b"V2_0"));

        let update = compute_config_update(&original, &updated).unwrap();
        assert_eq!(update.write_set.value("Capabilities").unwrap().version, 0);
        assert_eq!(update.write_set.version, 1);
        assert!(update.read_set.value("Capabilities").is_none());
    }

    #[test]
    fn test_removed_leaf_is_absent_and_parent_bumped() {
        let original = sample();
        let mut updated = original.clone();
        updated
            .channel_group
            .group_mut("Application")
            .unwrap()
            .remove_value("ACLs");

        let update = compute_config_update(&original, &updated).unwrap();
        let app_write = update.write_set.group("Application").unwrap();
        let app_read = update.read_set.group("Application").unwrap();

        assert_eq!(app_write.version, 1);
        assert!(app_write.value("ACLs").is_none());
        assert!(app_read.value("ACLs").is_none());
        assert!(app_write.group("Org1").is_none());
        assert!(app_read.group("Org1").is_some());
    }

    #[test]
    fn test_added_group_resets_versions() {
        let original = sample();
        let mut updated = original.clone();
        let mut org2 = ConfigGroup::with_mod_policy("Admins");
        org2.version = 5;
        let mut msp = value(b"org2");
        msp.version = 3;
        org2.insert_value("MSP", msp);
        updated
            .channel_group
            .group_mut("Application")
            .unwrap()
            .insert_group("Org2", org2);

        let update = compute_config_update(&original, &updated).unwrap();
        let org2 = update
            .write_set
            .group_at(&["Application", "Org2"])
            .unwrap();
        assert_eq!(org2.version, 0);
        assert_eq!(org2.value("MSP").unwrap().version, 0);
        assert!(update.read_set.group_at(&["Application", "Org2"]).is_none());
    }

    #[test]
    fn test_mod_policy_change_marks_group_changed() {
        let original = sample();
        let mut updated = original.clone();
        updated.channel_group.group_mut("Application").unwrap().mod_policy = "Writers".to_string();

        let update = compute_config_update(&original, &updated).unwrap();
        let app = update.write_set.group("Application").unwrap();
        assert_eq!(app.version, 1);
        assert_eq!(app.mod_policy, "Writers");
        assert!(app.is_empty());
        assert_eq!(update.read_set.group("Application").unwrap().mod_policy, "Admins");
    }

    #[test]
    fn test_target_versions_are_ignored() {
        let mut original = sample();
        let app = original.channel_group.group_mut("Application").unwrap();
        app.version = 4;
        app.values.get_mut("ACLs").unwrap().version = 3;

        let mut updated = sample();
        updated
            .channel_group
            .group_mut("Application")
            .unwrap()
            .insert_value("ACLs", value(b"acls-v2"));

        let update = compute_config_update(&original, &updated).unwrap();
        let app_write = update.write_set.group("Application").unwrap();
        assert_eq!(app_write.version, 5);
        assert_eq!(app_write.value("ACLs").unwrap().version, 4);
        assert_eq!(update.read_set.group("Application").unwrap().version, 4);
    }

    #[test]
    fn test_readded_group_with_same_content_is_read_at_base_version() {
        let mut original = sample();
        original
            .channel_group
            .group_at_mut(&["Application", "Org1"])
            .unwrap()
            .version = 2;

        let mut updated = original.clone();
        let app = updated.channel_group.group_mut("Application").unwrap();
        let org1 = app.groups.remove("Org1").unwrap();
        app.insert_group("Org1", fresh(&org1));

        let update = compute_config_update(&original, &updated).unwrap();
        assert!(update.is_empty());
        let org1_read = update.read_set.group_at(&["Application", "Org1"]).unwrap();
        assert_eq!(org1_read.version, 2);
    }

    #[test]
    fn test_mod_policy_only_leaf_change_is_written() {
        let mut original = sample();
        original
            .channel_group
            .group_mut("Application")
            .unwrap()
            .values
            .get_mut("ACLs")
            .unwrap()
            .version = 1;

        let mut updated = original.clone();
        updated
            .channel_group
            .group_mut("Application")
            .unwrap()
            .values
            .get_mut("ACLs")
            .unwrap()
            .mod_policy = "Writers".to_string();

        let update = compute_config_update(&original, &updated).unwrap();
        let acls = update.write_set.group("Application").unwrap().value("ACLs").unwrap();
        assert_eq!(acls.version, 2);
        assert_eq!(acls.mod_policy, "Writers");
        assert!(update.read_set.group("Application").unwrap().value("ACLs").is_none());
    }
}
