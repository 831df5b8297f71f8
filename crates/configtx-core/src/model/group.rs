use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::codec;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::policy::PolicyType;

/// A node of the configuration tree.
///
/// Child maps are keyed by name and ordered, so iteration and encoding are
/// deterministic. Nothing here bumps versions: insertion and removal leave
/// every `version` as the caller set it, and version assignment is the
/// diff engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigGroup {
    pub version: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<String, ConfigGroup>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, ConfigValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub policies: BTreeMap<String, ConfigPolicy>,
    #[serde(default)]
    pub mod_policy: String,
}

/// A typed leaf; the payload type is determined by the key it sits under.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigValue {
    pub version: u64,
    #[serde(with = "codec::base64_bytes", default)]
    pub value: Vec<u8>,
    #[serde(default)]
    pub mod_policy: String,
}

/// A policy leaf: a typed rule string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPolicy {
    pub version: u64,
    pub policy_type: PolicyType,
    pub rule: String,
    #[serde(default)]
    pub mod_policy: String,
}

impl ConfigValue {
    /// Create a version 0 value
    pub fn new(value: Vec<u8>, mod_policy: impl Into<String>) -> Self {
        Self {
            version: 0,
            value,
            mod_policy: mod_policy.into(),
        }
    }

    /// Decode the payload as the type stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `Serialization` with the key attached on decode failure.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        codec::unmarshal(key, &self.value)
    }

    /// Payload equality; version and mod policy are ignored
    pub fn content_eq(&self, other: &ConfigValue) -> bool {
        self.value == other.value
    }
}

impl ConfigPolicy {
    /// Create a version 0 policy
    pub fn new(policy_type: PolicyType, rule: impl Into<String>, mod_policy: impl Into<String>) -> Self {
        Self {
            version: 0,
            policy_type,
            rule: rule.into(),
            mod_policy: mod_policy.into(),
        }
    }

    /// Rule equality; version and mod policy are ignored
    pub fn content_eq(&self, other: &ConfigPolicy) -> bool {
        self.policy_type == other.policy_type && self.rule == other.rule
    }
}

impl ConfigGroup {
    /// Create an empty version 0 group with no mod policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty version 0 group with the given mod policy
    pub fn with_mod_policy(mod_policy: impl Into<String>) -> Self {
        Self {
            mod_policy: mod_policy.into(),
            ..Self::default()
        }
    }

    pub fn group(&self, name: &str) -> Option<&ConfigGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut ConfigGroup> {
        self.groups.get_mut(name)
    }

    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn policy(&self, name: &str) -> Option<&ConfigPolicy> {
        self.policies.get(name)
    }

    /// Insert or replace a child group, returning the previous one
    pub fn insert_group(&mut self, name: impl Into<String>, group: ConfigGroup) -> Option<ConfigGroup> {
        self.groups.insert(name.into(), group)
    }

    pub fn remove_group(&mut self, name: &str) -> Option<ConfigGroup> {
        self.groups.remove(name)
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert_value(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.values.insert(key.into(), value)
    }

    pub fn remove_value(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    /// Insert or replace a policy, returning the previous one
    pub fn insert_policy(&mut self, name: impl Into<String>, policy: ConfigPolicy) -> Option<ConfigPolicy> {
        self.policies.insert(name.into(), policy)
    }

    pub fn remove_policy(&mut self, name: &str) -> Option<ConfigPolicy> {
        self.policies.remove(name)
    }

    /// Walk down a path of child group names
    pub fn group_at(&self, path: &[&str]) -> Option<&ConfigGroup> {
        path.iter().try_fold(self, |group, name| group.groups.get(*name))
    }

    /// Mutable walk down a path of child group names
    pub fn group_at_mut(&mut self, path: &[&str]) -> Option<&mut ConfigGroup> {
        path.iter()
            .try_fold(self, |group, name| group.groups.get_mut(*name))
    }

    /// True if the group has no values, policies or sub-groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.values.is_empty() && self.policies.is_empty()
    }

    /// Number of values, policies and groups at or below this node
    /// (the node itself not included)
    pub fn entry_count(&self) -> usize {
        self.values.len()
            + self.policies.len()
            + self.groups.len()
            + self.groups.values().map(ConfigGroup::entry_count).sum::<usize>()
    }

    /// Recursive structural equality over payloads and rules only.
    ///
    /// Versions and mod policies are ignored; key sets must match at every
    /// level.
    pub fn content_eq(&self, other: &ConfigGroup) -> bool {
        map_eq(&self.values, &other.values, ConfigValue::content_eq)
            && map_eq(&self.policies, &other.policies, ConfigPolicy::content_eq)
            && map_eq(&self.groups, &other.groups, ConfigGroup::content_eq)
    }

    /// Check that every node and leaf at or below this group names a mod
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming the first offending path.
    pub fn validate_mod_policies(&self, path: &str) -> Result<()> {
        if self.mod_policy.is_empty() {
            return Err(missing_mod_policy(path, None));
        }
        for (key, value) in &self.values {
            if value.mod_policy.is_empty() {
                return Err(missing_mod_policy(path, Some(key)));
            }
        }
        for (name, policy) in &self.policies {
            if policy.mod_policy.is_empty() {
                return Err(missing_mod_policy(path, Some(name)));
            }
        }
        for (name, group) in &self.groups {
            group.validate_mod_policies(&format!("{}/{}", path, name))?;
        }
        Ok(())
    }
}

fn map_eq<T>(a: &BTreeMap<String, T>, b: &BTreeMap<String, T>, eq: fn(&T, &T) -> bool) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && eq(va, vb))
}

fn missing_mod_policy(path: &str, key: Option<&str>) -> ExError {
    let err = ExError::new(ExErrorKind::InvariantViolation)
        .with_op("validate_mod_policies")
        .with_path(path)
        .with_message("element has no mod policy");
    match key {
        Some(key) => err.with_key(key),
        None => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(bytes: &[u8]) -> ConfigValue {
        ConfigValue::new(bytes.to_vec(), "Admins")
    }

    #[test]
    fn test_insert_does_not_touch_versions() {
        let mut group = ConfigGroup::with_mod_policy("Admins");
        group.version = 4;
        let mut value = leaf(b"a");
        value.version = 7;

        group.insert_value("A", value);
        group.insert_group("Child", ConfigGroup::with_mod_policy("Admins"));

        assert_eq!(group.version, 4);
        assert_eq!(group.value("A").unwrap().version, 7);
        assert_eq!(group.group("Child").unwrap().version, 0);
    }

    #[test]
    fn test_content_eq_ignores_version_and_mod_policy() {
        let mut a = ConfigGroup::with_mod_policy("Admins");
        a.insert_value("A", leaf(b"a"));
        let mut b = a.clone();
        b.version = 3;
        b.mod_policy = "Writers".to_string();
        b.values.get_mut("A").unwrap().version = 9;

        assert!(a.content_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_content_eq_detects_key_set_difference() {
        let mut a = ConfigGroup::new();
        a.insert_value("A", leaf(b"a"));
        let mut b = a.clone();
        b.insert_value("B", leaf(b"b"));

        assert!(!a.content_eq(&b));
    }

    #[test]
    fn test_group_at_walks_path() {
        let mut root = ConfigGroup::new();
        let mut app = ConfigGroup::new();
        app.insert_group("Org1", ConfigGroup::with_mod_policy("Admins"));
        root.insert_group("Application", app);

        assert!(root.group_at(&["Application", "Org1"]).is_some());
        assert!(root.group_at(&["Application", "Org2"]).is_none());
        assert!(root.group_at(&[]).is_some());
    }

    #[test]
    fn test_validate_mod_policies_reports_path() {
        let mut root = ConfigGroup::with_mod_policy("Admins");
        let mut app = ConfigGroup::with_mod_policy("Admins");
        app.insert_value("ACLs", ConfigValue::new(vec![], ""));
        root.insert_group("Application", app);

        let err = root.validate_mod_policies("/Channel").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvariantViolation);
        assert_eq!(err.path(), Some("/Channel/Application"));
        assert_eq!(err.key(), Some("ACLs"));
    }

    #[test]
    fn test_entry_count_is_recursive() {
        let mut root = ConfigGroup::new();
        let mut child = ConfigGroup::new();
        child.insert_value("A", leaf(b"a"));
        child.insert_value("B", leaf(b"b"));
        root.insert_group("Child", child);
        root.insert_value("C", leaf(b"c"));

        assert_eq!(root.entry_count(), 4);
    }
}
