//! Policy rule types and parsers.
//!
//! A policy leaf stores a type tag and a rule string. ImplicitMeta rules
//! are `<QUANTIFIER> <SubPolicy>`; Signature rules use the gate DSL
//! (`OR('Org1MSP.member', AND(...))`, `OutOf(2, ...)`). Both are parsed
//! once when a policy enters a tree, so a finished tree never holds a rule
//! the policy evaluator could not read.

pub mod implicit_meta;
pub mod signature;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

pub use implicit_meta::{implicit_meta_from_string, ImplicitMetaPolicy, ImplicitMetaRule};
pub use signature::{signature_policy_from_string, MspPrincipal, MspRole, SignaturePolicy};

/// Policy type tag carried by every policy leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    Signature,
    ImplicitMeta,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Signature => "Signature",
            PolicyType::ImplicitMeta => "ImplicitMeta",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Signature" | "SIGNATURE" => Ok(PolicyType::Signature),
            "ImplicitMeta" | "IMPLICIT_META" => Ok(PolicyType::ImplicitMeta),
            other => Err(ConfigError::UnknownPolicyType {
                policy_type: other.to_string(),
            }),
        }
    }
}

/// Check that `rule` parses as a rule of `policy_type`
///
/// # Errors
///
/// Returns the parser's `ConfigError`.
pub fn validate_rule(policy_type: PolicyType, rule: &str) -> Result<(), ConfigError> {
    match policy_type {
        PolicyType::ImplicitMeta => implicit_meta_from_string(rule).map(|_| ()),
        PolicyType::Signature => signature_policy_from_string(rule).map(|_| ()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_type_from_str() {
        assert_eq!("ImplicitMeta".parse::<PolicyType>().unwrap(), PolicyType::ImplicitMeta);
        assert_eq!("SIGNATURE".parse::<PolicyType>().unwrap(), PolicyType::Signature);
        assert!(matches!(
            "Threshold".parse::<PolicyType>(),
            Err(ConfigError::UnknownPolicyType { .. })
        ));
    }

    #[test]
    fn test_validate_rule_dispatches_on_type() {
        assert!(validate_rule(PolicyType::ImplicitMeta, "ANY Readers").is_ok());
        assert!(validate_rule(PolicyType::Signature, "ANY Readers").is_err());
        assert!(validate_rule(PolicyType::Signature, "OR('Org1MSP.admin')").is_ok());
    }
}
