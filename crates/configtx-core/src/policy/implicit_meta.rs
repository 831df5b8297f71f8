use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;

/// Quantifier over the sub-policies of child groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplicitMetaRule {
    #[serde(rename = "ANY")]
    Any,
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "MAJORITY")]
    Majority,
}

impl ImplicitMetaRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImplicitMetaRule::Any => "ANY",
            ImplicitMetaRule::All => "ALL",
            ImplicitMetaRule::Majority => "MAJORITY",
        }
    }
}

/// Parsed ImplicitMeta rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicitMetaPolicy {
    pub rule: ImplicitMetaRule,
    pub sub_policy: String,
}

impl ImplicitMetaPolicy {
    pub fn new(rule: ImplicitMetaRule, sub_policy: impl Into<String>) -> Self {
        Self {
            rule,
            sub_policy: sub_policy.into(),
        }
    }
}

/// Renders as the rule string it was parsed from
impl fmt::Display for ImplicitMetaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rule.as_str(), self.sub_policy)
    }
}

/// Parse an ImplicitMeta rule such as `MAJORITY Endorsement`.
///
/// The input is split on single spaces and must yield exactly two tokens.
///
/// # Errors
///
/// - `ImplicitMetaTokenCount` for any other token count
/// - `UnknownImplicitMetaRule` if the quantifier is not ANY, ALL or MAJORITY
pub fn implicit_meta_from_string(input: &str) -> Result<ImplicitMetaPolicy, ConfigError> {
    let args: Vec<&str> = input.split(' ').collect();
    if args.len() != 2 {
        return Err(ConfigError::ImplicitMetaTokenCount { count: args.len() });
    }

    let rule = match args[0] {
        "ANY" => ImplicitMetaRule::Any,
        "ALL" => ImplicitMetaRule::All,
        "MAJORITY" => ImplicitMetaRule::Majority,
        other => {
            return Err(ConfigError::UnknownImplicitMetaRule {
                rule: other.to_string(),
            })
        }
    };

    Ok(ImplicitMetaPolicy::new(rule, args[1]))
}
