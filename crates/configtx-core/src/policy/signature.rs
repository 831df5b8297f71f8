//! Signature policy rule DSL.
//!
//! ```text
//! rule      := gate | principal
//! gate      := ("OR" | "AND") "(" rule ("," rule)* ")"
//!            | "OutOf" "(" integer ("," rule)* ")"
//! principal := quoted 'MSPID.role', role in member|admin|client|peer|orderer
//! ```
//!
//! Gate names are case-insensitive. `AND` is `OutOf(n)` over its n rules,
//! `OR` is `OutOf(1)`.

use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::Chars;

use crate::errors::ConfigError;

/// Deepest gate nesting a rule may use
pub const MAX_RULE_DEPTH: usize = 64;

/// Role an identity must hold within its MSP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MspRole {
    Member,
    Admin,
    Client,
    Peer,
    Orderer,
}

impl MspRole {
    fn parse(role: &str) -> Option<Self> {
        match role {
            "member" => Some(MspRole::Member),
            "admin" => Some(MspRole::Admin),
            "client" => Some(MspRole::Client),
            "peer" => Some(MspRole::Peer),
            "orderer" => Some(MspRole::Orderer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MspPrincipal {
    pub msp_id: String,
    pub role: MspRole,
}

/// Parsed signature rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignaturePolicy {
    SignedBy(MspPrincipal),
    NOutOf { n: usize, rules: Vec<SignaturePolicy> },
}

impl SignaturePolicy {
    /// Every principal named anywhere in the rule, in order of appearance
    pub fn principals(&self) -> Vec<&MspPrincipal> {
        match self {
            SignaturePolicy::SignedBy(p) => vec![p],
            SignaturePolicy::NOutOf { rules, .. } => {
                rules.iter().flat_map(SignaturePolicy::principals).collect()
            }
        }
    }
}

/// Parse a signature rule.
///
/// # Errors
///
/// Returns `InvalidSignatureRule` with the offending rule and a reason.
pub fn signature_policy_from_string(rule: &str) -> Result<SignaturePolicy, ConfigError> {
    let mut parser = Parser {
        rule,
        chars: rule.chars().peekable(),
        depth: 0,
    };
    let policy = parser.parse_rule()?;
    parser.skip_ws();
    if let Some(c) = parser.chars.next() {
        return Err(parser.error(format!("unexpected trailing '{}'", c)));
    }
    Ok(policy)
}

struct Parser<'a> {
    rule: &'a str,
    chars: Peekable<Chars<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidSignatureRule {
            rule: self.rule.to_string(),
            reason: reason.into(),
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ConfigError> {
        self.skip_ws();
        match self.chars.next() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of rule", expected))),
        }
    }

    fn parse_rule(&mut self) -> Result<SignaturePolicy, ConfigError> {
        self.skip_ws();
        match self.chars.peek().copied() {
            Some('\'') | Some('"') => self.parse_principal(),
            Some(c) if c.is_ascii_alphabetic() => {
                if self.depth >= MAX_RULE_DEPTH {
                    return Err(self.error("rule nested too deeply"));
                }
                self.depth += 1;
                let gate = self.parse_gate();
                self.depth -= 1;
                gate
            }
            Some(c) => Err(self.error(format!("unexpected '{}'", c))),
            None => Err(self.error("empty rule")),
        }
    }

    fn parse_principal(&mut self) -> Result<SignaturePolicy, ConfigError> {
        let quote = self.chars.next().unwrap_or('\'');
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == quote => break,
                Some(c) => text.push(c),
                None => return Err(self.error("unterminated principal")),
            }
        }

        let (msp_id, role) = text
            .rsplit_once('.')
            .ok_or_else(|| self.error(format!("principal '{}' is not MSPID.role", text)))?;
        if msp_id.is_empty() {
            return Err(self.error(format!("principal '{}' has no MSP ID", text)));
        }
        let role = MspRole::parse(role)
            .ok_or_else(|| self.error(format!("unknown role '{}'", role)))?;

        Ok(SignaturePolicy::SignedBy(MspPrincipal {
            msp_id: msp_id.to_string(),
            role,
        }))
    }

    fn parse_gate(&mut self) -> Result<SignaturePolicy, ConfigError> {
        let mut name = String::new();
        while let Some(c) = self.chars.peek().copied() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        self.expect('(')?;

        let gate = name.to_ascii_lowercase();
        let threshold = if gate == "outof" {
            Some(self.parse_count()?)
        } else if gate == "and" || gate == "or" {
            None
        } else {
            return Err(self.error(format!("unknown gate '{}'", name)));
        };

        let mut rules = Vec::new();
        self.skip_ws();
        if threshold.is_none() || self.chars.peek() == Some(&',') {
            if threshold.is_some() {
                self.chars.next();
            }
            loop {
                rules.push(self.parse_rule()?);
                self.skip_ws();
                match self.chars.peek() {
                    Some(',') => {
                        self.chars.next();
                    }
                    _ => break,
                }
            }
        }
        self.expect(')')?;

        let n = match (gate.as_str(), threshold) {
            ("and", _) => rules.len(),
            ("or", _) => 1,
            (_, Some(n)) => n,
            _ => 0,
        };
        if n > rules.len() {
            return Err(self.error(format!(
                "threshold {} exceeds {} sub-rules",
                n,
                rules.len()
            )));
        }

        Ok(SignaturePolicy::NOutOf { n, rules })
    }

    fn parse_count(&mut self) -> Result<usize, ConfigError> {
        self.skip_ws();
        let mut digits = String::new();
        while let Some(c) = self.chars.peek().copied() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        digits
            .parse()
            .map_err(|_| self.error("OutOf requires an integer threshold"))
    }
}
