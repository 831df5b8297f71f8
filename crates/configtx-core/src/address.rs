use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;

/// Hostname and port of an endpoint
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl Address {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse `host:port`.
///
/// Exactly one `:` separator is accepted, so bracketed IPv6 literals are
/// not supported.
///
/// # Errors
///
/// - `InvalidAddress` if the input does not split into exactly two parts
///   or the host is empty
/// - `InvalidPort` if the port is not a decimal integer in 0..=65535
pub fn parse_address(address: &str) -> Result<Address, ConfigError> {
    let hostport: Vec<&str> = address.split(':').collect();
    if hostport.len() != 2 || hostport[0].is_empty() {
        return Err(ConfigError::InvalidAddress {
            address: address.to_string(),
        });
    }

    let port = hostport[1]
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort {
            address: address.to_string(),
            port: hostport[1].to_string(),
        })?;

    Ok(Address::new(hostport[0], port))
}
