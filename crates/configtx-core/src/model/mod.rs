pub mod config;
pub mod group;

pub use config::{Config, ConfigEnvelope, ConfigSignature, ConfigUpdate, ConfigUpdateEnvelope};
pub use group::{ConfigGroup, ConfigPolicy, ConfigValue};
