//! configtx profile - channel descriptors from YAML profiles
//!
//! Provides:
//! - Profile Format v0 schema
//! - YAML parser with validation
//! - Conversion into the tree builder's `Channel` descriptor

pub mod errors;
pub mod format_v0;
pub mod parser;

// Re-export key types
pub use errors::Result;
pub use format_v0::ProfileV0;
pub use parser::{load_channel_file, load_channel_str, parse_profile_file, parse_profile_str};
