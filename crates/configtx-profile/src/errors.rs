//! Error handling for configtx-profile
//!
//! Wraps configtx-core ExError with profile-specific helpers

use configtx_core::errors::{ConfigError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a profile validation error
pub fn profile_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("profile_parse")
        .with_message(reason.to_string())
}

/// Attach the profile location of a failed field check
pub fn at_field(err: ConfigError, location: &str) -> ExError {
    ExError::from(err)
        .with_op("profile_parse")
        .with_path(location.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
