use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and responses surfaced by outer collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Preconditions
    InvalidInput,
    MissingField,
    InvalidChannelId,
    InvalidAddress,
    InvalidPolicy,
    AlreadyExists,

    // Codec
    Serialization,

    // Structural lookup
    NotFound,

    // Programming-invariant violations
    InvariantViolation,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidChannelId => "ERR_INVALID_CHANNEL_ID",
            ExErrorKind::InvalidAddress => "ERR_INVALID_ADDRESS",
            ExErrorKind::InvalidPolicy => "ERR_INVALID_POLICY",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind tag for pattern matching plus the configuration key and
/// group path that were being processed, so callers never have to parse
/// messages to find out what went wrong or where.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add configuration key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add group path context (e.g. `/Channel/Application/Org1`)
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Wrap this error as the source of a new error of the same kind
    ///
    /// The outer error takes the given operation and message; key and path
    /// context are carried over so the innermost detail stays visible.
    pub fn context(self, op: impl Into<String>, message: impl Into<String>) -> Self {
        let mut outer = ExError::new(self.kind).with_op(op).with_message(message);
        outer.key = self.key.clone();
        outer.path = self.path.clone();
        outer.with_source(self)
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the configuration key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the group path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// True for violations of internal invariants that indicate a caller bug
    /// rather than bad input
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self.kind,
            ExErrorKind::InvariantViolation | ExErrorKind::Internal
        )
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Precondition failures raised while validating descriptors and inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Channel identifier is empty
    #[error("channel ID is required")]
    EmptyChannelId,

    /// Standard channel root requested without a consortium name
    #[error("consortium is not defined in channel config")]
    MissingConsortium,

    /// Network genesis root requested without orderer endpoints
    #[error("orderer endpoints is not defined in channel config")]
    MissingOrdererAddresses,

    /// Network genesis root requested without capabilities
    #[error("capabilities is not defined in channel config")]
    MissingCapabilities,

    /// Section required by the requested root is absent
    #[error("{section} section is not defined in channel config")]
    MissingSection { section: String },

    /// A group that must carry a specific policy does not
    #[error("no {policy} policy defined")]
    MissingPolicy { policy: String },

    /// Address is not `host:port`
    #[error("unable to parse host and port from {address}")]
    InvalidAddress { address: String },

    /// Port is out of range or not numeric
    #[error("invalid port '{port}' in address {address}")]
    InvalidPort { address: String, port: String },

    /// ImplicitMeta rule has the wrong number of tokens
    #[error("expected two space separated tokens, but got {count}")]
    ImplicitMetaTokenCount { count: usize },

    /// ImplicitMeta quantifier is not ANY, ALL or MAJORITY
    #[error("unknown rule type '{rule}', expected ALL, ANY, or MAJORITY")]
    UnknownImplicitMetaRule { rule: String },

    /// Signature rule text could not be parsed
    #[error("invalid signature policy rule '{rule}': {reason}")]
    InvalidSignatureRule { rule: String, reason: String },

    /// Policy type is neither Signature nor ImplicitMeta
    #[error("unknown policy type '{policy_type}'")]
    UnknownPolicyType { policy_type: String },

    /// Orderer type is not one of solo, kafka, etcdraft
    #[error("unknown orderer type '{orderer_type}'")]
    UnknownOrdererType { orderer_type: String },

    /// Duration text could not be parsed
    #[error("invalid duration '{input}'")]
    InvalidDuration { input: String },

    /// Organization name appears twice in one section
    #[error("duplicate organization '{name}' in {section}")]
    DuplicateOrganization { name: String, section: String },

    /// Organization (or other named entry) already present in the tree
    #[error("{what} '{name}' already exists")]
    AlreadyExists { what: String, name: String },

    /// Organization or consortium lookup failed
    #[error("{what} '{name}' does not exist")]
    NotFound { what: String, name: String },
}

/// Conversion from ConfigError to ExError
impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        match err {
            ConfigError::EmptyChannelId => {
                ExError::new(ExErrorKind::InvalidChannelId).with_message(message)
            }
            ConfigError::MissingConsortium => ExError::new(ExErrorKind::MissingField)
                .with_key(configtx_core_types::keys::CONSORTIUM_KEY)
                .with_message(message),
            ConfigError::MissingOrdererAddresses => ExError::new(ExErrorKind::MissingField)
                .with_key(configtx_core_types::keys::ORDERER_ADDRESSES_KEY)
                .with_message(message),
            ConfigError::MissingCapabilities => ExError::new(ExErrorKind::MissingField)
                .with_key(configtx_core_types::keys::CAPABILITIES_KEY)
                .with_message(message),
            ConfigError::MissingSection { section } => ExError::new(ExErrorKind::MissingField)
                .with_key(section)
                .with_message(message),
            ConfigError::MissingPolicy { policy } => ExError::new(ExErrorKind::MissingField)
                .with_key(policy)
                .with_message(message),
            ConfigError::InvalidAddress { .. } | ConfigError::InvalidPort { .. } => {
                ExError::new(ExErrorKind::InvalidAddress).with_message(message)
            }
            ConfigError::ImplicitMetaTokenCount { .. }
            | ConfigError::UnknownImplicitMetaRule { .. }
            | ConfigError::InvalidSignatureRule { .. }
            | ConfigError::UnknownPolicyType { .. } => {
                ExError::new(ExErrorKind::InvalidPolicy).with_message(message)
            }
            ConfigError::UnknownOrdererType { .. }
            | ConfigError::InvalidDuration { .. }
            | ConfigError::DuplicateOrganization { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            ConfigError::AlreadyExists { name, .. } => ExError::new(ExErrorKind::AlreadyExists)
                .with_key(name)
                .with_message(message),
            ConfigError::NotFound { name, .. } => ExError::new(ExErrorKind::NotFound)
                .with_key(name)
                .with_message(message),
        }
    }
}

/// Conversion from serde_json::Error, for encode paths that have no key context
impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::InvalidChannelId, "ERR_INVALID_CHANNEL_ID"),
            (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
            (ExErrorKind::InvalidPolicy, "ERR_INVALID_POLICY"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_context_keeps_key_and_source() {
        let inner = ExError::new(ExErrorKind::Serialization)
            .with_key("MSP")
            .with_message("bad bytes");
        let outer = inner.context("read_msp", "reading organization");

        assert_eq!(outer.kind(), ExErrorKind::Serialization);
        assert_eq!(outer.key(), Some("MSP"));
        assert_eq!(outer.source_error().map(|e| e.message()), Some("bad bytes"));
        assert!(outer.to_string().contains("bad bytes"));
    }

    #[test]
    fn test_programming_error_classification() {
        assert!(ExError::new(ExErrorKind::InvariantViolation).is_programming_error());
        assert!(!ExError::new(ExErrorKind::MissingField).is_programming_error());
    }
}
