//! Field and event names shared by the operation logging macros and the
//! test capture layer.
//!
//! `tracing` needs field names as identifiers at the call site, so the macros
//! spell them out; these constants are what readers of the events match on.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

/// Channel an operation ran against, when it has one
pub const FIELD_CHANNEL_ID: &str = "channel_id";

// Diff sizes, counted in tree entries
pub const FIELD_READ_SET_LEN: &str = "read_set_len";
pub const FIELD_WRITE_SET_LEN: &str = "write_set_len";

pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
