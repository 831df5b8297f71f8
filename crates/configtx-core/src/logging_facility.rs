//! Operation logging
//!
//! Every instrumented operation brackets its work with a `start` event and
//! either an `end` or an `end_error` event carrying `duration_ms`, so a
//! failed update or genesis build can be traced to its op and error code.
//!
//! Binaries call [`init`] once; tests call [`init_test_capture`] and filter
//! the shared buffer by op or channel id.
//!
//! ```rust
//! use configtx_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
