//! Transaction Framer: wraps payloads in unsigned envelopes.

mod config_update;
mod envelope;
mod framer;

pub use config_update::{
    new_config_update_envelope, new_create_channel_tx, new_create_channel_tx_with,
};
pub use envelope::{ChannelHeader, Envelope, Header, HeaderType, Payload, SignatureHeader, Timestamp};
pub use framer::{
    compute_tx_id, Clock, FixedClock, FixedNonce, Framer, NonceSource, SystemClock,
    SystemNonceSource, NONCE_LEN,
};
