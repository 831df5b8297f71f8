//! Envelope framing.
//!
//! A [`Framer`] owns the two side-effecting inputs of framing, the clock
//! and the nonce source, so callers that need reproducible output can pin
//! both.

use ring::rand::{SecureRandom, SystemRandom};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::codec;
use crate::core_types::keys::{EPOCH, MSG_VERSION};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::txn::envelope::{
    ChannelHeader, Envelope, Header, HeaderType, Payload, SignatureHeader, Timestamp,
};

/// Nonce length in bytes
pub const NONCE_LEN: usize = 24;

/// Wall clock with second resolution
pub trait Clock {
    fn now_secs(&self) -> i64;
}

/// Entropy for transaction nonces
pub trait NonceSource {
    /// # Errors
    ///
    /// Returns `Internal` if the entropy source fails.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;

    /// # Errors
    ///
    /// Returns `Internal` if the entropy source fails.
    fn nonce(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; NONCE_LEN];
        self.fill_bytes(&mut buf)?;
        Ok(buf)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Operating system entropy via `ring`
pub struct SystemNonceSource {
    rng: SystemRandom,
}

impl SystemNonceSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemNonceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceSource for SystemNonceSource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        self.rng.fill(dest).map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("nonce")
                .with_message("system entropy source failed")
        })
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// Nonce source that repeats one byte pattern
#[derive(Debug, Clone)]
pub struct FixedNonce(pub Vec<u8>);

impl NonceSource for FixedNonce {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        if self.0.is_empty() {
            dest.fill(0);
            return Ok(());
        }
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = self.0[i % self.0.len()];
        }
        Ok(())
    }
}

/// Hex SHA-256 over `nonce ‖ creator`
pub fn compute_tx_id(nonce: &[u8], creator: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nonce);
    hasher.update(creator);
    hex::encode(hasher.finalize())
}

pub struct Framer {
    clock: Box<dyn Clock + Send + Sync>,
    nonces: Box<dyn NonceSource + Send + Sync>,
}

impl Default for Framer {
    fn default() -> Self {
        Self::system()
    }
}

impl Framer {
    /// Framer backed by the system clock and system entropy
    pub fn system() -> Self {
        Self::with_sources(SystemClock, SystemNonceSource::new())
    }

    pub fn with_sources<C, N>(clock: C, nonces: N) -> Self
    where
        C: Clock + Send + Sync + 'static,
        N: NonceSource + Send + Sync + 'static,
    {
        Self {
            clock: Box::new(clock),
            nonces: Box::new(nonces),
        }
    }

    /// Frame `data` as an unsigned envelope of type `header_type`.
    ///
    /// `data_key` names the payload in serialization errors.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if no nonce can be drawn and `Serialization` if
    /// any framed part fails to marshal.
    pub fn frame<T: Serialize + ?Sized>(
        &self,
        header_type: HeaderType,
        channel_id: &str,
        creator: &[u8],
        data_key: &str,
        data: &T,
    ) -> Result<Envelope> {
        let nonce = self.nonces.nonce()?;
        let channel_header = ChannelHeader {
            header_type,
            version: MSG_VERSION,
            timestamp: Timestamp {
                seconds: self.clock.now_secs(),
                nanos: 0,
            },
            channel_id: channel_id.to_string(),
            tx_id: compute_tx_id(&nonce, creator),
            epoch: EPOCH,
        };
        let signature_header = SignatureHeader {
            creator: creator.to_vec(),
            nonce,
        };

        let payload = Payload {
            header: Header {
                channel_header: codec::marshal("ChannelHeader", &channel_header)?,
                signature_header: codec::marshal("SignatureHeader", &signature_header)?,
            },
            data: codec::marshal(data_key, data)?,
        };

        Ok(Envelope {
            payload: codec::marshal("Payload", &payload)?,
            signature: Vec::new(),
        })
    }
}
