use serde::{Deserialize, Serialize};

use crate::codec;
use crate::errors::Result;

/// Framed transaction: marshaled [`Payload`] plus an optional signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(with = "codec::base64_bytes")]
    pub payload: Vec<u8>,
    /// Empty until signed externally
    #[serde(with = "codec::base64_bytes", default)]
    pub signature: Vec<u8>,
}

impl Envelope {
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Decode the framed payload
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the payload bytes are not a `Payload`.
    pub fn open(&self) -> Result<Payload> {
        codec::unmarshal("Payload", &self.payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Payload {
    pub header: Header,
    #[serde(with = "codec::base64_bytes")]
    pub data: Vec<u8>,
}

impl Payload {
    /// # Errors
    ///
    /// Returns `Serialization` on decode failure.
    pub fn channel_header(&self) -> Result<ChannelHeader> {
        codec::unmarshal("ChannelHeader", &self.header.channel_header)
    }

    /// # Errors
    ///
    /// Returns `Serialization` on decode failure.
    pub fn signature_header(&self) -> Result<SignatureHeader> {
        codec::unmarshal("SignatureHeader", &self.header.signature_header)
    }
}

/// Marshaled channel and signature headers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(with = "codec::base64_bytes")]
    pub channel_header: Vec<u8>,
    #[serde(with = "codec::base64_bytes")]
    pub signature_header: Vec<u8>,
}

/// Transaction type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderType {
    Message,
    Config,
    ConfigUpdate,
    EndorserTransaction,
    OrdererTransaction,
    DeliverSeekInfo,
    ChaincodePackage,
}

impl HeaderType {
    /// Numeric wire tag
    pub fn as_i32(&self) -> i32 {
        match self {
            HeaderType::Message => 0,
            HeaderType::Config => 1,
            HeaderType::ConfigUpdate => 2,
            HeaderType::EndorserTransaction => 3,
            HeaderType::OrdererTransaction => 4,
            HeaderType::DeliverSeekInfo => 5,
            HeaderType::ChaincodePackage => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHeader {
    #[serde(rename = "type")]
    pub header_type: HeaderType,
    pub version: i32,
    pub timestamp: Timestamp,
    pub channel_id: String,
    pub tx_id: String,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignatureHeader {
    /// Serialized identity; empty for unsigned construction
    #[serde(with = "codec::base64_bytes", default)]
    pub creator: Vec<u8>,
    #[serde(with = "codec::base64_bytes")]
    pub nonce: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_type_tags() {
        assert_eq!(HeaderType::Config.as_i32(), 1);
        assert_eq!(HeaderType::ConfigUpdate.as_i32(), 2);
        assert_eq!(
            serde_json::to_string(&HeaderType::ConfigUpdate).unwrap(),
            "\"CONFIG_UPDATE\""
        );
    }

    #[test]
    fn test_open_rejects_garbage_payload() {
        let envelope = Envelope {
            payload: b"not json".to_vec(),
            signature: vec![],
        };
        let err = envelope.open().unwrap_err();
        assert_eq!(err.key(), Some("Payload"));
        assert!(!envelope.is_signed());
    }
}
