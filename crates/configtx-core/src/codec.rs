//! Payload codec.
//!
//! Every typed payload in a configuration tree, and every framed message,
//! is encoded as canonical JSON. All maps in encoded types are `BTreeMap`s
//! and struct fields serialize in declaration order, so the same logical
//! content always marshals to the same bytes and byte equality is a sound
//! content comparison.
//!
//! Errors carry the key of the value being processed.

use crate::errors::{ExError, ExErrorKind, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marshal a typed payload stored under `key`.
///
/// # Errors
///
/// Returns `Serialization` with the key attached if encoding fails.
pub fn marshal<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("marshal")
            .with_key(key)
            .with_message(format!("marshaling standard config value '{}': {}", key, e))
    })
}

/// Unmarshal the payload stored under `key` into its expected type.
///
/// # Errors
///
/// Returns `Serialization` with the key attached if the bytes do not
/// decode as `T`.
pub fn unmarshal<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("unmarshal")
            .with_key(key)
            .with_message(format!("unmarshaling {}: {}", key, e))
    })
}

/// Serde adapter encoding `Vec<u8>` fields as standard base64 text.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Vec<Vec<u8>>`, each entry as base64 text.
pub mod base64_bytes_seq {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&STANDARD.encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let texts = Vec::<String>::deserialize(deserializer)?;
        texts
            .iter()
            .map(|t| STANDARD.decode(t.as_bytes()).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Blob {
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
        tags: BTreeMap<String, u32>,
    }

    #[test]
    fn test_marshal_is_insertion_order_independent() {
        let mut a = BTreeMap::new();
        a.insert("zeta".to_string(), 1);
        a.insert("alpha".to_string(), 2);
        let mut b = BTreeMap::new();
        b.insert("alpha".to_string(), 2);
        b.insert("zeta".to_string(), 1);

        let left = marshal("Blob", &Blob { data: vec![1, 2], tags: a }).unwrap();
        let right = marshal("Blob", &Blob { data: vec![1, 2], tags: b }).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_bytes_are_base64_text() {
        let bytes = marshal("Blob", &Blob { data: b"hi".to_vec(), tags: BTreeMap::new() }).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"aGk=\""));
    }

    #[test]
    fn test_unmarshal_error_carries_key() {
        let err = unmarshal::<Blob>("MSP", b"not json").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.key(), Some("MSP"));
    }
}
