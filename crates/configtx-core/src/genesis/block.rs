use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::txn::Envelope;

/// Number of metadata slots every block carries
pub const METADATA_SLOTS: usize = 5;

/// Position of each auxiliary blob in [`BlockMetadata::metadata`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMetadataIndex {
    Signatures = 0,
    LastConfig = 1,
    TransactionsFilter = 2,
    Orderer = 3,
    CommitHash = 4,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub data: BlockData,
    pub metadata: BlockMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    #[serde(with = "codec::base64_bytes", default)]
    pub previous_hash: Vec<u8>,
    #[serde(with = "codec::base64_bytes", default)]
    pub data_hash: Vec<u8>,
}

/// Marshaled envelopes, in order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(with = "codec::base64_bytes_seq", default)]
    pub data: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    #[serde(with = "codec::base64_bytes_seq")]
    pub metadata: Vec<Vec<u8>>,
}

impl Default for BlockMetadata {
    fn default() -> Self {
        Self {
            metadata: vec![Vec::new(); METADATA_SLOTS],
        }
    }
}

/// Content of a metadata slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(with = "codec::base64_bytes", default)]
    pub value: Vec<u8>,
    #[serde(default)]
    pub signatures: Vec<MetadataSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataSignature {
    #[serde(with = "codec::base64_bytes")]
    pub signature_header: Vec<u8>,
    #[serde(with = "codec::base64_bytes")]
    pub signature: Vec<u8>,
}

/// Pointer to the block holding the latest configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LastConfig {
    pub index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrdererBlockMetadata {
    pub last_config: LastConfig,
    #[serde(with = "codec::base64_bytes", default)]
    pub consenter_metadata: Vec<u8>,
}

impl Block {
    /// Empty block with every metadata slot present
    pub fn new(number: u64, previous_hash: Vec<u8>) -> Self {
        Self {
            header: BlockHeader {
                number,
                previous_hash,
                data_hash: Vec::new(),
            },
            data: BlockData::default(),
            metadata: BlockMetadata::default(),
        }
    }

    pub fn metadata_slot(&self, index: BlockMetadataIndex) -> Option<&[u8]> {
        self.metadata.metadata.get(index as usize).map(Vec::as_slice)
    }

    /// Decode the envelope at `index` in the data section
    ///
    /// # Errors
    ///
    /// `NotFound` if there is no such entry, `Serialization` if it does not
    /// decode.
    pub fn envelope(&self, index: usize) -> Result<Envelope> {
        let bytes = self.data.data.get(index).ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("block_envelope")
                .with_message(format!("block has no data entry {}", index))
        })?;
        codec::unmarshal("Envelope", bytes)
    }
}

/// SHA-256 over the concatenation of every data entry
pub fn block_data_hash(data: &BlockData) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for entry in &data.data {
        hasher.update(entry);
    }
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_has_all_metadata_slots() {
        let block = Block::new(0, Vec::new());
        assert_eq!(block.metadata.metadata.len(), METADATA_SLOTS);
        assert_eq!(block.metadata_slot(BlockMetadataIndex::CommitHash), Some(&[][..]));
    }

    #[test]
    fn test_data_hash_is_over_concatenation() {
        let data = BlockData {
            data: vec![b"ab".to_vec(), b"c".to_vec()],
        };
        let joined = BlockData {
            data: vec![b"abc".to_vec()],
        };
        assert_eq!(block_data_hash(&data), block_data_hash(&joined));
        assert_eq!(block_data_hash(&data), Sha256::digest(b"abc").to_vec());
    }
}
