//! Well-known configuration tree keys
//!
//! Group, value and policy names that give a channel configuration its
//! standard shape. The payload type stored under a value key is fixed by
//! the key: `Consortium` always holds a consortium name, `MSP` always holds
//! an MSP definition, and so on.

// ===== Group keys =====

/// Root group of every channel configuration
pub const CHANNEL_GROUP_KEY: &str = "Channel";
/// Application section, holding peer organizations
pub const APPLICATION_GROUP_KEY: &str = "Application";
/// Ordering section, holding orderer organizations and consensus parameters
pub const ORDERER_GROUP_KEY: &str = "Orderer";
/// Consortiums section of a system channel
pub const CONSORTIUMS_GROUP_KEY: &str = "Consortiums";

// ===== Value keys =====

pub const CONSORTIUM_KEY: &str = "Consortium";
pub const HASHING_ALGORITHM_KEY: &str = "HashingAlgorithm";
pub const BLOCK_DATA_HASHING_STRUCTURE_KEY: &str = "BlockDataHashingStructure";
pub const ORDERER_ADDRESSES_KEY: &str = "OrdererAddresses";
pub const CAPABILITIES_KEY: &str = "Capabilities";
pub const MSP_KEY: &str = "MSP";
pub const ANCHOR_PEERS_KEY: &str = "AnchorPeers";
pub const ACLS_KEY: &str = "ACLs";
pub const CONSENSUS_TYPE_KEY: &str = "ConsensusType";
pub const BATCH_SIZE_KEY: &str = "BatchSize";
pub const BATCH_TIMEOUT_KEY: &str = "BatchTimeout";
pub const CHANNEL_RESTRICTIONS_KEY: &str = "ChannelRestrictions";
pub const KAFKA_BROKERS_KEY: &str = "KafkaBrokers";
pub const ENDPOINTS_KEY: &str = "Endpoints";
pub const CHANNEL_CREATION_POLICY_KEY: &str = "ChannelCreationPolicy";

// ===== Policy keys =====

pub const ADMINS_POLICY_KEY: &str = "Admins";
pub const READERS_POLICY_KEY: &str = "Readers";
pub const WRITERS_POLICY_KEY: &str = "Writers";
pub const ENDORSEMENT_POLICY_KEY: &str = "Endorsement";
pub const LIFECYCLE_ENDORSEMENT_POLICY_KEY: &str = "LifecycleEndorsement";
pub const BLOCK_VALIDATION_POLICY_KEY: &str = "BlockValidation";

/// Fully qualified name of the ordering admins policy
pub const ORDERER_ADMINS_POLICY_NAME: &str = "/Channel/Orderer/Admins";

/// Modification policy applied when a caller does not name one
pub const DEFAULT_MOD_POLICY: &str = ADMINS_POLICY_KEY;

// ===== Well-known value contents =====

/// Hashing algorithm recorded in every root built here
pub const DEFAULT_HASHING_ALGORITHM: &str = "SHA256";
/// Block data is hashed as a single flat concatenation
pub const DEFAULT_BLOCK_DATA_HASHING_WIDTH: u32 = u32::MAX;
/// Signature rule that every signature set satisfies
pub const ACCEPT_ALL_POLICY_RULE: &str = "OutOf(0)";

// ===== Orderer types =====

pub const CONSENSUS_TYPE_SOLO: &str = "solo";
pub const CONSENSUS_TYPE_KAFKA: &str = "kafka";
pub const CONSENSUS_TYPE_ETCDRAFT: &str = "etcdraft";

/// Framing protocol version stamped into channel headers
pub const MSG_VERSION: i32 = 0;
/// Epoch stamped into channel headers
pub const EPOCH: u64 = 0;
