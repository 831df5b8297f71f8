//! Two-tree diff producing a [`ConfigUpdate`](crate::model::ConfigUpdate).
//!
//! Per position, every key of the base and target trees lands as follows:
//!
//! | key state | read set | write set |
//! |---|---|---|
//! | leaf unchanged | copy at current version | - |
//! | leaf changed | - | new content at version + 1 |
//! | leaf added | - | content at version 0 |
//! | leaf or group removed | - | - (parent is changed) |
//! | group unchanged | full subtree at current versions | - |
//! | group changed | version pin holding its unchanged members | changed members, group at version + 1 |
//! | group added | - | whole subtree at version 0 |
//!
//! A group is changed when its set of member names differs, when anything
//! below it is written, or when its own mod policy differs. A changed group
//! appears in the read set only as a pin: its version and base mod policy
//! plus the members that did not change, so untouched siblings at every
//! depth stay conditioned on their current versions.
//!
//! Versions carried by the target tree are never consulted.

mod engine;

pub use engine::compute_config_update;
