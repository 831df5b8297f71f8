//! Core types shared across configtx facilities
//!
//! This crate provides the foundational constants used by the tree builder,
//! the configuration facade and the logging facility:
//!
//! - **Configuration keys**: well-known group, value and policy names
//! - **Schema constants**: Canonical field keys and event names

pub mod keys;
pub mod schema;
