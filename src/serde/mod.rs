//! Serialization helpers.

pub mod key_map;
