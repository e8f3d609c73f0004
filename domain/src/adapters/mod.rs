//! Storage adapters that live inside the domain crate.
//!
//! The in-memory repository is the one storage variant this service ships;
//! alternative backends (relational, document-store) would be separate
//! crates implementing the same `Repository` port.

pub mod memory_repo;
