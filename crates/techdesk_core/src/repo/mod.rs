//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract and its SQLite/memory backends.
//! - Translate whole record collections to and from stored JSON strings.
//!
//! # Invariants
//! - Only the store writes collections; other callers read through it.
//! - Storage read problems surface as seed fallbacks, never as errors.

pub mod collection_repo;
pub mod kv_repo;
