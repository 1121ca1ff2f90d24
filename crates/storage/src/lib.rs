//! Storage abstraction and implementations for Glance.
//!
//! This crate provides the trait-based contracts the complication providers
//! read through: a preference store and a daily aggregation store, with a
//! JSON file, SQLite and in-memory implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod keys;
pub mod json_storage;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite_storage;

pub use trait_::{PreferenceStore, DailyStore, StoreError, Result};
pub use json_storage::JsonPreferenceStore;
pub use memory::{MemoryPreferenceStore, MemoryDailyStore};
#[cfg(feature = "sqlite")]
pub use sqlite_storage::SqliteDailyStore;
