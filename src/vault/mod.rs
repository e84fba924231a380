//! Vault module: on-disk storage.
//!
//! This module provides:
//! - `Entry`, `NewEntry`, `PlainEntry`, and `Order` types (`entry`)
//! - The binary record codec and streaming reader (`record`)
//! - `EntryStore` for CRUD over the data file (`store`)
//! - The advisory `{last_id, count}` state file (`snapshot`)
//! - The password verification file (`verifier`)

pub mod entry;
pub mod record;
pub mod snapshot;
pub mod store;
pub mod verifier;

// Re-export the most commonly used items.
pub use entry::{Entry, NewEntry, Order, PlainEntry};
pub use record::EntryReader;
pub use snapshot::Snapshot;
pub use store::{EntryStore, RewriteStrategy};
pub use verifier::{has_verification, read_verification, write_verification};
