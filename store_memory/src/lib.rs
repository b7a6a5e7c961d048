//! In-memory storage backend for the Pixel Pulse ledger.
//!
//! Implements all storage traits from `pulse-store` over ordered maps held
//! behind a single lock. One lock for every table is what makes
//! [`LedgerStore::commit`](pulse_store::LedgerStore::commit) atomic.

pub mod environment;
pub mod error;
mod stores;

pub use environment::MemoryEnvironment;
pub use error::MemoryStoreError;
