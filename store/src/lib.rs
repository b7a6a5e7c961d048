//! Abstract storage traits for the Pixel Pulse ledger.
//!
//! The ledger state is four independent keyed tables plus two id counters.
//! Every backend implements the read traits below; all writes go through a
//! [`WriteBatch`] handed to [`LedgerStore::commit`], which must apply the
//! whole batch or none of it.

pub mod challenge;
pub mod error;
pub mod leaderboard;
pub mod meta;
pub mod token;
pub mod video;
pub mod write_batch;

pub use challenge::{ChallengeRecord, ChallengeStore};
pub use error::StoreError;
pub use leaderboard::{LeaderboardEntry, LeaderboardStore};
pub use meta::{Counter, MetaStore};
pub use token::TokenStore;
pub use video::{VideoRecord, VideoStore};
pub use write_batch::{WriteBatch, WriteOp};

/// A complete ledger backend: every table plus atomic batch commit.
pub trait LedgerStore: ChallengeStore + VideoStore + LeaderboardStore + TokenStore + MetaStore {
    /// Apply every operation in `batch` as one unit.
    ///
    /// Readers must observe either the state before the batch or the state
    /// after it, never a mix.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
