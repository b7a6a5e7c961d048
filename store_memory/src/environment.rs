//! In-memory environment holding every ledger table.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pulse_store::{
    ChallengeRecord, Counter, LeaderboardEntry, LedgerStore, StoreError, VideoRecord, WriteBatch,
    WriteOp,
};
use pulse_types::{ChallengeId, Principal, TokenId, VideoId};
use tracing::trace;

use crate::MemoryStoreError;

/// The four ledger tables plus the id counters.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) challenges: BTreeMap<ChallengeId, ChallengeRecord>,
    pub(crate) videos: BTreeMap<VideoId, VideoRecord>,
    pub(crate) leaderboard: BTreeMap<Principal, LeaderboardEntry>,
    pub(crate) tokens: BTreeMap<TokenId, Principal>,
    pub(crate) counters: BTreeMap<Counter, u64>,
}

impl Tables {
    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::PutChallenge(record) => {
                self.challenges.insert(record.id, record);
            }
            WriteOp::PutVideo(record) => {
                self.videos.insert(record.id, record);
            }
            WriteOp::PutLeaderboardEntry { principal, entry } => {
                self.leaderboard.insert(principal, entry);
            }
            WriteOp::PutTokenOwner { token_id, owner } => {
                self.tokens.insert(token_id, owner);
            }
            WriteOp::PutCounter { counter, value } => {
                self.counters.insert(counter, value);
            }
        }
    }
}

/// Wraps every table behind one reader-writer lock.
///
/// Queries take the read lock; [`commit`](LedgerStore::commit) takes the write
/// lock once for the whole batch.
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    tables: RwLock<Tables>,
}

impl MemoryEnvironment {
    /// Create an empty environment at genesis (all counters 0).
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, MemoryStoreError> {
        self.tables.read().map_err(|_| MemoryStoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, MemoryStoreError> {
        self.tables.write().map_err(|_| MemoryStoreError::Poisoned)
    }

    /// Whether no record of any kind has been written yet.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        let t = self.read()?;
        Ok(t.challenges.is_empty()
            && t.videos.is_empty()
            && t.leaderboard.is_empty()
            && t.tokens.is_empty()
            && t.counters.is_empty())
    }
}

impl LedgerStore for MemoryEnvironment {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut tables = self.write()?;
        let count = batch.len();
        for op in batch.into_ops() {
            tables.apply(op);
        }
        trace!(ops = count, "committed write batch");
        Ok(())
    }
}
