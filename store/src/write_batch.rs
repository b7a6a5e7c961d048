//! Write batching — groups every mutation of one ledger operation so the
//! backend can apply them as a single unit.
//!
//! # Usage
//!
//! ```ignore
//! let mut batch = WriteBatch::new();
//! batch.put_challenge(challenge);
//! batch.put_token_owner(token_id, owner);
//! batch.put_leaderboard_entry(owner, entry);
//! store.commit(batch)?;
//! ```
//!
//! A batch that is dropped without being committed has no effect.

use crate::challenge::ChallengeRecord;
use crate::leaderboard::LeaderboardEntry;
use crate::meta::Counter;
use crate::video::VideoRecord;
use pulse_types::{Principal, TokenId};

/// A single staged write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    PutChallenge(ChallengeRecord),
    PutVideo(VideoRecord),
    PutLeaderboardEntry {
        principal: Principal,
        entry: LeaderboardEntry,
    },
    PutTokenOwner {
        token_id: TokenId,
        owner: Principal,
    },
    PutCounter {
        counter: Counter,
        value: u64,
    },
}

/// An ordered list of writes committed together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_challenge(&mut self, record: ChallengeRecord) {
        self.ops.push(WriteOp::PutChallenge(record));
    }

    pub fn put_video(&mut self, record: VideoRecord) {
        self.ops.push(WriteOp::PutVideo(record));
    }

    pub fn put_leaderboard_entry(&mut self, principal: Principal, entry: LeaderboardEntry) {
        self.ops
            .push(WriteOp::PutLeaderboardEntry { principal, entry });
    }

    pub fn put_token_owner(&mut self, token_id: TokenId, owner: Principal) {
        self.ops.push(WriteOp::PutTokenOwner { token_id, owner });
    }

    pub fn put_counter(&mut self, counter: Counter, value: u64) {
        self.ops.push(WriteOp::PutCounter { counter, value });
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}
