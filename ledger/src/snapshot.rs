//! Ledger snapshots — capture every table at a block height.
//!
//! The daemon persists a snapshot after each replay so the next run resumes
//! from it instead of replaying history. The snapshot hash is computed
//! deterministically from the table contents, so a truncated or edited file
//! is rejected on load.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use pulse_store::{ChallengeRecord, Counter, LeaderboardEntry, LedgerStore, VideoRecord, WriteBatch};
use pulse_types::{ChallengeId, Principal, TokenId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SnapshotError;

/// Current on-disk snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A ledger snapshot — the full contents of every table at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of the table contents, height and version.
    pub hash: [u8; 32],
    /// Height of the last block applied before capture.
    pub block_height: u64,
    /// Wall-clock capture time; not covered by the hash.
    pub created_at_secs: u64,
    pub next_challenge_id: u64,
    pub next_video_id: u64,
    pub challenges: Vec<ChallengeRecord>,
    pub videos: Vec<VideoRecord>,
    pub leaderboard: Vec<(Principal, LeaderboardEntry)>,
    pub tokens: Vec<(TokenId, Principal)>,
    pub version: u32,
}

impl LedgerSnapshot {
    /// Capture the committed state of `store`.
    pub fn capture<S: LedgerStore>(store: &S, block_height: u64) -> Result<Self, SnapshotError> {
        let created_at_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut snap = Self {
            hash: [0u8; 32],
            block_height,
            created_at_secs,
            next_challenge_id: store.get_counter(Counter::NextChallengeId)?,
            next_video_id: store.get_counter(Counter::NextVideoId)?,
            challenges: store.iter_challenges()?,
            videos: store.iter_videos()?,
            leaderboard: store.iter_entries()?,
            tokens: store.iter_tokens()?,
            version: SNAPSHOT_VERSION,
        };
        snap.hash = snap.compute_hash()?;
        Ok(snap)
    }

    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> Result<[u8; 32], SnapshotError> {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let content = bincode::serialize(&(
            self.version,
            self.block_height,
            self.next_challenge_id,
            self.next_video_id,
            &self.challenges,
            &self.videos,
            &self.leaderboard,
            &self.tokens,
        ))
        .map_err(|e| SnapshotError::Encode(e.to_string()))?;

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&content);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Ok(out)
    }

    /// Verify the snapshot hash matches its contents.
    pub fn verify(&self) -> bool {
        self.compute_hash().map(|h| h == self.hash).unwrap_or(false)
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserialize a snapshot, rejecting unknown versions and bad hashes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snap: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        if snap.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snap.version));
        }
        if !snap.verify() {
            return Err(SnapshotError::HashMismatch);
        }
        Ok(snap)
    }

    /// Write the snapshot to `path`, via a temporary file and a rename.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        info!(
            path = %path.display(),
            height = self.block_height,
            bytes = bytes.len(),
            "snapshot saved"
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Check that the tables agree with each other and with the id counters.
    ///
    /// Every stored id must sit below its counter, every video must belong to
    /// a stored challenge, and completed challenges and minted tokens must
    /// pair up one to one.
    pub fn check_consistency(&self) -> Result<(), SnapshotError> {
        let mut challenges: BTreeMap<ChallengeId, &ChallengeRecord> = BTreeMap::new();
        for record in &self.challenges {
            if record.id.value() >= self.next_challenge_id {
                return Err(SnapshotError::Inconsistent(format!(
                    "{} is not below next challenge id {}",
                    record.id, self.next_challenge_id
                )));
            }
            if record.completed != record.winner.is_some() {
                return Err(SnapshotError::Inconsistent(format!(
                    "{} completion flag disagrees with its winner",
                    record.id
                )));
            }
            if challenges.insert(record.id, record).is_some() {
                return Err(SnapshotError::Inconsistent(format!("{} stored twice", record.id)));
            }
        }

        let mut video_ids = BTreeSet::new();
        for video in &self.videos {
            if video.id.value() >= self.next_video_id {
                return Err(SnapshotError::Inconsistent(format!(
                    "{} is not below next video id {}",
                    video.id, self.next_video_id
                )));
            }
            if !challenges.contains_key(&video.challenge_id) {
                return Err(SnapshotError::Inconsistent(format!(
                    "{} refers to missing {}",
                    video.id, video.challenge_id
                )));
            }
            if !video_ids.insert(video.id) {
                return Err(SnapshotError::Inconsistent(format!("{} stored twice", video.id)));
            }
        }

        let mut minted = BTreeSet::new();
        for (token_id, _) in &self.tokens {
            let challenge_id = ChallengeId::new(token_id.value());
            if !challenges.get(&challenge_id).is_some_and(|c| c.completed) {
                return Err(SnapshotError::Inconsistent(format!(
                    "{token_id} has no completed {challenge_id}"
                )));
            }
            if !minted.insert(*token_id) {
                return Err(SnapshotError::Inconsistent(format!("{token_id} stored twice")));
            }
        }
        if let Some(c) = challenges
            .values()
            .find(|c| c.completed && !minted.contains(&TokenId::from(c.id)))
        {
            return Err(SnapshotError::Inconsistent(format!(
                "{} is completed but its reward token is missing",
                c.id
            )));
        }
        Ok(())
    }

    /// Load every table into `store` in one batch. The store must be empty
    /// and the snapshot must verify and be consistent.
    pub fn restore_into<S: LedgerStore>(&self, store: &S) -> Result<(), SnapshotError> {
        if !self.verify() {
            return Err(SnapshotError::HashMismatch);
        }
        self.check_consistency()?;
        if !is_empty(store)? {
            return Err(SnapshotError::StoreNotEmpty);
        }

        let mut batch = WriteBatch::new();
        for record in &self.challenges {
            batch.put_challenge(record.clone());
        }
        for record in &self.videos {
            batch.put_video(record.clone());
        }
        for (principal, entry) in &self.leaderboard {
            batch.put_leaderboard_entry(principal.clone(), *entry);
        }
        for (token_id, owner) in &self.tokens {
            batch.put_token_owner(*token_id, owner.clone());
        }
        batch.put_counter(Counter::NextChallengeId, self.next_challenge_id);
        batch.put_counter(Counter::NextVideoId, self.next_video_id);
        store.commit(batch)?;
        Ok(())
    }

    pub fn challenge_count(&self) -> usize {
        self.challenges.len()
    }
}

fn is_empty<S: LedgerStore>(store: &S) -> Result<bool, SnapshotError> {
    Ok(store.get_counter(Counter::NextChallengeId)? == 0
        && store.get_counter(Counter::NextVideoId)? == 0
        && store.iter_challenges()?.is_empty()
        && store.iter_videos()?.is_empty()
        && store.iter_entries()?.is_empty()
        && store.token_count()? == 0)
}
