//! Challenge registry storage.

use crate::StoreError;
use pulse_types::{BoundedText, ChallengeId, Principal, TokenAmount};
use serde::{Deserialize, Serialize};

/// A funded content contest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub id: ChallengeId,
    /// The principal that created and funded the challenge.
    pub creator: Principal,
    pub name: BoundedText,
    /// Fixed at creation.
    pub reward_pool: TokenAmount,
    /// Block units. Fixed at creation.
    pub duration: u64,
    pub media_uri: Option<BoundedText>,
    /// Flips to `true` exactly once.
    pub completed: bool,
    /// Set only on completion.
    pub winner: Option<Principal>,
}

impl ChallengeRecord {
    /// Whether submissions and votes are still accepted.
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

/// Trait for challenge registry reads.
pub trait ChallengeStore {
    fn get_challenge(&self, id: ChallengeId) -> Result<Option<ChallengeRecord>, StoreError>;

    /// All challenges in id order.
    fn iter_challenges(&self) -> Result<Vec<ChallengeRecord>, StoreError>;
}
