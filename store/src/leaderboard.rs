//! Leaderboard storage — per-principal aggregate stats.

use crate::StoreError;
use pulse_types::Principal;
use serde::{Deserialize, Serialize};

/// Aggregate stats for one participant. Created lazily, never deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Sum of votes received across every video this principal submitted.
    pub total_votes_received: u64,
    pub challenges_won: u64,
    /// One reward token per win.
    pub nfts_earned: u64,
}

/// Trait for leaderboard reads.
pub trait LeaderboardStore {
    fn get_entry(&self, principal: &Principal) -> Result<Option<LeaderboardEntry>, StoreError>;

    /// All entries in principal order.
    fn iter_entries(&self) -> Result<Vec<(Principal, LeaderboardEntry)>, StoreError>;
}
