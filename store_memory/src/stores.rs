//! Read-trait implementations over the in-memory tables.

use pulse_store::{
    ChallengeRecord, ChallengeStore, Counter, LeaderboardEntry, LeaderboardStore, MetaStore,
    StoreError, TokenStore, VideoRecord, VideoStore,
};
use pulse_types::{ChallengeId, Principal, TokenId, VideoId};

use crate::environment::MemoryEnvironment;

impl ChallengeStore for MemoryEnvironment {
    fn get_challenge(&self, id: ChallengeId) -> Result<Option<ChallengeRecord>, StoreError> {
        Ok(self.read()?.challenges.get(&id).cloned())
    }

    fn iter_challenges(&self) -> Result<Vec<ChallengeRecord>, StoreError> {
        Ok(self.read()?.challenges.values().cloned().collect())
    }
}

impl VideoStore for MemoryEnvironment {
    fn get_video(&self, id: VideoId) -> Result<Option<VideoRecord>, StoreError> {
        Ok(self.read()?.videos.get(&id).cloned())
    }

    fn iter_videos(&self) -> Result<Vec<VideoRecord>, StoreError> {
        Ok(self.read()?.videos.values().cloned().collect())
    }
}

impl LeaderboardStore for MemoryEnvironment {
    fn get_entry(&self, principal: &Principal) -> Result<Option<LeaderboardEntry>, StoreError> {
        Ok(self.read()?.leaderboard.get(principal).copied())
    }

    fn iter_entries(&self) -> Result<Vec<(Principal, LeaderboardEntry)>, StoreError> {
        Ok(self
            .read()?
            .leaderboard
            .iter()
            .map(|(p, e)| (p.clone(), *e))
            .collect())
    }
}

impl TokenStore for MemoryEnvironment {
    fn get_owner(&self, token_id: TokenId) -> Result<Option<Principal>, StoreError> {
        Ok(self.read()?.tokens.get(&token_id).cloned())
    }

    fn iter_tokens(&self) -> Result<Vec<(TokenId, Principal)>, StoreError> {
        Ok(self
            .read()?
            .tokens
            .iter()
            .map(|(id, owner)| (*id, owner.clone()))
            .collect())
    }

    fn token_count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.tokens.len() as u64)
    }
}

impl MetaStore for MemoryEnvironment {
    fn get_counter(&self, counter: Counter) -> Result<u64, StoreError> {
        Ok(self.read()?.counters.get(&counter).copied().unwrap_or(0))
    }
}
