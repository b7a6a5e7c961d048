//! The ledger state machine and its read-only queries.
//!
//! Mutating operations are spread over the `challenge`, `video` and `token`
//! modules; each one takes `&mut self`, so the borrow checker enforces the
//! single-writer model. Queries take `&self` and only ever see committed state.

use pulse_store::{ChallengeRecord, Counter, LeaderboardEntry, LedgerStore, VideoRecord, WriteBatch};
use pulse_transactions::{Call, Transaction};
use pulse_types::{ChallengeId, LedgerParams, Principal, TokenId, VideoId};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};

/// What a successfully executed call returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallOutput {
    ChallengeCreated(ChallengeId),
    VideoSubmitted(VideoId),
    Unit,
}

impl CallOutput {
    /// The numeric id carried by the output, if any.
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::ChallengeCreated(id) => Some(id.value()),
            Self::VideoSubmitted(id) => Some(id.value()),
            Self::Unit => None,
        }
    }
}

/// Summary statistics for the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub challenges: u64,
    pub completed_challenges: u64,
    pub videos: u64,
    pub leaderboard_entries: u64,
    pub tokens: u64,
}

/// The Pixel Pulse state machine over a [`LedgerStore`] backend.
pub struct PulseLedger<S> {
    pub(crate) store: S,
    pub(crate) params: LedgerParams,
    events: EventBus,
}

impl<S: LedgerStore> PulseLedger<S> {
    pub fn new(store: S, params: LedgerParams) -> Self {
        Self {
            store,
            params,
            events: EventBus::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    /// Register a listener invoked after every committed operation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Execute one host-sequenced transaction.
    pub fn execute(&mut self, tx: &Transaction) -> Result<CallOutput, LedgerError> {
        let caller = &tx.caller;
        match &tx.call {
            Call::CreateChallenge(c) => self
                .create_challenge(
                    caller,
                    &c.name,
                    c.reward_pool,
                    c.duration,
                    c.media_uri.as_deref(),
                )
                .map(CallOutput::ChallengeCreated),
            Call::SubmitVideo(c) => self
                .submit_video(caller, &c.title, c.challenge_id)
                .map(CallOutput::VideoSubmitted),
            Call::VoteVideo(c) => self.vote_video(caller, c.video_id).map(|_| CallOutput::Unit),
            Call::CompleteChallenge(c) => self
                .complete_challenge(caller, c.challenge_id)
                .map(|_| CallOutput::Unit),
            Call::Transfer(c) => self
                .transfer(caller, c.token_id, &c.from, &c.to)
                .map(|_| CallOutput::Unit),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn get_challenge(&self, id: ChallengeId) -> Result<Option<ChallengeRecord>, LedgerError> {
        Ok(self.store.get_challenge(id)?)
    }

    pub fn get_video(&self, id: VideoId) -> Result<Option<VideoRecord>, LedgerError> {
        Ok(self.store.get_video(id)?)
    }

    /// Leaderboard stats for `principal`; `None` if it never received a vote or won.
    pub fn get_user_stats(
        &self,
        principal: &Principal,
    ) -> Result<Option<LeaderboardEntry>, LedgerError> {
        Ok(self.store.get_entry(principal)?)
    }

    /// Same lookup as [`get_user_stats`](Self::get_user_stats), under the
    /// name the read-only contract API also exposes.
    pub fn get_leaderboard_entry(
        &self,
        principal: &Principal,
    ) -> Result<Option<LeaderboardEntry>, LedgerError> {
        self.get_user_stats(principal)
    }

    /// Current owner of a reward token.
    pub fn get_owner(&self, token_id: TokenId) -> Result<Principal, LedgerError> {
        self.store
            .get_owner(token_id)?
            .ok_or_else(|| LedgerError::NotFound(token_id.to_string()))
    }

    /// Number of challenges ever created (also the next challenge id).
    pub fn challenge_count(&self) -> Result<u64, LedgerError> {
        Ok(self.store.get_counter(Counter::NextChallengeId)?)
    }

    /// Number of videos ever submitted (also the next video id).
    pub fn video_count(&self) -> Result<u64, LedgerError> {
        Ok(self.store.get_counter(Counter::NextVideoId)?)
    }

    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        let completed_challenges = self
            .store
            .iter_challenges()?
            .iter()
            .filter(|c| c.completed)
            .count() as u64;
        Ok(LedgerSummary {
            challenges: self.challenge_count()?,
            completed_challenges,
            videos: self.video_count()?,
            leaderboard_entries: self.store.iter_entries()?.len() as u64,
            tokens: self.store.token_count()?,
        })
    }

    // ── Shared helpers for the operation modules ────────────────────────

    pub(crate) fn require_challenge(
        &self,
        id: ChallengeId,
    ) -> Result<ChallengeRecord, LedgerError> {
        self.store
            .get_challenge(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    pub(crate) fn require_video(&self, id: VideoId) -> Result<VideoRecord, LedgerError> {
        self.store
            .get_video(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// The caller's entry, or a zeroed one if it has none yet.
    pub(crate) fn entry_or_default(
        &self,
        principal: &Principal,
    ) -> Result<LeaderboardEntry, LedgerError> {
        Ok(self.store.get_entry(principal)?.unwrap_or_default())
    }

    /// Commit `batch` and, only once it is durable, publish `events`.
    pub(crate) fn commit(
        &mut self,
        batch: WriteBatch,
        events: &[LedgerEvent],
    ) -> Result<(), LedgerError> {
        self.store.commit(batch)?;
        for event in events {
            self.events.emit(event);
        }
        Ok(())
    }
}
