//! Events emitted after a ledger operation commits.

use pulse_types::{ChallengeId, Principal, TokenAmount, TokenId, VideoId};

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A challenge was created and funded.
    ChallengeCreated {
        challenge_id: ChallengeId,
        creator: Principal,
        reward_pool: TokenAmount,
    },
    /// A video was entered into a challenge.
    VideoSubmitted {
        video_id: VideoId,
        challenge_id: ChallengeId,
        submitter: Principal,
    },
    /// A vote was counted.
    VoteCast {
        video_id: VideoId,
        voter: Principal,
        submitter: Principal,
        vote_count: u64,
    },
    /// A challenge was closed and its winner recorded.
    ChallengeCompleted {
        challenge_id: ChallengeId,
        winner: Principal,
        reward_pool: TokenAmount,
    },
    /// A reward token was minted.
    RewardMinted { token_id: TokenId, owner: Principal },
    /// A reward token changed hands.
    RewardTransferred {
        token_id: TokenId,
        from: Principal,
        to: Principal,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline after the batch commits; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
