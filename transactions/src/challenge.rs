//! Challenge lifecycle calls: fund a challenge, then complete it.

use pulse_types::{ChallengeId, TokenAmount};
use serde::{Deserialize, Serialize};

/// Create a challenge funded with `reward_pool` tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChallengeCall {
    pub name: String,
    pub reward_pool: TokenAmount,
    /// Challenge length in block units. Informational only.
    pub duration: u64,
    /// Optional content-addressed pointer, e.g. `ipfs://...`.
    #[serde(default)]
    pub media_uri: Option<String>,
}

/// Complete a challenge. The caller becomes the winner and receives the reward token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteChallengeCall {
    pub challenge_id: ChallengeId,
}
