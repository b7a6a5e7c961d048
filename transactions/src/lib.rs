//! All Pixel Pulse transaction types and their validation logic.
//!
//! Transaction types:
//! - **CreateChallenge**: Fund a new challenge with a reward pool
//! - **CompleteChallenge**: Close a challenge and claim its reward token
//! - **SubmitVideo**: Enter a video into an open challenge
//! - **VoteVideo**: Cast one vote for a video
//! - **Transfer**: Move a reward token to another principal

pub mod challenge;
pub mod error;
pub mod transfer;
pub mod validation;
pub mod video;

pub use challenge::{CompleteChallengeCall, CreateChallengeCall};
pub use error::TransactionError;
pub use transfer::TransferCall;
pub use video::{SubmitVideoCall, VoteVideoCall};

use pulse_types::Principal;
use serde::{Deserialize, Serialize};

/// The unified call enum wrapping every mutating ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    CreateChallenge(CreateChallengeCall),
    SubmitVideo(SubmitVideoCall),
    VoteVideo(VoteVideoCall),
    CompleteChallenge(CompleteChallengeCall),
    Transfer(TransferCall),
}

impl Call {
    /// Stable operation name, used for receipts, logs and metric labels.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::CreateChallenge(_) => "create_challenge",
            Self::SubmitVideo(_) => "submit_video",
            Self::VoteVideo(_) => "vote_video",
            Self::CompleteChallenge(_) => "complete_challenge",
            Self::Transfer(_) => "transfer",
        }
    }
}

/// A call together with the identity the host attached to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub caller: Principal,
    pub call: Call,
}

impl Transaction {
    pub fn new(caller: Principal, call: Call) -> Self {
        Self { caller, call }
    }
}
