use pulse_store::StoreError;
use pulse_transactions::TransactionError;
use pulse_types::{ChallengeId, Principal, TokenId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a ledger operation was rejected. A rejected operation changed nothing.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is completed and accepts no further submissions or votes")]
    ChallengeCompleted(ChallengeId),

    #[error("{0} has already been completed")]
    AlreadyCompleted(ChallengeId),

    #[error("{caller} may not transfer {token_id} from {from}")]
    Unauthorized {
        caller: Principal,
        token_id: TokenId,
        from: Principal,
    },

    #[error("{token_id} cannot be transferred to its current owner {owner}")]
    InvalidRecipient { token_id: TokenId, owner: Principal },

    #[error("{0} overflow")]
    Overflow(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<TransactionError> for LedgerError {
    fn from(e: TransactionError) -> Self {
        LedgerError::InvalidInput(e.to_string())
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ChallengeCompleted(_) => ErrorKind::ChallengeCompleted,
            Self::AlreadyCompleted(_) => ErrorKind::AlreadyCompleted,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidRecipient { .. } => ErrorKind::InvalidRecipient,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Stable, serializable discriminant of [`LedgerError`], surfaced in receipts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    ChallengeCompleted,
    AlreadyCompleted,
    Unauthorized,
    InvalidRecipient,
    Overflow,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::ChallengeCompleted => "challenge_completed",
            Self::AlreadyCompleted => "already_completed",
            Self::Unauthorized => "unauthorized",
            Self::InvalidRecipient => "invalid_recipient",
            Self::Overflow => "overflow",
            Self::Storage => "storage",
        }
    }
}

#[derive(Debug, Error)]
pub enum BlockError {
    #[error("block height {got} does not follow last processed height {last}")]
    HeightNotIncreasing { last: u64, got: u64 },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    #[error("snapshot decoding failed: {0}")]
    Decode(String),

    #[error("snapshot hash does not match its contents")]
    HashMismatch,

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot contents are inconsistent: {0}")]
    Inconsistent(String),

    #[error("cannot restore a snapshot into a non-empty store")]
    StoreNotEmpty,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
