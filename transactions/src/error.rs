use pulse_types::TypeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("{0}")]
    InvalidText(#[from] TypeError),

    #[error("reward pool must be positive")]
    ZeroRewardPool,
}
