//! Reward token ownership storage.

use crate::StoreError;
use pulse_types::{Principal, TokenId};

/// Trait for reward token ledger reads.
pub trait TokenStore {
    /// Current owner of a minted token, `None` if unminted.
    fn get_owner(&self, token_id: TokenId) -> Result<Option<Principal>, StoreError>;

    /// All minted tokens in id order.
    fn iter_tokens(&self) -> Result<Vec<(TokenId, Principal)>, StoreError>;

    fn token_count(&self) -> Result<u64, StoreError> {
        self.iter_tokens().map(|t| t.len() as u64)
    }
}
