//! Reward token transfers: `Owned(p0) → Owned(p1)`.

use pulse_store::{LedgerStore, WriteBatch};
use pulse_types::{Principal, TokenId};
use tracing::debug;

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::ledger::PulseLedger;

impl<S: LedgerStore> PulseLedger<S> {
    /// Move a reward token from `from` to `to`.
    ///
    /// The caller must be `from`, and `from` must be the recorded owner.
    /// Checks run in order: unminted, unauthorized, self-transfer.
    pub fn transfer(
        &mut self,
        caller: &Principal,
        token_id: TokenId,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), LedgerError> {
        let owner = self
            .store
            .get_owner(token_id)?
            .ok_or_else(|| LedgerError::NotFound(token_id.to_string()))?;
        if caller != from || &owner != from {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
                token_id,
                from: from.clone(),
            });
        }
        if to == from {
            return Err(LedgerError::InvalidRecipient { token_id, owner });
        }

        let mut batch = WriteBatch::new();
        batch.put_token_owner(token_id, to.clone());
        self.commit(
            batch,
            &[LedgerEvent::RewardTransferred {
                token_id,
                from: from.clone(),
                to: to.clone(),
            }],
        )?;

        debug!(%token_id, %from, %to, "reward token transferred");
        Ok(())
    }
}
