//! Challenge lifecycle: `Open → Completed`.

use pulse_store::{ChallengeRecord, Counter, LedgerStore, StoreError, WriteBatch};
use pulse_transactions::validation::validate_challenge;
use pulse_types::{ChallengeId, Principal, TokenAmount, TokenId};
use tracing::debug;

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::leaderboard::credit_win;
use crate::ledger::PulseLedger;

impl<S: LedgerStore> PulseLedger<S> {
    /// Create and fund a challenge. Returns its sequential id.
    pub fn create_challenge(
        &mut self,
        caller: &Principal,
        name: &str,
        reward_pool: TokenAmount,
        duration: u64,
        media_uri: Option<&str>,
    ) -> Result<ChallengeId, LedgerError> {
        let fields = validate_challenge(&self.params, name, reward_pool, media_uri)?;

        let id = ChallengeId::new(self.store.get_counter(Counter::NextChallengeId)?);
        let next = id.next().ok_or(LedgerError::Overflow("challenge id"))?;

        let record = ChallengeRecord {
            id,
            creator: caller.clone(),
            name: fields.name,
            reward_pool: fields.reward_pool,
            duration,
            media_uri: fields.media_uri,
            completed: false,
            winner: None,
        };

        let mut batch = WriteBatch::new();
        batch.put_challenge(record);
        batch.put_counter(Counter::NextChallengeId, next.value());
        self.commit(
            batch,
            &[LedgerEvent::ChallengeCreated {
                challenge_id: id,
                creator: caller.clone(),
                reward_pool,
            }],
        )?;

        debug!(%id, creator = %caller, %reward_pool, duration, "challenge created");
        Ok(id)
    }

    /// Complete a challenge: record the caller as winner, mint the reward
    /// token to them and credit their leaderboard entry, all in one batch.
    pub fn complete_challenge(
        &mut self,
        caller: &Principal,
        challenge_id: ChallengeId,
    ) -> Result<(), LedgerError> {
        let mut challenge = self.require_challenge(challenge_id)?;
        if challenge.completed {
            return Err(LedgerError::AlreadyCompleted(challenge_id));
        }

        let token_id = TokenId::from(challenge_id);
        if let Some(owner) = self.store.get_owner(token_id)? {
            return Err(StoreError::Corruption(format!(
                "{token_id} already owned by {owner} while {challenge_id} is open"
            ))
            .into());
        }

        let entry = credit_win(self.entry_or_default(caller)?)?;
        challenge.completed = true;
        challenge.winner = Some(caller.clone());
        let reward_pool = challenge.reward_pool;

        let mut batch = WriteBatch::new();
        batch.put_challenge(challenge);
        batch.put_token_owner(token_id, caller.clone());
        batch.put_leaderboard_entry(caller.clone(), entry);
        self.commit(
            batch,
            &[
                LedgerEvent::ChallengeCompleted {
                    challenge_id,
                    winner: caller.clone(),
                    reward_pool,
                },
                LedgerEvent::RewardMinted {
                    token_id,
                    owner: caller.clone(),
                },
            ],
        )?;

        debug!(%challenge_id, winner = %caller, %reward_pool, "challenge completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_store::{ChallengeStore, LeaderboardStore};
    use pulse_store_memory::MemoryEnvironment;
    use pulse_types::LedgerParams;

    fn principal(s: &str) -> Principal {
        Principal::new(s).unwrap()
    }

    fn ledger() -> PulseLedger<MemoryEnvironment> {
        PulseLedger::new(MemoryEnvironment::new(), LedgerParams::default())
    }

    #[test]
    fn ids_start_at_zero_and_increase_by_one() {
        let mut ledger = ledger();
        let deployer = principal("deployer");
        for expected in 0..3 {
            let id = ledger
                .create_challenge(&deployer, "Test Challenge", TokenAmount::new(1000), 100, None)
                .unwrap();
            assert_eq!(id, ChallengeId::new(expected));
        }
        assert_eq!(ledger.challenge_count().unwrap(), 3);
    }

    #[test]
    fn created_challenge_is_open_with_no_winner() {
        let mut ledger = ledger();
        let id = ledger
            .create_challenge(
                &principal("deployer"),
                "Test Challenge",
                TokenAmount::new(1000),
                100,
                Some("ipfs://QmTest"),
            )
            .unwrap();
        let c = ledger.get_challenge(id).unwrap().unwrap();
        assert!(c.is_open());
        assert_eq!(c.winner, None);
        assert_eq!(c.creator, principal("deployer"));
        assert_eq!(c.media_uri.unwrap().as_str(), "ipfs://QmTest");
    }

    #[test]
    fn invalid_input_allocates_no_id() {
        let mut ledger = ledger();
        let deployer = principal("deployer");
        let long = "n".repeat(51);
        for (name, pool) in [("ok", 0u128), (long.as_str(), 10), ("", 10)] {
            let err = ledger
                .create_challenge(&deployer, name, TokenAmount::new(pool), 1, None)
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)), "{err}");
        }
        assert_eq!(ledger.challenge_count().unwrap(), 0);
        let id = ledger
            .create_challenge(&deployer, "ok", TokenAmount::new(1), 0, None)
            .unwrap();
        assert_eq!(id, ChallengeId::GENESIS);
    }

    #[test]
    fn exhausted_id_counter_overflows() {
        let env = MemoryEnvironment::new();
        let mut seed = WriteBatch::new();
        seed.put_counter(Counter::NextChallengeId, u64::MAX);
        env.commit(seed).unwrap();
        let mut ledger = PulseLedger::new(env, LedgerParams::default());

        let err = ledger
            .create_challenge(&principal("deployer"), "last", TokenAmount::new(1), 1, None)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Overflow("challenge id")));
        assert!(ledger.store().iter_challenges().unwrap().is_empty());
    }

    #[test]
    fn completion_couples_challenge_token_and_leaderboard() {
        let mut ledger = ledger();
        let wallet1 = principal("wallet_1");
        let id = ledger
            .create_challenge(&principal("deployer"), "c", TokenAmount::new(1000), 100, None)
            .unwrap();
        ledger.complete_challenge(&wallet1, id).unwrap();

        let c = ledger.get_challenge(id).unwrap().unwrap();
        assert!(c.completed);
        assert_eq!(c.winner, Some(wallet1.clone()));
        assert_eq!(ledger.get_owner(TokenId::from(id)).unwrap(), wallet1);
        let stats = ledger.store().get_entry(&wallet1).unwrap().unwrap();
        assert_eq!((stats.challenges_won, stats.nfts_earned), (1, 1));
    }

    #[test]
    fn second_completion_is_rejected_and_changes_nothing() {
        let mut ledger = ledger();
        let (wallet1, wallet2) = (principal("wallet_1"), principal("wallet_2"));
        let id = ledger
            .create_challenge(&principal("deployer"), "c", TokenAmount::new(1000), 100, None)
            .unwrap();
        ledger.complete_challenge(&wallet1, id).unwrap();

        let err = ledger.complete_challenge(&wallet2, id).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyCompleted(c) if c == id));
        assert_eq!(ledger.get_challenge(id).unwrap().unwrap().winner, Some(wallet1.clone()));
        assert_eq!(ledger.get_owner(TokenId::from(id)).unwrap(), wallet1);
        assert_eq!(ledger.get_user_stats(&wallet2).unwrap(), None);

        let err = ledger.complete_challenge(&wallet1, id).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyCompleted(_)));
        assert_eq!(ledger.get_user_stats(&wallet1).unwrap().unwrap().challenges_won, 1);
    }

    #[test]
    fn completing_unknown_challenge_is_not_found() {
        let mut ledger = ledger();
        let err = ledger
            .complete_challenge(&principal("wallet_1"), ChallengeId::new(9))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert_eq!(ledger.summary().unwrap().tokens, 0);
    }

    #[test]
    fn wins_accumulate_across_challenges() {
        let mut ledger = ledger();
        let wallet1 = principal("wallet_1");
        for _ in 0..3 {
            let id = ledger
                .create_challenge(&principal("deployer"), "c", TokenAmount::new(5), 1, None)
                .unwrap();
            ledger.complete_challenge(&wallet1, id).unwrap();
        }
        let stats = ledger.get_user_stats(&wallet1).unwrap().unwrap();
        assert_eq!((stats.challenges_won, stats.nfts_earned), (3, 3));
    }
}
