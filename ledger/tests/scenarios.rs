//! End-to-end ledger scenarios over the in-memory store.

use std::sync::{Arc, Mutex};

use pulse_ledger::{LedgerError, LedgerEvent, PulseLedger};
use pulse_store::{
    ChallengeRecord, ChallengeStore, Counter, LeaderboardEntry, LeaderboardStore, LedgerStore,
    MetaStore, StoreError, TokenStore, VideoRecord, VideoStore, WriteBatch,
};
use pulse_store_memory::MemoryEnvironment;
use pulse_types::{ChallengeId, LedgerParams, Principal, TokenAmount, TokenId, VideoId};

fn principal(s: &str) -> Principal {
    Principal::new(s).unwrap()
}

fn ledger() -> PulseLedger<MemoryEnvironment> {
    PulseLedger::new(MemoryEnvironment::new(), LedgerParams::default())
}

#[test]
fn vote_credits_submitter() {
    let mut ledger = ledger();
    let (deployer, wallet1) = (principal("deployer"), principal("wallet_1"));

    let c = ledger
        .create_challenge(&deployer, "Test Challenge", TokenAmount::new(1000), 100, None)
        .unwrap();
    assert_eq!(c, ChallengeId::new(0));
    let v = ledger.submit_video(&wallet1, "Test Video", c).unwrap();
    assert_eq!(v, VideoId::new(0));
    ledger.vote_video(&deployer, v).unwrap();

    let stats = ledger.get_user_stats(&wallet1).unwrap().unwrap();
    assert_eq!(stats.total_votes_received, 1);
    assert_eq!(stats.challenges_won, 0);
    assert_eq!(ledger.get_video(v).unwrap().unwrap().vote_count, 1);
}

#[test]
fn completion_mints_reward_and_transfer_moves_it() {
    let mut ledger = ledger();
    let deployer = principal("deployer");
    let wallet1 = principal("wallet_1");
    let wallet2 = principal("wallet_2");

    let c = ledger
        .create_challenge(
            &deployer,
            "Test Challenge",
            TokenAmount::new(1000),
            100,
            Some("ipfs://QmTest"),
        )
        .unwrap();
    ledger.complete_challenge(&wallet1, c).unwrap();

    let stats = ledger.get_user_stats(&wallet1).unwrap().unwrap();
    assert_eq!((stats.challenges_won, stats.nfts_earned), (1, 1));
    let token = TokenId::new(0);
    assert_eq!(ledger.get_owner(token).unwrap(), wallet1);

    ledger.transfer(&wallet1, token, &wallet1, &wallet2).unwrap();
    assert_eq!(ledger.get_owner(token).unwrap(), wallet2);

    let again = ledger.transfer(&wallet1, token, &wallet1, &wallet2).unwrap_err();
    assert!(matches!(again, LedgerError::Unauthorized { .. }));
}

#[test]
fn completed_challenge_is_closed() {
    let mut ledger = ledger();
    let (deployer, wallet1) = (principal("deployer"), principal("wallet_1"));
    let c = ledger
        .create_challenge(&deployer, "Test Challenge", TokenAmount::new(1000), 100, None)
        .unwrap();
    let v = ledger.submit_video(&wallet1, "early", c).unwrap();
    ledger.complete_challenge(&deployer, c).unwrap();

    assert!(matches!(
        ledger.submit_video(&wallet1, "late", c),
        Err(LedgerError::ChallengeCompleted(_))
    ));
    assert!(matches!(
        ledger.vote_video(&deployer, v),
        Err(LedgerError::ChallengeCompleted(_))
    ));
    assert!(matches!(
        ledger.complete_challenge(&wallet1, c),
        Err(LedgerError::AlreadyCompleted(_))
    ));

    assert_eq!(ledger.video_count().unwrap(), 1);
    let challenge = ledger.get_challenge(c).unwrap().unwrap();
    assert_eq!(challenge.winner, Some(deployer.clone()));
    assert_eq!(ledger.get_owner(TokenId::from(c)).unwrap(), deployer);
    assert_eq!(ledger.get_user_stats(&wallet1).unwrap(), None);
}

#[test]
fn events_follow_commits() {
    let mut ledger = ledger();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ledger.subscribe(Box::new(move |e: &LedgerEvent| sink.lock().unwrap().push(e.clone())));

    let (deployer, wallet1) = (principal("deployer"), principal("wallet_1"));
    let c = ledger
        .create_challenge(&deployer, "Test Challenge", TokenAmount::new(1000), 100, None)
        .unwrap();
    assert!(ledger.submit_video(&wallet1, "", c).is_err());
    ledger.complete_challenge(&wallet1, c).unwrap();

    let events = seen.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], LedgerEvent::ChallengeCreated { .. }));
    assert!(matches!(events[1], LedgerEvent::ChallengeCompleted { .. }));
    assert!(matches!(events[2], LedgerEvent::RewardMinted { .. }));
}

/// A store whose reads come from a real environment but whose commits can be
/// made to fail.
struct FlakyStore {
    inner: MemoryEnvironment,
    fail_commits: Arc<Mutex<bool>>,
}

impl ChallengeStore for FlakyStore {
    fn get_challenge(&self, id: ChallengeId) -> Result<Option<ChallengeRecord>, StoreError> {
        self.inner.get_challenge(id)
    }
    fn iter_challenges(&self) -> Result<Vec<ChallengeRecord>, StoreError> {
        self.inner.iter_challenges()
    }
}

impl VideoStore for FlakyStore {
    fn get_video(&self, id: VideoId) -> Result<Option<VideoRecord>, StoreError> {
        self.inner.get_video(id)
    }
    fn iter_videos(&self) -> Result<Vec<VideoRecord>, StoreError> {
        self.inner.iter_videos()
    }
}

impl LeaderboardStore for FlakyStore {
    fn get_entry(&self, principal: &Principal) -> Result<Option<LeaderboardEntry>, StoreError> {
        self.inner.get_entry(principal)
    }
    fn iter_entries(&self) -> Result<Vec<(Principal, LeaderboardEntry)>, StoreError> {
        self.inner.iter_entries()
    }
}

impl TokenStore for FlakyStore {
    fn get_owner(&self, token_id: TokenId) -> Result<Option<Principal>, StoreError> {
        self.inner.get_owner(token_id)
    }
    fn iter_tokens(&self) -> Result<Vec<(TokenId, Principal)>, StoreError> {
        self.inner.iter_tokens()
    }
}

impl MetaStore for FlakyStore {
    fn get_counter(&self, counter: Counter) -> Result<u64, StoreError> {
        self.inner.get_counter(counter)
    }
}

impl LedgerStore for FlakyStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if *self.fail_commits.lock().unwrap() {
            return Err(StoreError::Backend("disk full".into()));
        }
        self.inner.commit(batch)
    }
}

#[test]
fn failed_commit_changes_nothing_and_emits_nothing() {
    let fail = Arc::new(Mutex::new(false));
    let store = FlakyStore {
        inner: MemoryEnvironment::new(),
        fail_commits: Arc::clone(&fail),
    };
    let mut ledger = PulseLedger::new(store, LedgerParams::default());
    let events = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&events);
    ledger.subscribe(Box::new(move |_: &LedgerEvent| *counter.lock().unwrap() += 1));

    let (deployer, wallet1) = (principal("deployer"), principal("wallet_1"));
    let c = ledger
        .create_challenge(&deployer, "Test Challenge", TokenAmount::new(1000), 100, None)
        .unwrap();
    let before = ledger.summary().unwrap();
    assert_eq!(*events.lock().unwrap(), 1);

    *fail.lock().unwrap() = true;
    let err = ledger.complete_challenge(&wallet1, c).unwrap_err();
    assert!(matches!(err, LedgerError::Storage(_)));
    assert_eq!(err.kind(), pulse_ledger::ErrorKind::Storage);

    assert_eq!(ledger.summary().unwrap(), before);
    assert!(ledger.get_challenge(c).unwrap().unwrap().is_open());
    assert_eq!(ledger.get_user_stats(&wallet1).unwrap(), None);
    assert_eq!(*events.lock().unwrap(), 1);

    *fail.lock().unwrap() = false;
    ledger.complete_challenge(&wallet1, c).unwrap();
    assert_eq!(ledger.get_owner(TokenId::from(c)).unwrap(), wallet1);
}
