//! Loading, replaying and persisting the ledger held in the data directory.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use pulse_ledger::{
    Block, BlockProcessor, BlockReceipt, LedgerMetrics, LedgerSnapshot, PulseLedger,
};
use pulse_store_memory::MemoryEnvironment;
use tracing::info;

use crate::config::DaemonConfig;

/// A ledger rebuilt from the data directory, plus the height it reached.
pub struct LoadedLedger {
    pub ledger: PulseLedger<MemoryEnvironment>,
    pub height: Option<u64>,
}

/// Restore the ledger from the snapshot in `data_dir`, or start at genesis.
pub fn load(config: &DaemonConfig) -> anyhow::Result<LoadedLedger> {
    let store = MemoryEnvironment::new();
    let path = config.snapshot_path();
    let height = if path.exists() {
        let snapshot = LedgerSnapshot::load(&path)
            .with_context(|| format!("failed to load snapshot {}", path.display()))?;
        snapshot.restore_into(&store)?;
        info!(
            path = %path.display(),
            height = snapshot.block_height,
            "ledger restored from snapshot"
        );
        Some(snapshot.block_height)
    } else {
        info!("no snapshot found, starting from genesis");
        None
    };
    Ok(LoadedLedger {
        ledger: PulseLedger::new(store, config.params.clone()),
        height,
    })
}

/// Result of a replay run.
pub struct ReplayReport {
    pub receipts: Vec<BlockReceipt>,
    pub metrics: Option<String>,
}

/// Apply every block in the JSON file at `blocks_path` and save a new snapshot
/// once at least one block has ever been processed.
pub fn replay(config: &DaemonConfig, blocks_path: &Path) -> anyhow::Result<ReplayReport> {
    let raw = std::fs::read_to_string(blocks_path)
        .with_context(|| format!("failed to read {}", blocks_path.display()))?;
    let blocks: Vec<Block> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of blocks", blocks_path.display()))?;

    let LoadedLedger { mut ledger, height } = load(config)?;
    let mut processor = match height {
        Some(h) => BlockProcessor::resume_after(h),
        None => BlockProcessor::new(),
    };
    let metrics = config.enable_metrics.then(|| Arc::new(LedgerMetrics::new()));
    if let Some(m) = &metrics {
        processor = processor.with_metrics(Arc::clone(m));
    }

    let mut receipts = Vec::with_capacity(blocks.len());
    for block in &blocks {
        receipts.push(processor.process(&mut ledger, block)?);
    }

    // A genesis ledger that saw no block has no height to record.
    match processor.last_height() {
        Some(final_height) => {
            std::fs::create_dir_all(&config.data_dir)
                .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
            LedgerSnapshot::capture(ledger.store(), final_height)?
                .save(&config.snapshot_path())?;
        }
        None => info!("no block processed, snapshot not written"),
    }

    let metrics = match metrics {
        Some(m) => Some(m.encode_text()?),
        None => None,
    };
    Ok(ReplayReport { receipts, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_ledger::ErrorKind;
    use pulse_transactions::{
        Call, CompleteChallengeCall, CreateChallengeCall, Transaction, TransferCall,
    };
    use pulse_types::{ChallengeId, Principal, TokenAmount, TokenId};

    fn principal(s: &str) -> Principal {
        Principal::new(s).unwrap()
    }

    fn config_in(dir: &Path) -> DaemonConfig {
        DaemonConfig {
            data_dir: dir.join("data"),
            enable_metrics: true,
            ..DaemonConfig::default()
        }
    }

    fn write_blocks(dir: &Path, name: &str, blocks: &[Block]) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(blocks).unwrap()).unwrap();
        path
    }

    #[test]
    fn replay_persists_state_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let (wallet1, wallet2) = (principal("wallet_1"), principal("wallet_2"));

        let first = write_blocks(
            dir.path(),
            "first.json",
            &[Block {
                height: 1,
                transactions: vec![
                    Transaction::new(
                        principal("deployer"),
                        Call::CreateChallenge(CreateChallengeCall {
                            name: "Test Challenge".into(),
                            reward_pool: TokenAmount::new(1000),
                            duration: 100,
                            media_uri: Some("ipfs://QmTest".into()),
                        }),
                    ),
                    Transaction::new(
                        wallet1.clone(),
                        Call::CompleteChallenge(CompleteChallengeCall {
                            challenge_id: ChallengeId::new(0),
                        }),
                    ),
                ],
            }],
        );
        let report = replay(&config, &first).unwrap();
        assert_eq!(report.receipts[0].applied(), 2);
        assert!(report.metrics.unwrap().contains("pulse_reward_tokens 1"));

        let transfer = Transaction::new(
            wallet1.clone(),
            Call::Transfer(TransferCall {
                token_id: TokenId::new(0),
                from: wallet1.clone(),
                to: wallet2.clone(),
            }),
        );
        let second = write_blocks(
            dir.path(),
            "second.json",
            &[Block {
                height: 2,
                transactions: vec![transfer.clone(), transfer],
            }],
        );
        let report = replay(&config, &second).unwrap();
        let kinds: Vec<_> = report.receipts[0]
            .receipts
            .iter()
            .map(|r| r.outcome.error_kind())
            .collect();
        assert_eq!(kinds, vec![None, Some(ErrorKind::Unauthorized)]);

        let loaded = load(&config).unwrap();
        assert_eq!(loaded.height, Some(2));
        assert_eq!(loaded.ledger.get_owner(TokenId::new(0)).unwrap(), wallet2);
        let stats = loaded.ledger.get_user_stats(&wallet1).unwrap().unwrap();
        assert_eq!((stats.challenges_won, stats.nfts_earned), (1, 1));
    }

    #[test]
    fn replaying_an_old_height_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let blocks = write_blocks(
            dir.path(),
            "blocks.json",
            &[Block {
                height: 3,
                transactions: vec![],
            }],
        );
        replay(&config, &blocks).unwrap();
        assert!(replay(&config, &blocks).is_err());
    }

    #[test]
    fn load_without_snapshot_is_genesis() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&config_in(dir.path())).unwrap();
        assert_eq!(loaded.height, None);
        assert_eq!(loaded.ledger.challenge_count().unwrap(), 0);
    }

    #[test]
    fn empty_replay_at_genesis_leaves_height_zero_available() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let empty = write_blocks(dir.path(), "empty.json", &[]);
        let report = replay(&config, &empty).unwrap();
        assert!(report.receipts.is_empty());
        assert!(!config.snapshot_path().exists());

        let genesis = write_blocks(
            dir.path(),
            "genesis.json",
            &[Block {
                height: 0,
                transactions: vec![],
            }],
        );
        replay(&config, &genesis).unwrap();
        assert_eq!(load(&config).unwrap().height, Some(0));

        // Once a height is recorded, empty replays keep it.
        replay(&config, &empty).unwrap();
        assert_eq!(load(&config).unwrap().height, Some(0));
    }
}
