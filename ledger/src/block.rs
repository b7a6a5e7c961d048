//! Block processing — applies host-sequenced transactions in order.
//!
//! Each transaction is its own atomic unit: a rejected transaction yields an
//! error receipt and leaves the ledger exactly as the previous transaction
//! left it, while the rest of the block still runs.

use std::sync::Arc;

use pulse_store::LedgerStore;
use pulse_transactions::Transaction;
use pulse_types::Principal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BlockError, ErrorKind};
use crate::ledger::PulseLedger;
use crate::metrics::LedgerMetrics;

/// An ordered batch of transactions sequenced by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    pub transactions: Vec<Transaction>,
}

/// The result of one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<u64>,
    },
    Err {
        kind: ErrorKind,
        message: String,
    },
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// The error kind, if the transaction was rejected.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { kind, .. } => Some(*kind),
        }
    }
}

/// Receipt for one transaction in a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub index: usize,
    pub caller: Principal,
    pub op: String,
    pub outcome: Outcome,
}

/// Receipts for a whole block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReceipt {
    pub height: u64,
    pub receipts: Vec<Receipt>,
}

impl BlockReceipt {
    pub fn applied(&self) -> usize {
        self.receipts.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn rejected(&self) -> usize {
        self.receipts.len() - self.applied()
    }
}

/// Runs blocks against a ledger, enforcing increasing heights.
pub struct BlockProcessor {
    last_height: Option<u64>,
    metrics: Option<Arc<LedgerMetrics>>,
}

impl BlockProcessor {
    /// A processor that has not seen any block yet.
    pub fn new() -> Self {
        Self {
            last_height: None,
            metrics: None,
        }
    }

    /// A processor resuming after `height` (e.g. from a snapshot).
    pub fn resume_after(height: u64) -> Self {
        Self {
            last_height: Some(height),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<LedgerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn last_height(&self) -> Option<u64> {
        self.last_height
    }

    /// Apply every transaction of `block` in order and collect receipts.
    pub fn process<S: LedgerStore>(
        &mut self,
        ledger: &mut PulseLedger<S>,
        block: &Block,
    ) -> Result<BlockReceipt, BlockError> {
        if let Some(last) = self.last_height {
            if block.height <= last {
                return Err(BlockError::HeightNotIncreasing {
                    last,
                    got: block.height,
                });
            }
        }

        let mut receipts = Vec::with_capacity(block.transactions.len());
        for (index, tx) in block.transactions.iter().enumerate() {
            let op = tx.call.op_name();
            let outcome = match ledger.execute(tx) {
                Ok(output) => {
                    if let Some(m) = &self.metrics {
                        m.calls_applied.with_label_values(&[op]).inc();
                    }
                    Outcome::Ok {
                        value: output.value(),
                    }
                }
                Err(e) => {
                    let kind = e.kind();
                    warn!(
                        height = block.height,
                        index,
                        op,
                        caller = %tx.caller,
                        error = %e,
                        "transaction rejected"
                    );
                    if let Some(m) = &self.metrics {
                        m.calls_rejected.with_label_values(&[op, kind.as_str()]).inc();
                    }
                    Outcome::Err {
                        kind,
                        message: e.to_string(),
                    }
                }
            };
            receipts.push(Receipt {
                index,
                caller: tx.caller.clone(),
                op: op.to_string(),
                outcome,
            });
        }

        self.last_height = Some(block.height);
        let receipt = BlockReceipt {
            height: block.height,
            receipts,
        };
        if let Some(m) = &self.metrics {
            m.blocks_processed.inc();
            match ledger.summary() {
                Ok(summary) => m.observe_summary(&summary),
                Err(e) => warn!(error = %e, "could not refresh ledger gauges"),
            }
        }
        info!(
            height = block.height,
            applied = receipt.applied(),
            rejected = receipt.rejected(),
            "block processed"
        );
        Ok(receipt)
    }
}

impl Default for BlockProcessor {
    fn default() -> Self {
        Self::new()
    }
}
