//! Pixel Pulse ledger state machine.
//!
//! Creators fund challenges, participants submit videos, peers vote, and the
//! caller who completes a challenge receives its reward token. Four keyed
//! tables back the state: challenges, videos, the leaderboard and reward
//! token ownership.
//!
//! Every mutating operation validates against committed state first and then
//! commits one [`WriteBatch`](pulse_store::WriteBatch). A rejected operation
//! leaves every table untouched.

pub mod block;
mod challenge;
pub mod error;
pub mod event;
mod leaderboard;
pub mod ledger;
pub mod metrics;
pub mod snapshot;
mod token;
mod video;

pub use block::{Block, BlockProcessor, BlockReceipt, Outcome, Receipt};
pub use error::{BlockError, ErrorKind, LedgerError, SnapshotError};
pub use event::{EventBus, LedgerEvent};
pub use ledger::{CallOutput, LedgerSummary, PulseLedger};
pub use metrics::LedgerMetrics;
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
