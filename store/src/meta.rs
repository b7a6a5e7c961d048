//! Id counters stored next to the tables.

use crate::StoreError;
use serde::{Deserialize, Serialize};

/// The sequential id counters. Both start at 0 at genesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Counter {
    NextChallengeId,
    NextVideoId,
}

/// Trait for counter reads.
pub trait MetaStore {
    /// Current value of `counter`; 0 if it was never written.
    fn get_counter(&self, counter: Counter) -> Result<u64, StoreError>;
}
