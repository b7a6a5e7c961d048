//! Ledger parameters — the text bounds enforced on every write.

use serde::{Deserialize, Serialize};

/// Tunable limits applied when validating calls.
///
/// Defaults follow the deployed contract: 50-character challenge names,
/// 100-character video titles and 256-character media URIs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Maximum challenge name length, in code points.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Maximum video title length, in code points.
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,

    /// Maximum media URI length, in code points.
    #[serde(default = "default_max_media_uri_len")]
    pub max_media_uri_len: usize,
}

fn default_max_name_len() -> usize {
    50
}

fn default_max_title_len() -> usize {
    100
}

fn default_max_media_uri_len() -> usize {
    256
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            max_title_len: default_max_title_len(),
            max_media_uri_len: default_max_media_uri_len(),
        }
    }
}
