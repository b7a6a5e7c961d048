//! Reward token transfer call.

use pulse_types::{Principal, TokenId};
use serde::{Deserialize, Serialize};

/// Move reward token `token_id` from `from` to `to`.
///
/// The caller must be `from` and `from` must be the current owner; there is
/// no approval or delegate model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCall {
    pub token_id: TokenId,
    pub from: Principal,
    pub to: Principal,
}
