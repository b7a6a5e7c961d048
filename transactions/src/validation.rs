//! Stateless validation of call arguments.
//!
//! Only checks that need no ledger state live here (text bounds, amounts).
//! Existence, ownership and lifecycle checks are done by the ledger.

use crate::error::TransactionError;
use pulse_types::{BoundedText, LedgerParams, TokenAmount};

/// Challenge fields that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeFields {
    pub name: BoundedText,
    pub reward_pool: TokenAmount,
    pub media_uri: Option<BoundedText>,
}

/// Validate the arguments of a create-challenge call.
pub fn validate_challenge(
    params: &LedgerParams,
    name: &str,
    reward_pool: TokenAmount,
    media_uri: Option<&str>,
) -> Result<ChallengeFields, TransactionError> {
    let name = BoundedText::new("challenge name", name, params.max_name_len)?;
    if reward_pool.is_zero() {
        return Err(TransactionError::ZeroRewardPool);
    }
    let media_uri = media_uri
        .map(|uri| BoundedText::new("media uri", uri, params.max_media_uri_len))
        .transpose()?;
    Ok(ChallengeFields {
        name,
        reward_pool,
        media_uri,
    })
}

/// Validate a video title.
pub fn validate_title(params: &LedgerParams, title: &str) -> Result<BoundedText, TransactionError> {
    Ok(BoundedText::new("video title", title, params.max_title_len)?)
}
