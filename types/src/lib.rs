//! Fundamental types for the Pixel Pulse ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! principals, record identifiers, token amounts, bounded text and ledger parameters.

pub mod amount;
pub mod error;
pub mod id;
pub mod params;
pub mod principal;
pub mod text;

pub use amount::TokenAmount;
pub use error::TypeError;
pub use id::{ChallengeId, TokenId, VideoId};
pub use params::LedgerParams;
pub use principal::Principal;
pub use text::BoundedText;
