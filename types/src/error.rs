//! Errors raised while constructing validated types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("{field} must not be empty")]
    EmptyText { field: &'static str },

    #[error("{field} is {len} characters long, maximum is {max}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} contains a control character")]
    ControlCharacter { field: &'static str },

    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),
}
