//! Principal type — the identity of a calling account.

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identity of an account, supplied by the host with every call.
///
/// Standard principals look like `ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM`;
/// contract principals append `.contract-name`. The ledger never inspects the
/// structure beyond the character set, it only compares principals for equality.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Longest accepted principal string.
    pub const MAX_LEN: usize = 128;

    /// Parse and validate a principal.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypeError::InvalidPrincipal("empty principal".into()));
        }
        if s.len() > Self::MAX_LEN {
            return Err(TypeError::InvalidPrincipal(format!(
                "principal is {} bytes long, maximum is {}",
                s.len(),
                Self::MAX_LEN
            )));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(TypeError::InvalidPrincipal(format!(
                "unexpected character {c:?} in {s}"
            )));
        }
        Ok(Self(s))
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}
