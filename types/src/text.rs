//! Length-bounded text fields (challenge names, video titles, media URIs).

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A text value whose length, in code points, was checked against a bound.
///
/// The bound itself is a ledger parameter, so it is not carried in the type;
/// values are only constructed through [`BoundedText::new`] or deserialized
/// from records that were validated when first written.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundedText(String);

impl BoundedText {
    /// Validate `raw` for `field`: non-empty, at most `max_len` code points,
    /// and free of control characters.
    pub fn new(field: &'static str, raw: &str, max_len: usize) -> Result<Self, TypeError> {
        if raw.is_empty() {
            return Err(TypeError::EmptyText { field });
        }
        let len = raw.chars().count();
        if len > max_len {
            return Err(TypeError::TextTooLong {
                field,
                len,
                max: max_len,
            });
        }
        if raw.chars().any(char::is_control) {
            return Err(TypeError::ControlCharacter { field });
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in code points.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
