//! Bounded element names.
//!
//! Counter, timer and report-item names hold at most [`MAX_NAME_CHARS`]
//! visible characters. Longer input is truncated on a character boundary.

use std::fmt;

/// Longest name kept, in characters.
pub const MAX_NAME_CHARS: usize = 34;

/// Name truncated to [`MAX_NAME_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedName(String);

impl BoundedName {
    pub fn new(raw: &str) -> Self {
        let end = raw
            .char_indices()
            .nth(MAX_NAME_CHARS)
            .map(|(i, _)| i)
            .unwrap_or(raw.len());
        Self(raw[..end].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (what the report pads against).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for BoundedName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for BoundedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BoundedName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BoundedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for BoundedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
