//! Shared lookup rows referenced by many posts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which lookup table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Label,
    Province,
    Category,
}

impl LookupKind {
    /// Table name used in logs and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Province => "province",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{code, value}` lookup row. The code is unique per table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupEntry {
    pub code: String,
    pub value: String,
}

impl LookupEntry {
    /// Build an entry from a code and its display value.
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}
