//! Application-level identifiers.
//!
//! Rows are keyed by opaque strings assigned by the application rather than
//! by the store. New identifiers are simple-form UUID v4 strings; identifiers
//! read back from storage or from requests are accepted as-is once trimmed
//! and non-empty.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for identifier newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The identifier was blank.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier failed.
        kind: &'static str,
    },
    /// The identifier had surrounding whitespace.
    #[error("{kind} must not contain surrounding whitespace")]
    Untrimmed {
        /// Which identifier failed.
        kind: &'static str,
    },
}

/// Generate a fresh row identifier.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap an identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdValidationError> {
                let raw = value.into();
                if raw.trim().is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                if raw.trim() != raw {
                    return Err(IdValidationError::Untrimmed { kind: $kind });
                }
                Ok(Self(raw))
            }

            /// Generate a fresh identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(generate_id())
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_id!(
    /// Identifier of a post.
    PostId,
    "post id"
);

string_id!(
    /// Identifier of a user, as forwarded by the gateway.
    UserId,
    "user id"
);
