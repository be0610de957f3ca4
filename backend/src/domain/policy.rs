//! Tunables shared by the listing services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What happens to a post's attribute, image and overview rows when the
/// post is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SatelliteRetention {
    /// Leave the satellite rows in place.
    #[default]
    Retain,
    /// Delete the satellite rows in the same transaction as the post.
    Cascade,
}

impl SatelliteRetention {
    /// Configuration spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Cascade => "cascade",
        }
    }
}

impl fmt::Display for SatelliteRetention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for unknown retention settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown satellite retention `{0}`; expected `retain` or `cascade`")]
pub struct ParseSatelliteRetentionError(pub String);

impl FromStr for SatelliteRetention {
    type Err = ParseSatelliteRetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "cascade" => Ok(Self::Cascade),
            _ => Err(ParseSatelliteRetentionError(s.to_owned())),
        }
    }
}

/// Default number of posts per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Default number of cards returned by the new-posts widget.
pub const DEFAULT_NEW_POST_LIMIT: u32 = 10;
/// Default lifetime of a post before it expires.
pub const DEFAULT_POST_LIFETIME_DAYS: u32 = 10;

/// Listing behaviour resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    pub default_page_size: u32,
    pub new_post_limit: u32,
    pub post_lifetime_days: u32,
    pub retention: SatelliteRetention,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            new_post_limit: DEFAULT_NEW_POST_LIMIT,
            post_lifetime_days: DEFAULT_POST_LIFETIME_DAYS,
            retention: SatelliteRetention::Retain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("retain", SatelliteRetention::Retain)]
    #[case("Cascade", SatelliteRetention::Cascade)]
    #[case(" cascade ", SatelliteRetention::Cascade)]
    fn retention_parses_case_insensitively(
        #[case] raw: &str,
        #[case] expected: SatelliteRetention,
    ) {
        assert_eq!(raw.parse(), Ok(expected));
    }

    #[rstest]
    fn unknown_retention_is_rejected() {
        let err = "purge".parse::<SatelliteRetention>().expect_err("unknown");
        assert!(err.to_string().contains("purge"));
    }

    #[rstest]
    fn default_policy_retains_satellites() {
        let policy = ListingPolicy::default();
        assert_eq!(policy.retention, SatelliteRetention::Retain);
        assert_eq!(policy.default_page_size, 10);
        assert_eq!(policy.post_lifetime_days, 10);
    }
}
