//! Post records.
//!
//! A post is a flat record. It points at its three satellite rows by id and
//! at shared lookup rows by code; nothing is embedded.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PostId, UserId};

/// Publication status stored on a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Visible and eligible for expiry notices.
    #[default]
    Active,
    /// Kept for reference; excluded from expiry notices.
    Archived,
}

impl PostStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status: {0}")]
pub struct ParsePostStatusError(pub String);

impl FromStr for PostStatus {
    type Err = ParsePostStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(ParsePostStatusError(other.to_owned())),
        }
    }
}

/// Stored post row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub star: i32,
    pub address: Option<String>,
    /// JSON-serialised description as submitted.
    pub description: Option<String>,
    pub label_code: String,
    pub category_code: String,
    pub province_code: Option<String>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    /// Monthly price in millions.
    pub price_number: f64,
    /// Floor area in square metres.
    pub area_number: f64,
    pub attributes_id: String,
    pub images_id: String,
    pub overview_id: String,
    pub user_id: UserId,
    pub expired: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the post has reached its expiry at `now`.
    ///
    /// Posts without an expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expired.is_some_and(|expired| now >= expired)
    }

    /// Identity of the satellite rows owned by this post.
    pub fn linkage(&self) -> PostLinkage {
        PostLinkage {
            post_id: self.id.clone(),
            attributes_id: self.attributes_id.clone(),
            images_id: self.images_id.clone(),
            overview_id: self.overview_id.clone(),
        }
    }
}

/// The post id plus the ids of its three satellites.
///
/// Updates patch rows by this stored identity and never rewrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLinkage {
    pub post_id: PostId,
    pub attributes_id: String,
    pub images_id: String,
    pub overview_id: String,
}
