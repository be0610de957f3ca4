//! Votes, comments and reports attached to posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PostId, UserId};

/// Highest star rating a vote may carry.
pub const MAX_VOTE: u8 = 5;

/// A star rating left by a user. One per user per post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub post_id: PostId,
    pub user_id: UserId,
    /// Stars in `1..=MAX_VOTE`.
    pub value: u8,
}

/// A comment left on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: PostId,
    pub commentator_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only abuse report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub post_id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
