//! Read-optimised aggregates returned by the listing queries.
//!
//! Every relation is optional: a dangling id or code resolves to `None`
//! rather than failing the read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    Attribute, Comment, ImageSet, LookupEntry, Overview, Post, PostId, UserSummary, Vote,
};

/// A post with the relations shown on listing pages.
///
/// Post fields are flattened into the top level of the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListing {
    #[serde(flatten)]
    pub post: Post,
    pub images: Option<ImageSet>,
    pub attributes: Option<Attribute>,
    pub user: Option<UserSummary>,
    pub overview: Option<Overview>,
    pub label: Option<LookupEntry>,
    pub category: Option<LookupEntry>,
}

/// A vote together with the voter's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteView {
    #[serde(flatten)]
    pub vote: Vote,
    pub user_data: Option<UserSummary>,
}

/// A comment together with the commentator's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub commentator: Option<UserSummary>,
}

/// Everything shown on the post page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub listing: PostListing,
    pub province: Option<LookupEntry>,
    pub votes: Vec<VoteView>,
    pub comments: Vec<CommentView>,
}

/// Compact card for the new-posts widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub star: i32,
    pub created_at: DateTime<Utc>,
    pub images: Option<ImageSet>,
    pub attributes: Option<Attribute>,
}

impl PostCard {
    /// Build a card from a post and its resolved satellites.
    pub fn new(post: Post, images: Option<ImageSet>, attributes: Option<Attribute>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            star: post.star,
            created_at: post.created_at,
            images,
            attributes,
        }
    }
}
