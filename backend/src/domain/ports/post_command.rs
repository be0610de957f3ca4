//! Driving port for post writes.

use async_trait::async_trait;

use crate::domain::{Error, PostDraft, PostId, Report, UserId};

/// Abuse report submitted against a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub post_id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub reason: String,
}

/// Use-case port for the post lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Validate `draft` and persist a new post owned by `user_id`.
    async fn create_post(&self, draft: PostDraft, user_id: &UserId) -> Result<PostId, Error>;

    /// Re-derive and patch an existing post and its satellites.
    async fn update_post(&self, post_id: &PostId, draft: PostDraft) -> Result<(), Error>;

    /// Delete a post. Fails with `NotFound` when nothing was removed.
    async fn delete_post(&self, post_id: &PostId) -> Result<(), Error>;

    /// Record an abuse report against an existing post.
    async fn report_post(&self, request: ReportRequest) -> Result<Report, Error>;
}
