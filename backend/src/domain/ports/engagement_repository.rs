//! Port for votes and comments shown on the post page.

use async_trait::async_trait;

use crate::domain::{Comment, PostId, Vote};

use super::StoreError;

/// Read access to per-post engagement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Votes cast on `post_id`.
    async fn votes_for(&self, post_id: &PostId) -> Result<Vec<Vote>, StoreError>;

    /// Comments on `post_id`, oldest first.
    async fn comments_for(&self, post_id: &PostId) -> Result<Vec<Comment>, StoreError>;
}

/// Fixture implementation with no engagement.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEngagementRepository;

#[async_trait]
impl EngagementRepository for FixtureEngagementRepository {
    async fn votes_for(&self, _post_id: &PostId) -> Result<Vec<Vote>, StoreError> {
        Ok(Vec::new())
    }

    async fn comments_for(&self, _post_id: &PostId) -> Result<Vec<Comment>, StoreError> {
        Ok(Vec::new())
    }
}
