//! Driving port for read-side post views.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::{Error, PostCard, PostDetail, PostFilter, PostId, PostListing, PostSort};

/// Listing page request.
///
/// `page` defaults to the first page and values below one clamp to it;
/// `limit` defaults to the configured page size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPostsRequest {
    pub filter: PostFilter,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<PostSort>,
}

/// Use-case port for browsing posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// One page of matching posts with relations resolved.
    async fn list_posts(&self, request: ListPostsRequest)
    -> Result<Paginated<PostListing>, Error>;

    /// A single post with every relation, votes and comments.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when absent.
    async fn get_post(&self, id: &PostId) -> Result<PostDetail, Error>;

    /// The newest posts as lightweight cards.
    async fn new_posts(&self) -> Result<Vec<PostCard>, Error>;
}
