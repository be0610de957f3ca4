//! Read-side listing service.
//!
//! Implements [`PostQuery`] by fetching posts through [`PostRepository`]
//! and handing them to the relation resolver.
//!
//! [`PostRepository`]: crate::domain::ports::PostRepository

use async_trait::async_trait;
use futures_util::try_join;
use serde_json::json;
use pagination::{PageRequest, PageRequestError, Paginated};
use tracing::debug;

use crate::domain::ports::{ListPostsRequest, PostQuery};
use crate::domain::relations::RelationResolver;
use crate::domain::stores::map_store_error;
use crate::domain::{
    Error, ListingPolicy, ListingStores, PostCard, PostDetail, PostId, PostListing, PostSort,
};

/// Listing queries over the relation store.
#[derive(Clone)]
pub struct PostQueryService {
    stores: ListingStores,
    policy: ListingPolicy,
}

impl PostQueryService {
    /// Create a query service reading through `stores`.
    pub fn new(stores: ListingStores, policy: ListingPolicy) -> Self {
        Self { stores, policy }
    }
}

#[async_trait]
impl PostQuery for PostQueryService {
    async fn list_posts(
        &self,
        request: ListPostsRequest,
    ) -> Result<Paginated<PostListing>, Error> {
        let window = PageRequest::new(request.page, request.limit, self.policy.default_page_size)
            .map_err(|err| match err {
                PageRequestError::OffsetOverflow { .. } => Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "page" })),
                PageRequestError::ZeroLimit => {
                    Error::internal(format!("invalid page size setting: {err}"))
                }
            })?;
        debug!(
            page = window.page(),
            limit = window.limit(),
            sort = ?request.sort,
            "listing posts"
        );

        let posts = &self.stores.posts;
        let (page, total) = try_join!(
            posts.find(&request.filter, request.sort, Some(window)),
            posts.count(&request.filter),
        )
        .map_err(map_store_error)?;

        let items = RelationResolver::new(&self.stores).listings(page).await?;
        Ok(Paginated::new(items, total, window.limit()))
    }

    async fn get_post(&self, id: &PostId) -> Result<PostDetail, Error> {
        let post = self
            .stores
            .posts
            .find_one(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))?;
        RelationResolver::new(&self.stores).detail(post).await
    }

    async fn new_posts(&self) -> Result<Vec<PostCard>, Error> {
        let mut posts = self
            .stores
            .posts
            .find_recent(self.policy.new_post_limit)
            .await
            .map_err(map_store_error)?;
        // Adapters return newest first; re-sort so ties are stable.
        posts.sort_by(|left, right| PostSort::NEWEST.compare(left, right));
        RelationResolver::new(&self.stores).cards(posts).await
    }
}
