//! Expired-post sweeps.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{ExpiredPostsQuery, ExpiredPostsRequest};
use crate::domain::relations::RelationResolver;
use crate::domain::stores::map_store_error;
use crate::domain::{Error, ListingStores, PostListing};

/// Lists posts whose expiry has passed.
#[derive(Clone)]
pub struct ExpiryService {
    stores: ListingStores,
    clock: Arc<dyn Clock>,
}

impl ExpiryService {
    /// Create an expiry service reading the time from `clock`.
    pub fn new(stores: ListingStores, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }
}

#[async_trait]
impl ExpiredPostsQuery for ExpiryService {
    async fn list_expired_posts(
        &self,
        request: ExpiredPostsRequest,
    ) -> Result<Vec<PostListing>, Error> {
        let as_of = request.as_of.unwrap_or_else(|| self.clock.utc());
        let mut posts = self
            .stores
            .posts
            .find_expired(as_of, request.exclude_archived)
            .await
            .map_err(map_store_error)?;
        posts.retain(|post| post.expired.is_some_and(|expired| expired < as_of));
        posts.sort_by(|left, right| {
            right
                .expired
                .cmp(&left.expired)
                .then_with(|| left.id.cmp(&right.id))
        });
        debug!(%as_of, count = posts.len(), "expired posts listed");
        RelationResolver::new(&self.stores).listings(posts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use crate::domain::stores::test_support::StoreMocks;
    use crate::domain::test_fixtures::{fixture_clock, fixture_now, post_with};
    use chrono::Duration;
    use rstest::rstest;

    fn with_empty_relations(mut mocks: StoreMocks) -> StoreMocks {
        mocks.satellites.expect_find_images().returning(|_| Ok(Vec::new()));
        mocks.satellites.expect_find_attributes().returning(|_| Ok(Vec::new()));
        mocks.satellites.expect_find_overviews().returning(|_| Ok(Vec::new()));
        mocks.users.expect_find_many().returning(|_| Ok(Vec::new()));
        mocks.lookups.expect_find().returning(|_, _| Ok(Vec::new()));
        mocks
    }

    #[tokio::test]
    async fn defaults_to_clock_and_sorts_latest_expiry_first() {
        let now = fixture_now();
        let mut mocks = StoreMocks::default();
        mocks
            .posts
            .expect_find_expired()
            .withf(move |as_of, exclude| *as_of == now && !*exclude)
            .returning(move |_, _| {
                Ok(vec![
                    post_with("p-1", |post| post.expired = Some(now - Duration::days(3))),
                    post_with("p-2", |post| post.expired = Some(now - Duration::hours(1))),
                ])
            });
        let service = ExpiryService::new(with_empty_relations(mocks).into_stores(), fixture_clock());

        let listings = service
            .list_expired_posts(ExpiredPostsRequest::default())
            .await
            .expect("expired posts");

        let ids: Vec<&str> = listings.iter().map(|l| l.post.id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-1"]);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn forwards_archive_exclusion(#[case] exclude_archived: bool) {
        let mut mocks = StoreMocks::default();
        mocks
            .posts
            .expect_find_expired()
            .withf(move |_, exclude| *exclude == exclude_archived)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let service = ExpiryService::new(mocks.into_stores(), fixture_clock());

        let listings = service
            .list_expired_posts(ExpiredPostsRequest {
                as_of: None,
                exclude_archived,
            })
            .await
            .expect("expired posts");
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn posts_expiring_exactly_now_are_not_listed() {
        let now = fixture_now();
        let mut mocks = StoreMocks::default();
        mocks.posts.expect_find_expired().returning(move |_, _| {
            Ok(vec![
                post_with("p-edge", |post| post.expired = Some(now)),
                post_with("p-old", |post| {
                    post.expired = Some(now - Duration::days(1));
                    post.status = PostStatus::Archived;
                }),
            ])
        });
        let service = ExpiryService::new(with_empty_relations(mocks).into_stores(), fixture_clock());

        let listings = service
            .list_expired_posts(ExpiredPostsRequest {
                as_of: Some(now),
                exclude_archived: false,
            })
            .await
            .expect("expired posts");
        let ids: Vec<&str> = listings.iter().map(|l| l.post.id.as_str()).collect();
        assert_eq!(ids, vec!["p-old"]);
    }
}
