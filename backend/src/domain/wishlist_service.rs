//! Wishlist membership and saved-post reads.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{StoreError, WishlistCommand, WishlistQuery};
use crate::domain::relations::RelationResolver;
use crate::domain::stores::map_store_error;
use crate::domain::{Error, ListingStores, PostId, PostListing, UserId, Wishlist};

/// Wishlist commands and queries over the relation store.
#[derive(Clone)]
pub struct WishlistService {
    stores: ListingStores,
}

impl WishlistService {
    /// Create a wishlist service.
    pub fn new(stores: ListingStores) -> Self {
        Self { stores }
    }

    async fn require_post(&self, post_id: &PostId) -> Result<(), Error> {
        let found = self
            .stores
            .posts
            .find_one(post_id)
            .await
            .map_err(map_store_error)?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("post {post_id} not found"))),
        }
    }

    fn already_saved(post_id: &PostId) -> Error {
        Error::already_exists(format!("post {post_id} is already in the wishlist"))
    }
}

#[async_trait]
impl WishlistCommand for WishlistService {
    async fn add_to_wishlist(&self, uid: &UserId, post_id: &PostId) -> Result<Wishlist, Error> {
        self.require_post(post_id).await?;

        let existing = self
            .stores
            .wishlists
            .find_one(uid)
            .await
            .map_err(map_store_error)?;
        if existing.is_some_and(|wishlist| wishlist.contains(post_id)) {
            return Err(Self::already_saved(post_id));
        }

        // A concurrent add can still win between the check and the push.
        let wishlist = self
            .stores
            .wishlists
            .push(uid, post_id)
            .await
            .map_err(|err| match err {
                StoreError::DuplicateKey { .. } => Self::already_saved(post_id),
                other => map_store_error(other),
            })?;
        debug!(user_id = %uid, post_id = %post_id, "post saved to wishlist");
        Ok(wishlist)
    }

    async fn remove_from_wishlist(
        &self,
        uid: &UserId,
        post_id: &PostId,
    ) -> Result<Wishlist, Error> {
        self.require_post(post_id).await?;

        let wishlist = self
            .stores
            .wishlists
            .pull(uid, post_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("wishlist for user {uid} not found")))?;
        debug!(user_id = %uid, post_id = %post_id, "post removed from wishlist");
        Ok(wishlist)
    }
}

#[async_trait]
impl WishlistQuery for WishlistService {
    async fn saved_posts(&self, uid: &UserId) -> Result<Vec<PostListing>, Error> {
        let Some(wishlist) = self
            .stores
            .wishlists
            .find_one(uid)
            .await
            .map_err(map_store_error)?
        else {
            return Ok(Vec::new());
        };
        if wishlist.post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = self
            .stores
            .posts
            .find_many(&wishlist.post_ids)
            .await
            .map_err(map_store_error)?;
        let mut ordered = Vec::with_capacity(found.len());
        let mut remaining = found;
        for id in &wishlist.post_ids {
            if let Some(position) = remaining.iter().position(|post| &post.id == id) {
                ordered.push(remaining.swap_remove(position));
            }
        }
        RelationResolver::new(&self.stores).listings(ordered).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::stores::test_support::StoreMocks;
    use crate::domain::test_fixtures::{post_id, post_with, user_id};

    fn service(mocks: StoreMocks) -> WishlistService {
        WishlistService::new(mocks.into_stores())
    }

    fn post_exists(mocks: &mut StoreMocks) {
        mocks
            .posts
            .expect_find_one()
            .returning(|id| Ok(Some(post_with(id.as_str(), |_| {}))));
    }

    fn saved(ids: &[&str]) -> Wishlist {
        Wishlist {
            uid: user_id("u-1"),
            post_ids: ids.iter().map(|id| post_id(id)).collect(),
        }
    }

    #[tokio::test]
    async fn add_creates_or_appends() {
        let mut mocks = StoreMocks::default();
        post_exists(&mut mocks);
        mocks.wishlists.expect_find_one().returning(|_| Ok(None));
        mocks
            .wishlists
            .expect_push()
            .times(1)
            .returning(|_, post| Ok(saved(&[post.as_str()])));

        let wishlist = service(mocks)
            .add_to_wishlist(&user_id("u-1"), &post_id("p-1"))
            .await
            .expect("added");
        assert_eq!(wishlist.post_ids, vec![post_id("p-1")]);
    }

    #[tokio::test]
    async fn add_rejects_missing_post() {
        let mut mocks = StoreMocks::default();
        mocks.posts.expect_find_one().returning(|_| Ok(None));

        let err = service(mocks)
            .add_to_wishlist(&user_id("u-1"), &post_id("p-404"))
            .await
            .expect_err("missing post");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn add_rejects_already_saved_post() {
        let mut mocks = StoreMocks::default();
        post_exists(&mut mocks);
        mocks
            .wishlists
            .expect_find_one()
            .returning(|_| Ok(Some(saved(&["p-1"]))));

        let err = service(mocks)
            .add_to_wishlist(&user_id("u-1"), &post_id("p-1"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn concurrent_duplicate_push_is_already_exists() {
        let mut mocks = StoreMocks::default();
        post_exists(&mut mocks);
        mocks.wishlists.expect_find_one().returning(|_| Ok(None));
        mocks
            .wishlists
            .expect_push()
            .returning(|_, _| Err(StoreError::duplicate_key("wishlist_posts_pkey")));

        let err = service(mocks)
            .add_to_wishlist(&user_id("u-1"), &post_id("p-1"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn remove_without_wishlist_is_not_found() {
        let mut mocks = StoreMocks::default();
        post_exists(&mut mocks);
        mocks.wishlists.expect_pull().returning(|_, _| Ok(None));

        let err = service(mocks)
            .remove_from_wishlist(&user_id("u-1"), &post_id("p-1"))
            .await
            .expect_err("no wishlist");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn remove_pulls_post() {
        let mut mocks = StoreMocks::default();
        post_exists(&mut mocks);
        mocks
            .wishlists
            .expect_pull()
            .returning(|_, _| Ok(Some(saved(&["p-2"]))));

        let wishlist = service(mocks)
            .remove_from_wishlist(&user_id("u-1"), &post_id("p-1"))
            .await
            .expect("removed");
        assert!(!wishlist.contains(&post_id("p-1")));
    }

    #[tokio::test]
    async fn saved_posts_follow_wishlist_order_and_skip_deleted() {
        let mut mocks = StoreMocks::default();
        mocks
            .wishlists
            .expect_find_one()
            .returning(|_| Ok(Some(saved(&["p-3", "p-gone", "p-1"]))));
        mocks.posts.expect_find_many().returning(|_| {
            Ok(vec![post_with("p-1", |_| {}), post_with("p-3", |_| {})])
        });
        mocks.satellites.expect_find_images().returning(|_| Ok(Vec::new()));
        mocks.satellites.expect_find_attributes().returning(|_| Ok(Vec::new()));
        mocks.satellites.expect_find_overviews().returning(|_| Ok(Vec::new()));
        mocks.users.expect_find_many().returning(|_| Ok(Vec::new()));
        mocks.lookups.expect_find().returning(|_, _| Ok(Vec::new()));

        let listings = service(mocks)
            .saved_posts(&user_id("u-1"))
            .await
            .expect("saved posts");
        let ids: Vec<&str> = listings.iter().map(|l| l.post.id.as_str()).collect();
        assert_eq!(ids, vec!["p-3", "p-1"]);
    }

    #[tokio::test]
    async fn saved_posts_without_wishlist_is_empty() {
        let mut mocks = StoreMocks::default();
        mocks.wishlists.expect_find_one().returning(|_| Ok(None));

        let listings = service(mocks)
            .saved_posts(&user_id("u-1"))
            .await
            .expect("saved posts");
        assert!(listings.is_empty());
    }
}
