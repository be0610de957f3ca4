//! Port for per-user wishlists.

use async_trait::async_trait;

use crate::domain::{PostId, UserId, Wishlist};

use super::StoreError;

/// Port for wishlist storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// The wishlist of `uid`, if one was ever created.
    async fn find_one(&self, uid: &UserId) -> Result<Option<Wishlist>, StoreError>;

    /// Append `post_id`, creating the wishlist when absent.
    ///
    /// Appending a post that is already saved fails with
    /// [`StoreError::DuplicateKey`].
    async fn push(&self, uid: &UserId, post_id: &PostId) -> Result<Wishlist, StoreError>;

    /// Remove `post_id`. Returns `None` when `uid` has no wishlist.
    async fn pull(&self, uid: &UserId, post_id: &PostId)
    -> Result<Option<Wishlist>, StoreError>;
}

/// Fixture implementation without stored wishlists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWishlistRepository;

#[async_trait]
impl WishlistRepository for FixtureWishlistRepository {
    async fn find_one(&self, _uid: &UserId) -> Result<Option<Wishlist>, StoreError> {
        Ok(None)
    }

    async fn push(&self, uid: &UserId, post_id: &PostId) -> Result<Wishlist, StoreError> {
        Ok(Wishlist {
            uid: uid.clone(),
            post_ids: vec![post_id.clone()],
        })
    }

    async fn pull(
        &self,
        _uid: &UserId,
        _post_id: &PostId,
    ) -> Result<Option<Wishlist>, StoreError> {
        Ok(None)
    }
}
