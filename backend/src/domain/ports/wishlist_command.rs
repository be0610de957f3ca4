//! Driving port for wishlist membership changes.

use async_trait::async_trait;

use crate::domain::{Error, PostId, UserId, Wishlist};

/// Use-case port for saving and unsaving posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistCommand: Send + Sync {
    /// Save `post_id` for `uid`.
    ///
    /// Fails with `NotFound` when the post is absent and with
    /// `AlreadyExists` when it is already saved.
    async fn add_to_wishlist(&self, uid: &UserId, post_id: &PostId) -> Result<Wishlist, Error>;

    /// Unsave `post_id` for `uid`.
    ///
    /// Fails with `NotFound` when the post or the wishlist is absent.
    async fn remove_from_wishlist(
        &self,
        uid: &UserId,
        post_id: &PostId,
    ) -> Result<Wishlist, Error>;
}
