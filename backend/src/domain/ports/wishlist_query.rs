//! Driving port for reading a user's saved posts.

use async_trait::async_trait;

use crate::domain::{Error, PostListing, UserId};

/// Use-case port for the saved-posts page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistQuery: Send + Sync {
    /// Saved posts in wishlist order. Posts deleted since saving are skipped.
    async fn saved_posts(&self, uid: &UserId) -> Result<Vec<PostListing>, Error>;
}
