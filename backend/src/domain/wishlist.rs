//! Per-user saved posts.

use serde::{Deserialize, Serialize};

use crate::domain::{PostId, UserId};

/// A user's saved posts, in the order they were added.
///
/// ## Invariants
/// - `post_ids` holds no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub uid: UserId,
    pub post_ids: Vec<PostId>,
}

impl Wishlist {
    /// An empty wishlist for `uid`.
    pub fn empty(uid: UserId) -> Self {
        Self {
            uid,
            post_ids: Vec::new(),
        }
    }

    /// Whether `post_id` is saved.
    pub fn contains(&self, post_id: &PostId) -> bool {
        self.post_ids.contains(post_id)
    }

    /// Append `post_id` unless already saved. Returns whether it was added.
    pub fn push(&mut self, post_id: PostId) -> bool {
        if self.contains(&post_id) {
            return false;
        }
        self.post_ids.push(post_id);
        true
    }

    /// Remove `post_id` if present. Returns whether it was removed.
    pub fn pull(&mut self, post_id: &PostId) -> bool {
        let before = self.post_ids.len();
        self.post_ids.retain(|id| id != post_id);
        self.post_ids.len() != before
    }
}
