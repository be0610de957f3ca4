//! Driving port for expiry sweeps and notifications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, PostListing};

/// Expired-post query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiredPostsRequest {
    /// Reference instant; the service clock when unset.
    pub as_of: Option<DateTime<Utc>>,
    /// Skip posts with status `archived`.
    pub exclude_archived: bool,
}

/// Use-case port listing posts past their expiry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpiredPostsQuery: Send + Sync {
    /// Posts with `expired < as_of`, latest expiry first.
    async fn list_expired_posts(
        &self,
        request: ExpiredPostsRequest,
    ) -> Result<Vec<PostListing>, Error>;
}
