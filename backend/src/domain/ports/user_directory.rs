//! Port for resolving user ids to public profiles.

use async_trait::async_trait;

use crate::domain::{UserId, UserSummary};

use super::StoreError;

/// Read-only access to user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Profiles for the given ids; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserSummary>, StoreError>;
}

/// Fixture implementation that knows no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_many(&self, _ids: &[UserId]) -> Result<Vec<UserSummary>, StoreError> {
        Ok(Vec::new())
    }
}
