//! Port for reading satellite rows in keyed batches.

use async_trait::async_trait;

use crate::domain::{Attribute, ImageSet, Overview};

use super::StoreError;

/// Keyed batch lookups for the rows owned by posts.
///
/// Each method returns the rows whose ids appear in `ids`, in any order.
/// Unknown ids are skipped rather than reported.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SatelliteRepository: Send + Sync {
    /// Fetch attribute rows by id.
    async fn find_attributes(&self, ids: &[String]) -> Result<Vec<Attribute>, StoreError>;

    /// Fetch image rows by id.
    async fn find_images(&self, ids: &[String]) -> Result<Vec<ImageSet>, StoreError>;

    /// Fetch overview rows by id.
    async fn find_overviews(&self, ids: &[String]) -> Result<Vec<Overview>, StoreError>;
}

/// Fixture implementation holding no satellites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSatelliteRepository;

#[async_trait]
impl SatelliteRepository for FixtureSatelliteRepository {
    async fn find_attributes(&self, _ids: &[String]) -> Result<Vec<Attribute>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_images(&self, _ids: &[String]) -> Result<Vec<ImageSet>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_overviews(&self, _ids: &[String]) -> Result<Vec<Overview>, StoreError> {
        Ok(Vec::new())
    }
}
