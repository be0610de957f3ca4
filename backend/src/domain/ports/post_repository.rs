//! Port for post persistence.
//!
//! Posts are written together with their satellites and lookup upserts, so
//! the write methods take whole bundles and adapters apply each bundle
//! atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{
    Attribute, ImageSet, LookupEntry, LookupKind, Overview, Post, PostFilter, PostId, PostLinkage,
    PostSort, SatelliteRetention,
};

use super::StoreError;

/// A lookup row to insert if its code is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupUpsert {
    pub kind: LookupKind,
    pub entry: LookupEntry,
}

/// A new post and everything created alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PostBundle {
    pub post: Post,
    pub attribute: Attribute,
    pub images: ImageSet,
    pub overview: Overview,
    pub lookups: Vec<LookupUpsert>,
}

/// Post columns rewritten by an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPatch {
    pub title: String,
    pub label_code: String,
    pub address: Option<String>,
    pub category_code: String,
    pub description: Option<String>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    pub province_code: Option<String>,
    pub price_number: f64,
    pub area_number: f64,
    pub updated_at: DateTime<Utc>,
}

/// Attribute columns rewritten by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePatch {
    pub price: String,
    pub acreage: String,
}

/// Overview columns rewritten by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewPatch {
    pub area: String,
    pub kind: Option<String>,
    pub target: Option<String>,
}

/// Every change applied by an edit, keyed later by [`PostLinkage`].
#[derive(Debug, Clone, PartialEq)]
pub struct PostBundlePatch {
    pub post: PostPatch,
    pub attribute: AttributePatch,
    pub image_urls: Vec<String>,
    pub overview: OverviewPatch,
    pub lookups: Vec<LookupUpsert>,
}

/// Port for post storage and the listing access patterns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts matching `filter`, ordered by `sort` when given, windowed by
    /// `window` when given. Without a sort the order is unspecified.
    async fn find(
        &self,
        filter: &PostFilter,
        sort: Option<PostSort>,
        window: Option<PageRequest>,
    ) -> Result<Vec<Post>, StoreError>;

    /// Count of posts matching `filter`, ignoring any window.
    async fn count(&self, filter: &PostFilter) -> Result<u64, StoreError>;

    /// Fetch one post by id.
    async fn find_one(&self, id: &PostId) -> Result<Option<Post>, StoreError>;

    /// Fetch the posts with the given ids. Missing ids are skipped and the
    /// result order is unspecified.
    async fn find_many(&self, ids: &[PostId]) -> Result<Vec<Post>, StoreError>;

    /// The `limit` most recently created posts, newest first.
    async fn find_recent(&self, limit: u32) -> Result<Vec<Post>, StoreError>;

    /// Posts whose expiry is strictly before `now`, latest expiry first.
    async fn find_expired(
        &self,
        now: DateTime<Utc>,
        exclude_archived: bool,
    ) -> Result<Vec<Post>, StoreError>;

    /// Insert the post, its satellites and its lookup rows atomically.
    ///
    /// An id collision surfaces as [`StoreError::DuplicateKey`].
    async fn create(&self, bundle: &PostBundle) -> Result<(), StoreError>;

    /// Patch the post and its satellites by stored identity and upsert the
    /// lookup rows, atomically. Returns the number of post rows updated.
    async fn update(
        &self,
        linkage: &PostLinkage,
        patch: &PostBundlePatch,
    ) -> Result<u64, StoreError>;

    /// Delete a post, removing its satellites too under
    /// [`SatelliteRetention::Cascade`]. Returns the number of post rows
    /// removed.
    async fn delete_one(
        &self,
        id: &PostId,
        retention: SatelliteRetention,
    ) -> Result<u64, StoreError>;
}

/// Fixture implementation holding no posts.
///
/// Writes succeed without effect and report zero affected rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostRepository;

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn find(
        &self,
        _filter: &PostFilter,
        _sort: Option<PostSort>,
        _window: Option<PageRequest>,
    ) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn count(&self, _filter: &PostFilter) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn find_one(&self, _id: &PostId) -> Result<Option<Post>, StoreError> {
        Ok(None)
    }

    async fn find_many(&self, _ids: &[PostId]) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_recent(&self, _limit: u32) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_expired(
        &self,
        _now: DateTime<Utc>,
        _exclude_archived: bool,
    ) -> Result<Vec<Post>, StoreError> {
        Ok(Vec::new())
    }

    async fn create(&self, _bundle: &PostBundle) -> Result<(), StoreError> {
        Ok(())
    }

    async fn update(
        &self,
        _linkage: &PostLinkage,
        _patch: &PostBundlePatch,
    ) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn delete_one(
        &self,
        _id: &PostId,
        _retention: SatelliteRetention,
    ) -> Result<u64, StoreError> {
        Ok(0)
    }
}
