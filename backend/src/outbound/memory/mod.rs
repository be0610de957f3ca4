//! In-process listing store.
//!
//! Implements every repository port over plain collections behind one mutex,
//! so multi-table writes are atomic with respect to each other. Used when no
//! database is configured and by the integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::{
    EngagementRepository, LookupRepository, LookupUpsert, PostBundle, PostBundlePatch,
    PostRepository, ReportRepository, SatelliteRepository, StoreError, UserDirectory,
    WishlistRepository,
};
use crate::domain::{
    Attribute, Comment, ImageSet, LookupEntry, LookupKind, Overview, Post, PostFilter, PostId,
    PostLinkage, PostSort, PostStatus, Report, SatelliteRetention, UserId, UserSummary, Vote,
    Wishlist,
};

#[derive(Debug, Default)]
struct Tables {
    /// Posts in insertion order.
    posts: Vec<Post>,
    attributes: HashMap<String, Attribute>,
    images: HashMap<String, ImageSet>,
    overviews: HashMap<String, Overview>,
    lookups: HashMap<LookupKind, BTreeMap<String, String>>,
    users: HashMap<UserId, UserSummary>,
    votes: Vec<Vote>,
    comments: Vec<Comment>,
    wishlists: HashMap<UserId, Wishlist>,
    reports: Vec<Report>,
}

impl Tables {
    fn post_index(&self, id: &PostId) -> Option<usize> {
        self.posts.iter().position(|post| post.id == *id)
    }

    fn upsert_lookup(&mut self, kind: LookupKind, entry: &LookupEntry) -> LookupEntry {
        let table = self.lookups.entry(kind).or_default();
        let value = table
            .entry(entry.code.clone())
            .or_insert_with(|| entry.value.clone());
        LookupEntry::new(entry.code.clone(), value.clone())
    }

    fn upsert_lookups(&mut self, upserts: &[LookupUpsert]) {
        for upsert in upserts {
            self.upsert_lookup(upsert.kind, &upsert.entry);
        }
    }
}

/// Listing store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    tables: Mutex<Tables>,
}

impl InMemoryListingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::connection("in-memory store lock poisoned"))
    }

    /// Register a user profile. User accounts are managed elsewhere; this
    /// seeds the directory the listing views read from.
    pub fn insert_user(&self, user: UserSummary) -> Result<(), StoreError> {
        self.lock()?.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Record a vote, replacing any earlier vote by the same user.
    pub fn insert_vote(&self, vote: Vote) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables
            .votes
            .retain(|existing| existing.post_id != vote.post_id || existing.user_id != vote.user_id);
        tables.votes.push(vote);
        Ok(())
    }

    /// Record a comment.
    pub fn insert_comment(&self, comment: Comment) -> Result<(), StoreError> {
        self.lock()?.comments.push(comment);
        Ok(())
    }

    /// Set the publication status of a post. Returns whether it exists.
    pub fn set_status(&self, id: &PostId, status: PostStatus) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let Some(post) = tables.posts.iter_mut().find(|post| post.id == *id) else {
            return Ok(false);
        };
        post.status = status;
        Ok(true)
    }

    /// Reports filed so far, oldest first.
    pub fn reports(&self) -> Result<Vec<Report>, StoreError> {
        Ok(self.lock()?.reports.clone())
    }
}

fn window_of(posts: Vec<Post>, window: Option<PageRequest>) -> Vec<Post> {
    let Some(window) = window else {
        return posts;
    };
    let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(window.limit()).unwrap_or(usize::MAX);
    posts.into_iter().skip(skip).take(take).collect()
}

fn pick<T: Clone>(table: &HashMap<String, T>, ids: &[String]) -> Vec<T> {
    ids.iter().filter_map(|id| table.get(id)).cloned().collect()
}

#[async_trait]
impl PostRepository for InMemoryListingStore {
    async fn find(
        &self,
        filter: &PostFilter,
        sort: Option<PostSort>,
        window: Option<PageRequest>,
    ) -> Result<Vec<Post>, StoreError> {
        let tables = self.lock()?;
        let mut matches: Vec<Post> = tables
            .posts
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            matches.sort_by(|left, right| sort.compare(left, right));
        }
        Ok(window_of(matches, window))
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, StoreError> {
        let tables = self.lock()?;
        let total = tables.posts.iter().filter(|post| filter.matches(post)).count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    async fn find_one(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.posts.iter().find(|post| post.id == *id).cloned())
    }

    async fn find_many(&self, ids: &[PostId]) -> Result<Vec<Post>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .posts
            .iter()
            .filter(|post| ids.contains(&post.id))
            .cloned()
            .collect())
    }

    async fn find_recent(&self, limit: u32) -> Result<Vec<Post>, StoreError> {
        let tables = self.lock()?;
        let mut posts = tables.posts.clone();
        posts.sort_by(|left, right| PostSort::NEWEST.compare(left, right));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_expired(
        &self,
        now: DateTime<Utc>,
        exclude_archived: bool,
    ) -> Result<Vec<Post>, StoreError> {
        let tables = self.lock()?;
        let mut expired: Vec<Post> = tables
            .posts
            .iter()
            .filter(|post| post.expired.is_some_and(|at| at < now))
            .filter(|post| !exclude_archived || post.status != PostStatus::Archived)
            .cloned()
            .collect();
        expired.sort_by(|left, right| {
            right
                .expired
                .cmp(&left.expired)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(expired)
    }

    async fn create(&self, bundle: &PostBundle) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.post_index(&bundle.post.id).is_some() {
            return Err(StoreError::duplicate_key(format!(
                "post {} already exists",
                bundle.post.id
            )));
        }
        let satellite_taken = tables.attributes.contains_key(&bundle.attribute.id)
            || tables.images.contains_key(&bundle.images.id)
            || tables.overviews.contains_key(&bundle.overview.id);
        if satellite_taken {
            return Err(StoreError::duplicate_key(format!(
                "satellite of post {} already exists",
                bundle.post.id
            )));
        }

        tables.upsert_lookups(&bundle.lookups);
        tables
            .attributes
            .insert(bundle.attribute.id.clone(), bundle.attribute.clone());
        tables
            .images
            .insert(bundle.images.id.clone(), bundle.images.clone());
        tables
            .overviews
            .insert(bundle.overview.id.clone(), bundle.overview.clone());
        tables.posts.push(bundle.post.clone());
        debug!(post_id = %bundle.post.id, "post stored in memory");
        Ok(())
    }

    async fn update(
        &self,
        linkage: &PostLinkage,
        patch: &PostBundlePatch,
    ) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let Some(index) = tables.post_index(&linkage.post_id) else {
            return Ok(0);
        };

        tables.upsert_lookups(&patch.lookups);
        if let Some(post) = tables.posts.get_mut(index) {
            let changes = &patch.post;
            post.title.clone_from(&changes.title);
            post.label_code.clone_from(&changes.label_code);
            post.address.clone_from(&changes.address);
            post.category_code.clone_from(&changes.category_code);
            post.description.clone_from(&changes.description);
            post.area_code.clone_from(&changes.area_code);
            post.price_code.clone_from(&changes.price_code);
            post.province_code.clone_from(&changes.province_code);
            post.price_number = changes.price_number;
            post.area_number = changes.area_number;
            post.updated_at = changes.updated_at;
        }
        if let Some(attribute) = tables.attributes.get_mut(&linkage.attributes_id) {
            attribute.price.clone_from(&patch.attribute.price);
            attribute.acreage.clone_from(&patch.attribute.acreage);
        }
        if let Some(images) = tables.images.get_mut(&linkage.images_id) {
            images.urls.clone_from(&patch.image_urls);
        }
        if let Some(overview) = tables.overviews.get_mut(&linkage.overview_id) {
            overview.area.clone_from(&patch.overview.area);
            overview.kind.clone_from(&patch.overview.kind);
            overview.target.clone_from(&patch.overview.target);
        }
        Ok(1)
    }

    async fn delete_one(
        &self,
        id: &PostId,
        retention: SatelliteRetention,
    ) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let Some(index) = tables.post_index(id) else {
            return Ok(0);
        };
        let post = tables.posts.remove(index);
        if retention == SatelliteRetention::Cascade {
            tables.attributes.remove(&post.attributes_id);
            tables.images.remove(&post.images_id);
            tables.overviews.remove(&post.overview_id);
        }
        Ok(1)
    }
}

#[async_trait]
impl SatelliteRepository for InMemoryListingStore {
    async fn find_attributes(&self, ids: &[String]) -> Result<Vec<Attribute>, StoreError> {
        Ok(pick(&self.lock()?.attributes, ids))
    }

    async fn find_images(&self, ids: &[String]) -> Result<Vec<ImageSet>, StoreError> {
        Ok(pick(&self.lock()?.images, ids))
    }

    async fn find_overviews(&self, ids: &[String]) -> Result<Vec<Overview>, StoreError> {
        Ok(pick(&self.lock()?.overviews, ids))
    }
}

#[async_trait]
impl LookupRepository for InMemoryListingStore {
    async fn find(
        &self,
        kind: LookupKind,
        codes: &[String],
    ) -> Result<Vec<LookupEntry>, StoreError> {
        let tables = self.lock()?;
        let Some(table) = tables.lookups.get(&kind) else {
            return Ok(Vec::new());
        };
        Ok(codes
            .iter()
            .filter_map(|code| {
                table
                    .get(code)
                    .map(|value| LookupEntry::new(code.clone(), value.clone()))
            })
            .collect())
    }

    async fn upsert(
        &self,
        kind: LookupKind,
        entry: &LookupEntry,
    ) -> Result<LookupEntry, StoreError> {
        Ok(self.lock()?.upsert_lookup(kind, entry))
    }
}

#[async_trait]
impl UserDirectory for InMemoryListingStore {
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserSummary>, StoreError> {
        let tables = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EngagementRepository for InMemoryListingStore {
    async fn votes_for(&self, post_id: &PostId) -> Result<Vec<Vote>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .votes
            .iter()
            .filter(|vote| vote.post_id == *post_id)
            .cloned()
            .collect())
    }

    async fn comments_for(&self, post_id: &PostId) -> Result<Vec<Comment>, StoreError> {
        let tables = self.lock()?;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|comment| comment.post_id == *post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.created_at);
        Ok(comments)
    }
}

#[async_trait]
impl WishlistRepository for InMemoryListingStore {
    async fn find_one(&self, uid: &UserId) -> Result<Option<Wishlist>, StoreError> {
        Ok(self.lock()?.wishlists.get(uid).cloned())
    }

    async fn push(&self, uid: &UserId, post_id: &PostId) -> Result<Wishlist, StoreError> {
        let mut tables = self.lock()?;
        let wishlist = tables
            .wishlists
            .entry(uid.clone())
            .or_insert_with(|| Wishlist::empty(uid.clone()));
        if !wishlist.push(post_id.clone()) {
            return Err(StoreError::duplicate_key(format!(
                "post {post_id} already saved by {uid}"
            )));
        }
        Ok(wishlist.clone())
    }

    async fn pull(
        &self,
        uid: &UserId,
        post_id: &PostId,
    ) -> Result<Option<Wishlist>, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables.wishlists.get_mut(uid).map(|wishlist| {
            wishlist.pull(post_id);
            wishlist.clone()
        }))
    }
}

#[async_trait]
impl ReportRepository for InMemoryListingStore {
    async fn insert(&self, report: &Report) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.reports.iter().any(|existing| existing.id == report.id) {
            return Err(StoreError::duplicate_key(format!(
                "report {} already exists",
                report.id
            )));
        }
        tables.reports.push(report.clone());
        Ok(())
    }
}
