//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! the repositories stay thin.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;

use crate::domain::ports::StoreError;
use crate::domain::{
    Attribute, Comment, ImageSet, LookupEntry, Overview, Post, PostId, PostStatus, Report,
    UserId, UserSummary, Vote, Wishlist,
};

use super::schema::{
    attributes, comments, images, overviews, posts, reports, users, votes, wishlists,
};

fn stored_post_id(raw: String) -> Result<PostId, StoreError> {
    PostId::new(raw).map_err(|err| StoreError::query(format!("stored post id: {err}")))
}

fn stored_user_id(raw: String) -> Result<UserId, StoreError> {
    UserId::new(raw).map_err(|err| StoreError::query(format!("stored user id: {err}")))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: String,
    pub title: String,
    #[diesel(column_name = star_rating)]
    pub star: i32,
    pub address: Option<String>,
    pub description: Option<String>,
    pub label_code: String,
    pub category_code: String,
    pub province_code: Option<String>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    pub price_number: f64,
    pub area_number: f64,
    pub attributes_id: String,
    pub images_id: String,
    pub overview_id: String,
    pub user_id: String,
    pub expired: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().unwrap_or_else(|_| {
            warn!(
                value = row.status.as_str(),
                post_id = row.id.as_str(),
                "unrecognised post status, treating as active"
            );
            PostStatus::Active
        });
        Ok(Self {
            id: stored_post_id(row.id)?,
            title: row.title,
            star: row.star,
            address: row.address,
            description: row.description,
            label_code: row.label_code,
            category_code: row.category_code,
            province_code: row.province_code,
            area_code: row.area_code,
            price_code: row.price_code,
            price_number: row.price_number,
            area_number: row.area_number,
            attributes_id: row.attributes_id,
            images_id: row.images_id,
            overview_id: row.overview_id,
            user_id: stored_user_id(row.user_id)?,
            expired: row.expired,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for creating post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[diesel(column_name = star_rating)]
    pub star: i32,
    pub address: Option<&'a str>,
    pub description: Option<&'a str>,
    pub label_code: &'a str,
    pub category_code: &'a str,
    pub province_code: Option<&'a str>,
    pub area_code: Option<&'a str>,
    pub price_code: Option<&'a str>,
    pub price_number: f64,
    pub area_number: f64,
    pub attributes_id: &'a str,
    pub images_id: &'a str,
    pub overview_id: &'a str,
    pub user_id: &'a str,
    pub expired: Option<DateTime<Utc>>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Post> for NewPostRow<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: post.id.as_str(),
            title: &post.title,
            star: post.star,
            address: post.address.as_deref(),
            description: post.description.as_deref(),
            label_code: &post.label_code,
            category_code: &post.category_code,
            province_code: post.province_code.as_deref(),
            area_code: post.area_code.as_deref(),
            price_code: post.price_code.as_deref(),
            price_number: post.price_number,
            area_number: post.area_number,
            attributes_id: &post.attributes_id,
            images_id: &post.images_id,
            overview_id: &post.overview_id,
            user_id: post.user_id.as_str(),
            expired: post.expired,
            status: post.status.as_str(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Changeset applied to a post by an edit.
///
/// `None` on an optional column writes `NULL` so cleared fields stay
/// cleared.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PostChangeset<'a> {
    pub title: &'a str,
    pub label_code: &'a str,
    pub address: Option<&'a str>,
    pub category_code: &'a str,
    pub description: Option<&'a str>,
    pub area_code: Option<&'a str>,
    pub price_code: Option<&'a str>,
    pub province_code: Option<&'a str>,
    pub price_number: f64,
    pub area_number: f64,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Satellites
// ---------------------------------------------------------------------------

/// Row struct for the attributes table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = attributes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttributeRow {
    pub id: String,
    pub price: String,
    pub acreage: String,
    pub published: String,
    pub hashtag: String,
}

impl From<AttributeRow> for Attribute {
    fn from(row: AttributeRow) -> Self {
        Self {
            id: row.id,
            price: row.price,
            acreage: row.acreage,
            published: row.published,
            hashtag: row.hashtag,
        }
    }
}

impl From<&Attribute> for AttributeRow {
    fn from(attribute: &Attribute) -> Self {
        Self {
            id: attribute.id.clone(),
            price: attribute.price.clone(),
            acreage: attribute.acreage.clone(),
            published: attribute.published.clone(),
            hashtag: attribute.hashtag.clone(),
        }
    }
}

/// Row struct for the images table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ImageRow {
    pub id: String,
    pub image: serde_json::Value,
}

impl TryFrom<ImageRow> for ImageSet {
    type Error = StoreError;

    fn try_from(row: ImageRow) -> Result<Self, Self::Error> {
        let urls = serde_json::from_value(row.image)
            .map_err(|err| StoreError::query(format!("image list for {}: {err}", row.id)))?;
        Ok(Self { id: row.id, urls })
    }
}

impl TryFrom<&ImageSet> for ImageRow {
    type Error = StoreError;

    fn try_from(images: &ImageSet) -> Result<Self, Self::Error> {
        let image = serde_json::to_value(&images.urls)
            .map_err(|err| StoreError::query(format!("image list encoding: {err}")))?;
        Ok(Self {
            id: images.id.clone(),
            image,
        })
    }
}

/// Row struct for the overviews table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = overviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OverviewRow {
    pub id: String,
    pub code: String,
    pub area: String,
    pub kind: Option<String>,
    pub target: Option<String>,
    pub bonus: String,
    pub created: String,
    pub expired: String,
}

impl From<OverviewRow> for Overview {
    fn from(row: OverviewRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            area: row.area,
            kind: row.kind,
            target: row.target,
            bonus: row.bonus,
            created: row.created,
            expired: row.expired,
        }
    }
}

impl From<&Overview> for OverviewRow {
    fn from(overview: &Overview) -> Self {
        Self {
            id: overview.id.clone(),
            code: overview.code.clone(),
            area: overview.area.clone(),
            kind: overview.kind.clone(),
            target: overview.target.clone(),
            bonus: overview.bonus.clone(),
            created: overview.created.clone(),
            expired: overview.expired.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lookups, users and engagement
// ---------------------------------------------------------------------------

/// Lookup row shape shared by the labels, provinces and categories tables.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct LookupRow {
    pub code: String,
    pub value: String,
}

impl From<LookupRow> for LookupEntry {
    fn from(row: LookupRow) -> Self {
        Self::new(row.code, row.value)
    }
}

/// Row struct for the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub zalo: Option<String>,
    pub avatar: Option<String>,
    pub role_code: Option<String>,
}

impl TryFrom<UserRow> for UserSummary {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored_user_id(row.id)?,
            name: row.name,
            phone: row.phone,
            zalo: row.zalo,
            avatar: row.avatar,
            role_code: row.role_code,
        })
    }
}

/// Row struct for the votes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub post_id: String,
    pub user_id: String,
    pub value: i16,
}

impl TryFrom<VoteRow> for Vote {
    type Error = StoreError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        let value = u8::try_from(row.value)
            .map_err(|_| StoreError::query(format!("vote value {} out of range", row.value)))?;
        Ok(Self {
            post_id: stored_post_id(row.post_id)?,
            user_id: stored_user_id(row.user_id)?,
            value,
        })
    }
}

/// Row struct for the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub commentator_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = StoreError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            post_id: stored_post_id(row.post_id)?,
            commentator_id: stored_user_id(row.commentator_id)?,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Wishlists and reports
// ---------------------------------------------------------------------------

/// Row struct for the wishlists table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = wishlists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WishlistRow {
    pub uid: String,
    pub post_ids: Vec<String>,
}

impl TryFrom<WishlistRow> for Wishlist {
    type Error = StoreError;

    fn try_from(row: WishlistRow) -> Result<Self, Self::Error> {
        let post_ids = row
            .post_ids
            .into_iter()
            .map(stored_post_id)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            uid: stored_user_id(row.uid)?,
            post_ids,
        })
    }
}

/// Insertable struct for report records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
pub(crate) struct NewReportRow<'a> {
    pub id: &'a str,
    pub post_id: &'a str,
    pub user_id: &'a str,
    pub title: &'a str,
    pub reason: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Report> for NewReportRow<'a> {
    fn from(report: &'a Report) -> Self {
        Self {
            id: &report.id,
            post_id: report.post_id.as_str(),
            user_id: report.user_id.as_str(),
            title: &report.title,
            reason: &report.reason,
            created_at: report.created_at,
        }
    }
}
