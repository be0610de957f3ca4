//! PostgreSQL-backed `PostRepository` implementation.
//!
//! Listing filters are translated into a boxed Diesel query so the same
//! predicate drives both the page query and the total count. Writes apply
//! the post, its satellites and the lookup upserts in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::PageRequest;

use crate::domain::ports::{PostBundle, PostBundlePatch, PostRepository, StoreError};
use crate::domain::{
    Post, PostFilter, PostId, PostLinkage, PostSort, PostStatus, SatelliteRetention,
    SortDirection, SortKey,
};

use super::diesel_listing_store::{DieselListingStore, insert_lookups};
use super::error_mapping::map_diesel_error;
use super::models::{AttributeRow, ImageRow, NewPostRow, OverviewRow, PostChangeset, PostRow};
use super::schema::{attributes, images, overviews, posts};

/// Build the `WHERE` clause for a listing filter.
fn filtered(filter: &PostFilter) -> posts::BoxedQuery<'_, Pg> {
    let mut query = posts::table.into_boxed();
    if let Some(code) = filter.label_code.as_deref() {
        query = query.filter(posts::label_code.eq(code));
    }
    if let Some(code) = filter.category_code.as_deref() {
        query = query.filter(posts::category_code.eq(code));
    }
    if let Some(code) = filter.province_code.as_deref() {
        query = query.filter(posts::province_code.eq(code));
    }
    if let Some(code) = filter.area_code.as_deref() {
        query = query.filter(posts::area_code.eq(code));
    }
    if let Some(code) = filter.price_code.as_deref() {
        query = query.filter(posts::price_code.eq(code));
    }
    if let Some(user_id) = filter.user_id.as_ref() {
        query = query.filter(posts::user_id.eq(user_id.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(posts::status.eq(status.as_str()));
    }
    if let Some(range) = filter.price_number {
        query = query.filter(posts::price_number.between(range.min(), range.max()));
    }
    if let Some(range) = filter.area_number {
        query = query.filter(posts::area_number.between(range.min(), range.max()));
    }
    query
}

/// Apply `sort`, breaking ties by id ascending.
fn ordered(query: posts::BoxedQuery<'_, Pg>, sort: PostSort) -> posts::BoxedQuery<'_, Pg> {
    let query = match (sort.key, sort.direction) {
        (SortKey::CreatedAt, SortDirection::Asc) => query.order(posts::created_at.asc()),
        (SortKey::CreatedAt, SortDirection::Desc) => query.order(posts::created_at.desc()),
        (SortKey::PriceNumber, SortDirection::Asc) => query.order(posts::price_number.asc()),
        (SortKey::PriceNumber, SortDirection::Desc) => query.order(posts::price_number.desc()),
        (SortKey::AreaNumber, SortDirection::Asc) => query.order(posts::area_number.asc()),
        (SortKey::AreaNumber, SortDirection::Desc) => query.order(posts::area_number.desc()),
    };
    query.then_order_by(posts::id.asc())
}

fn to_sql_bound(value: u64, what: &str) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::query(format!("{what} {value} exceeds i64")))
}

fn to_row_count(value: usize) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::query(format!("row count {value} exceeds u64")))
}

fn into_posts(rows: Vec<PostRow>) -> Result<Vec<Post>, StoreError> {
    rows.into_iter().map(Post::try_from).collect()
}

#[async_trait]
impl PostRepository for DieselListingStore {
    async fn find(
        &self,
        filter: &PostFilter,
        sort: Option<PostSort>,
        window: Option<PageRequest>,
    ) -> Result<Vec<Post>, StoreError> {
        let mut query = filtered(filter);
        if let Some(sort) = sort {
            query = ordered(query, sort);
        }
        if let Some(window) = window {
            query = query
                .offset(to_sql_bound(window.offset(), "offset")?)
                .limit(i64::from(window.limit()));
        }

        let mut conn = self.pool.get().await?;
        let rows: Vec<PostRow> = query
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_posts(rows)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, StoreError> {
        let mut conn = self.pool.get().await?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| StoreError::query(format!("negative count {total}")))
    }

    async fn find_one(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<PostRow> = posts::table
            .filter(posts::id.eq(id.as_str()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Post::try_from).transpose()
    }

    async fn find_many(&self, ids: &[PostId]) -> Result<Vec<Post>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<&str> = ids.iter().map(PostId::as_str).collect();
        let mut conn = self.pool.get().await?;
        let rows: Vec<PostRow> = posts::table
            .filter(posts::id.eq_any(keys))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_posts(rows)
    }

    async fn find_recent(&self, limit: u32) -> Result<Vec<Post>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<PostRow> = posts::table
            .order((posts::created_at.desc(), posts::id.asc()))
            .limit(i64::from(limit))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_posts(rows)
    }

    async fn find_expired(
        &self,
        now: DateTime<Utc>,
        exclude_archived: bool,
    ) -> Result<Vec<Post>, StoreError> {
        let mut query = posts::table.filter(posts::expired.lt(now)).into_boxed();
        if exclude_archived {
            query = query.filter(posts::status.ne(PostStatus::Archived.as_str()));
        }

        let mut conn = self.pool.get().await?;
        let rows: Vec<PostRow> = query
            .order((posts::expired.desc(), posts::id.asc()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_posts(rows)
    }

    async fn create(&self, bundle: &PostBundle) -> Result<(), StoreError> {
        let post_row = NewPostRow::from(&bundle.post);
        let attribute_row = AttributeRow::from(&bundle.attribute);
        let image_row = ImageRow::try_from(&bundle.images)?;
        let overview_row = OverviewRow::from(&bundle.overview);
        let lookups = bundle.lookups.as_slice();

        let mut conn = self.pool.get().await?;
        conn.transaction(|conn| {
            async move {
                insert_lookups(conn, lookups).await?;
                diesel::insert_into(attributes::table)
                    .values(&attribute_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(images::table)
                    .values(&image_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(overviews::table)
                    .values(&overview_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(posts::table)
                    .values(&post_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        linkage: &PostLinkage,
        patch: &PostBundlePatch,
    ) -> Result<u64, StoreError> {
        let post = &patch.post;
        let changeset = PostChangeset {
            title: &post.title,
            label_code: &post.label_code,
            address: post.address.as_deref(),
            category_code: &post.category_code,
            description: post.description.as_deref(),
            area_code: post.area_code.as_deref(),
            price_code: post.price_code.as_deref(),
            province_code: post.province_code.as_deref(),
            price_number: post.price_number,
            area_number: post.area_number,
            updated_at: post.updated_at,
        };
        let image_value = serde_json::to_value(&patch.image_urls)
            .map_err(|err| StoreError::query(format!("image urls not serialisable: {err}")))?;
        let lookups = patch.lookups.as_slice();

        let mut conn = self.pool.get().await?;
        let updated = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(
                        posts::table.filter(posts::id.eq(linkage.post_id.as_str())),
                    )
                    .set(&changeset)
                    .execute(conn)
                    .await?;
                    if updated == 0 {
                        return Ok(0);
                    }

                    insert_lookups(conn, lookups).await?;
                    diesel::update(
                        attributes::table.filter(attributes::id.eq(&linkage.attributes_id)),
                    )
                    .set((
                        attributes::price.eq(&patch.attribute.price),
                        attributes::acreage.eq(&patch.attribute.acreage),
                    ))
                    .execute(conn)
                    .await?;
                    diesel::update(images::table.filter(images::id.eq(&linkage.images_id)))
                        .set(images::image.eq(&image_value))
                        .execute(conn)
                        .await?;
                    diesel::update(overviews::table.filter(overviews::id.eq(&linkage.overview_id)))
                        .set((
                            overviews::area.eq(&patch.overview.area),
                            overviews::kind.eq(patch.overview.kind.as_deref()),
                            overviews::target.eq(patch.overview.target.as_deref()),
                        ))
                        .execute(conn)
                        .await?;
                    Ok(updated)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        to_row_count(updated)
    }

    async fn delete_one(
        &self,
        id: &PostId,
        retention: SatelliteRetention,
    ) -> Result<u64, StoreError> {
        let mut conn = self.pool.get().await?;
        let removed = conn
            .transaction(|conn| {
                async move {
                    let linkage: Option<(String, String, String)> = diesel::delete(
                        posts::table.filter(posts::id.eq(id.as_str())),
                    )
                    .returning((posts::attributes_id, posts::images_id, posts::overview_id))
                    .get_result(conn)
                    .await
                    .optional()?;
                    let Some((attributes_id, images_id, overview_id)) = linkage else {
                        return Ok(0);
                    };

                    if retention == SatelliteRetention::Cascade {
                        diesel::delete(attributes::table.filter(attributes::id.eq(attributes_id)))
                            .execute(conn)
                            .await?;
                        diesel::delete(images::table.filter(images::id.eq(images_id)))
                            .execute(conn)
                            .await?;
                        diesel::delete(overviews::table.filter(overviews::id.eq(overview_id)))
                            .execute(conn)
                            .await?;
                    }
                    Ok(1)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        to_row_count(removed)
    }
}
