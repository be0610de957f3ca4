//! PostgreSQL-backed `WishlistRepository` implementation.
//!
//! Each user owns one row holding the saved ids in order. Mutations lock the
//! row with `SELECT ... FOR UPDATE` so concurrent saves by the same user
//! cannot lose an id or store it twice.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{StoreError, WishlistRepository};
use crate::domain::{PostId, UserId, Wishlist};

use super::diesel_listing_store::DieselListingStore;
use super::error_mapping::map_diesel_error;
use super::models::WishlistRow;
use super::schema::wishlists;

async fn lock_row(
    conn: &mut AsyncPgConnection,
    uid: &str,
) -> QueryResult<Option<WishlistRow>> {
    wishlists::table
        .filter(wishlists::uid.eq(uid))
        .select(WishlistRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()
}

async fn store_ids(conn: &mut AsyncPgConnection, uid: &str, ids: &[String]) -> QueryResult<usize> {
    diesel::update(wishlists::table.filter(wishlists::uid.eq(uid)))
        .set(wishlists::post_ids.eq(ids))
        .execute(conn)
        .await
}

/// Outcome of an append inside the row lock.
enum Appended {
    Saved(WishlistRow),
    AlreadySaved,
}

#[async_trait]
impl WishlistRepository for DieselListingStore {
    async fn find_one(&self, uid: &UserId) -> Result<Option<Wishlist>, StoreError> {
        let mut conn = self.pool.get().await?;
        let row: Option<WishlistRow> = wishlists::table
            .filter(wishlists::uid.eq(uid.as_str()))
            .select(WishlistRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Wishlist::try_from).transpose()
    }

    async fn push(&self, uid: &UserId, post_id: &PostId) -> Result<Wishlist, StoreError> {
        let key = uid.as_str();
        let mut conn = self.pool.get().await?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let empty = WishlistRow {
                        uid: key.to_owned(),
                        post_ids: Vec::new(),
                    };
                    diesel::insert_into(wishlists::table)
                        .values(&empty)
                        .on_conflict(wishlists::uid)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    let mut row = lock_row(conn, key).await?.unwrap_or(empty);
                    if row.post_ids.iter().any(|id| id == post_id.as_str()) {
                        return Ok(Appended::AlreadySaved);
                    }
                    row.post_ids.push(post_id.as_str().to_owned());
                    store_ids(conn, key, &row.post_ids).await?;
                    Ok(Appended::Saved(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            Appended::Saved(row) => Wishlist::try_from(row),
            Appended::AlreadySaved => Err(StoreError::duplicate_key(format!(
                "post {post_id} already saved by {uid}"
            ))),
        }
    }

    async fn pull(
        &self,
        uid: &UserId,
        post_id: &PostId,
    ) -> Result<Option<Wishlist>, StoreError> {
        let key = uid.as_str();
        let mut conn = self.pool.get().await?;
        let row = conn
            .transaction(|conn| {
                async move {
                    let Some(mut row) = lock_row(conn, key).await? else {
                        return Ok(None);
                    };
                    let before = row.post_ids.len();
                    row.post_ids.retain(|id| id != post_id.as_str());
                    if row.post_ids.len() != before {
                        store_ids(conn, key, &row.post_ids).await?;
                    }
                    Ok(Some(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        row.map(Wishlist::try_from).transpose()
    }
}
