//! PostgreSQL-backed listing store.
//!
//! One [`DieselListingStore`] implements every repository port; the
//! per-port implementations live in sibling modules. This module holds the
//! shared handle, the lookup tables and the satellite reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{LookupRepository, LookupUpsert, SatelliteRepository, StoreError};
use crate::domain::{Attribute, ImageSet, LookupEntry, LookupKind, Overview};

use super::error_mapping::map_diesel_error;
use super::models::{AttributeRow, ImageRow, LookupRow, OverviewRow};
use super::pool::DbPool;
use super::schema::{attributes, categories, images, labels, overviews, provinces};

/// Diesel-backed implementation of the listing repository ports.
#[derive(Clone)]
pub struct DieselListingStore {
    pub(super) pool: DbPool,
}

impl DieselListingStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Insert a lookup row unless its code is taken. Returns rows inserted.
pub(super) async fn insert_lookup_if_absent(
    conn: &mut AsyncPgConnection,
    kind: LookupKind,
    entry: &LookupEntry,
) -> QueryResult<usize> {
    let code = entry.code.as_str();
    let value = entry.value.as_str();
    match kind {
        LookupKind::Label => {
            diesel::insert_into(labels::table)
                .values((labels::code.eq(code), labels::value.eq(value)))
                .on_conflict(labels::code)
                .do_nothing()
                .execute(conn)
                .await
        }
        LookupKind::Province => {
            diesel::insert_into(provinces::table)
                .values((provinces::code.eq(code), provinces::value.eq(value)))
                .on_conflict(provinces::code)
                .do_nothing()
                .execute(conn)
                .await
        }
        LookupKind::Category => {
            diesel::insert_into(categories::table)
                .values((categories::code.eq(code), categories::value.eq(value)))
                .on_conflict(categories::code)
                .do_nothing()
                .execute(conn)
                .await
        }
    }
}

/// Apply every lookup upsert of a write bundle.
pub(super) async fn insert_lookups(
    conn: &mut AsyncPgConnection,
    upserts: &[LookupUpsert],
) -> QueryResult<()> {
    for upsert in upserts {
        insert_lookup_if_absent(conn, upsert.kind, &upsert.entry).await?;
    }
    Ok(())
}

async fn load_lookups(
    conn: &mut AsyncPgConnection,
    kind: LookupKind,
    codes: &[String],
) -> QueryResult<Vec<LookupRow>> {
    match kind {
        LookupKind::Label => {
            labels::table
                .filter(labels::code.eq_any(codes))
                .select((labels::code, labels::value))
                .load(conn)
                .await
        }
        LookupKind::Province => {
            provinces::table
                .filter(provinces::code.eq_any(codes))
                .select((provinces::code, provinces::value))
                .load(conn)
                .await
        }
        LookupKind::Category => {
            categories::table
                .filter(categories::code.eq_any(codes))
                .select((categories::code, categories::value))
                .load(conn)
                .await
        }
    }
}

#[async_trait]
impl LookupRepository for DieselListingStore {
    async fn find(
        &self,
        kind: LookupKind,
        codes: &[String],
    ) -> Result<Vec<LookupEntry>, StoreError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;
        let rows = load_lookups(&mut conn, kind, codes)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(LookupEntry::from).collect())
    }

    async fn upsert(
        &self,
        kind: LookupKind,
        entry: &LookupEntry,
    ) -> Result<LookupEntry, StoreError> {
        let mut conn = self.pool.get().await?;
        insert_lookup_if_absent(&mut conn, kind, entry)
            .await
            .map_err(map_diesel_error)?;
        let codes = [entry.code.clone()];
        let stored = load_lookups(&mut conn, kind, &codes)
            .await
            .map_err(map_diesel_error)?;
        stored
            .into_iter()
            .next()
            .map(LookupEntry::from)
            .ok_or_else(|| StoreError::query(format!("{kind} {} vanished after upsert", entry.code)))
    }
}

#[async_trait]
impl SatelliteRepository for DieselListingStore {
    async fn find_attributes(&self, ids: &[String]) -> Result<Vec<Attribute>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;
        let rows: Vec<AttributeRow> = attributes::table
            .filter(attributes::id.eq_any(ids))
            .select(AttributeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Attribute::from).collect())
    }

    async fn find_images(&self, ids: &[String]) -> Result<Vec<ImageSet>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;
        let rows: Vec<ImageRow> = images::table
            .filter(images::id.eq_any(ids))
            .select(ImageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(ImageSet::try_from).collect()
    }

    async fn find_overviews(&self, ids: &[String]) -> Result<Vec<Overview>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await?;
        let rows: Vec<OverviewRow> = overviews::table
            .filter(overviews::id.eq_any(ids))
            .select(OverviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Overview::from).collect())
    }
}
