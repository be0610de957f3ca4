//! PostgreSQL-backed user, engagement and report ports.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EngagementRepository, ReportRepository, StoreError, UserDirectory};
use crate::domain::{Comment, PostId, Report, UserId, UserSummary, Vote};

use super::diesel_listing_store::DieselListingStore;
use super::error_mapping::map_diesel_error;
use super::models::{CommentRow, NewReportRow, UserRow, VoteRow};
use super::schema::{comments, reports, users, votes};

#[async_trait]
impl UserDirectory for DieselListingStore {
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserSummary>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<&str> = ids.iter().map(UserId::as_str).collect();
        let mut conn = self.pool.get().await?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(keys))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(UserSummary::try_from).collect()
    }
}

#[async_trait]
impl EngagementRepository for DieselListingStore {
    async fn votes_for(&self, post_id: &PostId) -> Result<Vec<Vote>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<VoteRow> = votes::table
            .filter(votes::post_id.eq(post_id.as_str()))
            .order(votes::user_id.asc())
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Vote::try_from).collect()
    }

    async fn comments_for(&self, post_id: &PostId) -> Result<Vec<Comment>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::post_id.eq(post_id.as_str()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Comment::try_from).collect()
    }
}

#[async_trait]
impl ReportRepository for DieselListingStore {
    async fn insert(&self, report: &Report) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(reports::table)
            .values(NewReportRow::from(report))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
