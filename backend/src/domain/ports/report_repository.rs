//! Port for abuse reports.

use async_trait::async_trait;

use crate::domain::Report;

use super::StoreError;

/// Append-only report storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a report.
    async fn insert(&self, report: &Report) -> Result<(), StoreError>;
}

/// Fixture implementation that discards reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportRepository;

#[async_trait]
impl ReportRepository for FixtureReportRepository {
    async fn insert(&self, _report: &Report) -> Result<(), StoreError> {
        Ok(())
    }
}
