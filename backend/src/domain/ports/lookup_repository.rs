//! Port for the shared label, province and category tables.

use async_trait::async_trait;

use crate::domain::{LookupEntry, LookupKind};

use super::StoreError;

/// Port for lookup rows keyed by a unique code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// Fetch rows of `kind` whose codes appear in `codes`.
    async fn find(&self, kind: LookupKind, codes: &[String])
    -> Result<Vec<LookupEntry>, StoreError>;

    /// Insert `entry` unless a row with its code exists, then return the
    /// stored row. Concurrent callers converge on a single row; an existing
    /// row keeps its original value.
    async fn upsert(&self, kind: LookupKind, entry: &LookupEntry)
    -> Result<LookupEntry, StoreError>;
}

/// Fixture implementation that stores nothing and echoes upserts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLookupRepository;

#[async_trait]
impl LookupRepository for FixtureLookupRepository {
    async fn find(
        &self,
        _kind: LookupKind,
        _codes: &[String],
    ) -> Result<Vec<LookupEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn upsert(
        &self,
        _kind: LookupKind,
        entry: &LookupEntry,
    ) -> Result<LookupEntry, StoreError> {
        Ok(entry.clone())
    }
}
