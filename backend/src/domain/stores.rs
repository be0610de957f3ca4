//! Bundle of driven ports shared by the listing services.

use std::sync::Arc;

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    EngagementRepository, LookupRepository, PostRepository, ReportRepository,
    SatelliteRepository, StoreError, UserDirectory, WishlistRepository,
};

/// Every repository the listing services read or write.
///
/// Adapters usually implement all ports on one type, so the handles are
/// cheap clones of the same store.
#[derive(Clone)]
pub struct ListingStores {
    pub posts: Arc<dyn PostRepository>,
    pub satellites: Arc<dyn SatelliteRepository>,
    pub lookups: Arc<dyn LookupRepository>,
    pub users: Arc<dyn UserDirectory>,
    pub engagement: Arc<dyn EngagementRepository>,
    pub wishlists: Arc<dyn WishlistRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl ListingStores {
    /// Use one store for every port.
    pub fn from_single<S>(store: Arc<S>) -> Self
    where
        S: PostRepository
            + SatelliteRepository
            + LookupRepository
            + UserDirectory
            + EngagementRepository
            + WishlistRepository
            + ReportRepository
            + 'static,
    {
        Self {
            posts: store.clone(),
            satellites: store.clone(),
            lookups: store.clone(),
            users: store.clone(),
            engagement: store.clone(),
            wishlists: store.clone(),
            reports: store,
        }
    }
}

/// Translate a store failure into a domain error.
///
/// Messages from the store are logged but never exposed to callers.
pub(crate) fn map_store_error(err: StoreError) -> Error {
    warn!(error.kind = err.kind(), error = %err, "relation store call failed");
    match err {
        StoreError::Connection { .. } => {
            Error::service_unavailable("listing store is temporarily unavailable")
        }
        StoreError::Query { .. } => Error::internal("listing store query failed"),
        StoreError::DuplicateKey { .. } => Error::duplicate_key("record already exists"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StoreError::query("bad column"), ErrorCode::InternalError)]
    #[case(StoreError::duplicate_key("posts_pkey"), ErrorCode::DuplicateKey)]
    fn store_errors_map_to_domain_codes(#[case] err: StoreError, #[case] expected: ErrorCode) {
        let mapped = map_store_error(err);
        assert_eq!(mapped.code(), expected);
        assert!(!mapped.message().contains("posts_pkey"));
    }
}
