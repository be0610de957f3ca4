//! Builders wiring the listing services onto a store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use phongtro::domain::{
    CodeGenerator, ExpiryService, ListingPolicy, ListingStores, PostLifecycleService,
    PostQueryService, WishlistService,
};
use phongtro::inbound::http::state::{HttpState, HttpStatePorts};
use phongtro::outbound::memory::InMemoryListingStore;
use phongtro::outbound::persistence::{DbPool, DieselListingStore};
use tracing::warn;

/// Use PostgreSQL when a pool is available, otherwise keep listings in
/// process memory.
pub(crate) fn build_stores(pool: Option<&DbPool>) -> ListingStores {
    match pool {
        Some(pool) => ListingStores::from_single(Arc::new(DieselListingStore::new(pool.clone()))),
        None => {
            warn!("no database configured; listings are kept in memory and lost on restart");
            ListingStores::from_single(Arc::new(InMemoryListingStore::new()))
        }
    }
}

/// Construct every driving port over `stores`.
pub(crate) fn build_http_state(
    stores: ListingStores,
    policy: ListingPolicy,
    codes: CodeGenerator,
    clock: Arc<dyn Clock>,
) -> HttpState {
    let wishlist = Arc::new(WishlistService::new(stores.clone()));
    HttpState::new(HttpStatePorts {
        posts: Arc::new(PostQueryService::new(stores.clone(), policy)),
        post_commands: Arc::new(PostLifecycleService::new(
            stores.clone(),
            codes,
            clock.clone(),
            policy,
        )),
        expired_posts: Arc::new(ExpiryService::new(stores, clock)),
        wishlist: wishlist.clone(),
        wishlist_query: wishlist,
    })
}

/// Production wiring: system clock and the store chosen by `pool`.
pub(crate) fn build_default_http_state(
    pool: Option<&DbPool>,
    policy: ListingPolicy,
    codes: CodeGenerator,
) -> HttpState {
    build_http_state(build_stores(pool), policy, codes, Arc::new(DefaultClock))
}
