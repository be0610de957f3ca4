//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ExpiredPostsQuery, PostCommand, PostQuery, WishlistCommand, WishlistQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub posts: Arc<dyn PostQuery>,
    pub post_commands: Arc<dyn PostCommand>,
    pub expired_posts: Arc<dyn ExpiredPostsQuery>,
    pub wishlist: Arc<dyn WishlistCommand>,
    pub wishlist_query: Arc<dyn WishlistQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<dyn PostQuery>,
    pub post_commands: Arc<dyn PostCommand>,
    pub expired_posts: Arc<dyn ExpiredPostsQuery>,
    pub wishlist: Arc<dyn WishlistCommand>,
    pub wishlist_query: Arc<dyn WishlistQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use phongtro::domain::{
    ///     ExpiryService, ListingPolicy, ListingStores, PostLifecycleService, PostQueryService,
    ///     WishlistService, CodeGenerator,
    /// };
    /// use phongtro::inbound::http::state::{HttpState, HttpStatePorts};
    /// use phongtro::outbound::memory::InMemoryListingStore;
    ///
    /// let stores = ListingStores::from_single(Arc::new(InMemoryListingStore::default()));
    /// let clock = Arc::new(mockable::DefaultClock);
    /// let wishlist = Arc::new(WishlistService::new(stores.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     posts: Arc::new(PostQueryService::new(stores.clone(), ListingPolicy::default())),
    ///     post_commands: Arc::new(PostLifecycleService::new(
    ///         stores.clone(),
    ///         CodeGenerator::default(),
    ///         clock.clone(),
    ///         ListingPolicy::default(),
    ///     )),
    ///     expired_posts: Arc::new(ExpiryService::new(stores, clock)),
    ///     wishlist: wishlist.clone(),
    ///     wishlist_query: wishlist,
    /// });
    /// let _posts = state.posts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            posts,
            post_commands,
            expired_posts,
            wishlist,
            wishlist_query,
        } = ports;
        Self {
            posts,
            post_commands,
            expired_posts,
            wishlist,
            wishlist_query,
        }
    }
}
