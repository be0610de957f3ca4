//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{
    MockExpiredPostsQuery, MockPostCommand, MockPostQuery, MockWishlistCommand,
    MockWishlistQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Driving port mocks for handler tests.
///
/// Set expectations on the fields a test exercises; untouched mocks panic if
/// a handler calls them.
#[derive(Default)]
pub struct PortMocks {
    pub posts: MockPostQuery,
    pub post_commands: MockPostCommand,
    pub expired_posts: MockExpiredPostsQuery,
    pub wishlist: MockWishlistCommand,
    pub wishlist_query: MockWishlistQuery,
}

impl PortMocks {
    /// Wrap the mocks as handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            posts: Arc::new(self.posts),
            post_commands: Arc::new(self.post_commands),
            expired_posts: Arc::new(self.expired_posts),
            wishlist: Arc::new(self.wishlist),
            wishlist_query: Arc::new(self.wishlist_query),
        })
    }
}

/// Build an app serving `configure` under `/api/v1` against `mocks`.
pub fn test_app(
    mocks: PortMocks,
    configure: fn(&mut web::ServiceConfig),
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(mocks.into_state()))
        .service(web::scope("/api/v1").configure(configure))
}
