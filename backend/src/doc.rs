//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the post, wishlist and health endpoints
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that
//!   describe domain types without coupling them to utoipa
//! - **Security**: the caller id header forwarded by the gateway
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::USER_ID_HEADER;
use crate::inbound::http::post_dto::{PostBody, ReportBody, UpdatePostBody};
use crate::inbound::http::posts::CreatedPost;
use crate::inbound::http::schemas::{
    AttributeSchema, ErrorCodeSchema, ErrorEnvelopeSchema, ImageSetSchema, LookupEntrySchema,
    MessageEnvelopeSchema, OverviewSchema, PaginatedPostsSchema, PostCardSchema,
    PostListingSchema, ReportSchema, UserSummarySchema, WishlistSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the caller id security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "CallerId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                USER_ID_HEADER,
                "Authenticated user id forwarded by the gateway. Required by write endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Phongtro listing API",
        description = "Rental listings with filtered paging, post lifecycle, wishlists and expiry notices."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("CallerId" = [])),
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::new_posts,
        crate::inbound::http::posts::expired_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::report_post,
        crate::inbound::http::wishlist::saved_posts,
        crate::inbound::http::wishlist::add_to_wishlist,
        crate::inbound::http::wishlist::remove_from_wishlist,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorCodeSchema,
        ErrorEnvelopeSchema,
        MessageEnvelopeSchema,
        AttributeSchema,
        ImageSetSchema,
        OverviewSchema,
        LookupEntrySchema,
        UserSummarySchema,
        PostListingSchema,
        PostCardSchema,
        PaginatedPostsSchema,
        WishlistSchema,
        ReportSchema,
        PostBody,
        UpdatePostBody,
        ReportBody,
        CreatedPost,
    )),
    tags(
        (name = "posts", description = "Listing reads and post lifecycle"),
        (name = "wishlist", description = "Posts saved by the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
