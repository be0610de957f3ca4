//! Domain primitives, aggregates and services.
//!
//! Purpose: define the listing model (posts, their satellite rows and shared
//! lookups), the read-side views composed from it, and the services that
//! implement the driving ports. Types stay free of transport and storage
//! concerns; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Post, Attribute, ImageSet, Overview: stored listing records.
//! - PostListing, PostDetail, PostCard: composed read views.
//! - CodeGenerator: label to lookup code derivation.
//! - Post*/Wishlist*/Expiry* services: driving port implementations.

pub mod code;
pub mod display_date;
pub mod engagement;
pub mod error;
pub mod ids;
pub mod listing;
pub mod lookup;
pub mod policy;
pub mod ports;
pub mod post;
pub mod post_draft;
pub mod satellites;
pub mod trace_id;
pub mod user;
pub mod views;
pub mod wishlist;

mod expiry_service;
mod post_lifecycle_service;
mod post_query_service;
mod relations;
mod stores;
mod wishlist_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::code::{CodeGenerator, DEFAULT_CODE_SALT, province_name};
pub use self::display_date::{overview_date, published_date};
pub use self::engagement::{Comment, MAX_VOTE, Report, Vote};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::expiry_service::ExpiryService;
pub use self::ids::{IdValidationError, PostId, UserId, generate_id};
pub use self::listing::{
    NumericRange, NumericRangeError, ParsePostSortError, PostFilter, PostSort, SortDirection,
    SortKey,
};
pub use self::lookup::{LookupEntry, LookupKind};
pub use self::policy::{
    DEFAULT_NEW_POST_LIMIT, DEFAULT_PAGE_SIZE, DEFAULT_POST_LIFETIME_DAYS, ListingPolicy,
    ParseSatelliteRetentionError, SatelliteRetention,
};
pub use self::post::{ParsePostStatusError, Post, PostLinkage, PostStatus};
pub use self::post_draft::{PostDraft, PostDraftError};
pub use self::post_lifecycle_service::PostLifecycleService;
pub use self::post_query_service::PostQueryService;
pub use self::satellites::{
    Attribute, ImageSet, Overview, STANDARD_BONUS, format_acreage, format_price,
};
pub use self::stores::ListingStores;
pub use self::trace_id::TraceId;
pub use self::user::UserSummary;
pub use self::views::{CommentView, PostCard, PostDetail, PostListing, VoteView};
pub use self::wishlist::Wishlist;
pub use self::wishlist_service::WishlistService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use phongtro::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such post"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
