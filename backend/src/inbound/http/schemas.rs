//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa during OpenAPI generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The caller identity header is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The entity is already present.
    #[schema(rename = "already_exists")]
    AlreadyExists,
    /// A generated identifier collided with an existing row.
    #[schema(rename = "duplicate_key")]
    DuplicateKey,
    /// The backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Body written for every failed request.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::error::ErrorEnvelope, rename_all = "camelCase")]
pub struct ErrorEnvelopeSchema {
    /// `1` for business-rule failures, `-1` for server faults.
    #[schema(example = 1)]
    err: i8,
    /// Human-readable message returned to clients.
    #[schema(example = "Post not found")]
    msg: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

/// Success body carrying only a message.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::envelope::MessageEnvelope)]
pub struct MessageEnvelopeSchema {
    /// Always `0`.
    #[schema(example = 0)]
    err: i8,
    /// Outcome message.
    #[schema(example = "Delete")]
    msg: String,
}

/// OpenAPI schema for [`crate::domain::Attribute`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Attribute)]
pub struct AttributeSchema {
    id: String,
    #[schema(example = "2.5 triệu/tháng")]
    price: String,
    #[schema(example = "20 m2")]
    acreage: String,
    #[schema(example = "01/05/2024")]
    published: String,
    #[schema(example = "#123456")]
    hashtag: String,
}

/// OpenAPI schema for [`crate::domain::ImageSet`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ImageSet)]
pub struct ImageSetSchema {
    id: String,
    /// Media URLs in upload order.
    image: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::Overview`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Overview)]
pub struct OverviewSchema {
    id: String,
    #[schema(example = "#123456")]
    code: String,
    #[schema(example = "Cho thuê phòng trọ Hà Nội")]
    area: String,
    #[schema(rename = "type")]
    kind: Option<String>,
    target: Option<String>,
    #[schema(example = "Tin thường")]
    bonus: String,
    #[schema(example = "Thứ 4, 10:00 1/5/2024")]
    created: String,
    #[schema(example = "Thứ 7, 10:00 11/5/2024")]
    expired: String,
}

/// OpenAPI schema for [`crate::domain::LookupEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LookupEntry)]
pub struct LookupEntrySchema {
    #[schema(example = "OOPN")]
    code: String,
    #[schema(example = "Cho thuê phòng trọ Hà Nội")]
    value: String,
}

/// OpenAPI schema for [`crate::domain::UserSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserSummary, rename_all = "camelCase")]
pub struct UserSummarySchema {
    id: String,
    name: String,
    phone: Option<String>,
    zalo: Option<String>,
    avatar: Option<String>,
    role_code: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PostListing`].
///
/// The stored post columns plus the resolved relations. A relation whose
/// row is missing is `null`.
#[derive(ToSchema)]
#[schema(as = crate::domain::PostListing, rename_all = "camelCase")]
pub struct PostListingSchema {
    id: String,
    title: String,
    star: i32,
    address: Option<String>,
    /// JSON text of the submitted description.
    description: Option<String>,
    label_code: String,
    category_code: String,
    province_code: Option<String>,
    area_code: Option<String>,
    price_code: Option<String>,
    price_number: f64,
    area_number: f64,
    attributes_id: String,
    images_id: String,
    overview_id: String,
    user_id: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    expired: Option<String>,
    #[schema(example = "active")]
    status: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    images: Option<ImageSetSchema>,
    attributes: Option<AttributeSchema>,
    user: Option<UserSummarySchema>,
    overview: Option<OverviewSchema>,
    label: Option<LookupEntrySchema>,
    category: Option<LookupEntrySchema>,
}

/// OpenAPI schema for [`crate::domain::PostCard`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PostCard, rename_all = "camelCase")]
pub struct PostCardSchema {
    id: String,
    title: String,
    star: i32,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    images: Option<ImageSetSchema>,
    attributes: Option<AttributeSchema>,
}

/// One page of listings.
#[derive(ToSchema)]
#[schema(as = crate::domain::PaginatedPostListing, rename_all = "camelCase")]
pub struct PaginatedPostsSchema {
    success: bool,
    items: Vec<PostListingSchema>,
    /// Matches across all pages.
    total: u64,
    total_pages: u64,
}

/// OpenAPI schema for [`crate::domain::Wishlist`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Wishlist, rename_all = "camelCase")]
pub struct WishlistSchema {
    uid: String,
    /// Saved post ids in the order they were added.
    post_ids: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::Report`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Report, rename_all = "camelCase")]
pub struct ReportSchema {
    id: String,
    post_id: String,
    user_id: String,
    title: String,
    reason: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}
