//! Wishlist HTTP handlers.
//!
//! ```text
//! GET    /api/v1/wishlist
//! POST   /api/v1/wishlist/{postId}
//! DELETE /api/v1/wishlist/{postId}
//! ```
//!
//! Every route acts on the caller's own wishlist.

use actix_web::{delete, get, post, web};

use crate::domain::{PostListing, Wishlist};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerId;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::post_dto::parse_post_id;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, PostListingSchema, WishlistSchema};
use crate::inbound::http::state::HttpState;

/// Message returned after saving a post.
pub const MSG_ADDED: &str = "Post added to wishlist.";
/// Message returned after removing a post.
pub const MSG_REMOVED: &str = "Post removed from wishlist.";

/// The caller's saved posts in the order they were saved.
#[utoipa::path(
    get,
    path = "/api/v1/wishlist",
    responses(
        (status = 200, description = "Saved posts in `response`", body = [PostListingSchema]),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["wishlist"],
    operation_id = "savedPosts"
)]
#[get("/wishlist")]
pub async fn saved_posts(
    state: web::Data<HttpState>,
    caller: CallerId,
) -> ApiResult<web::Json<Envelope<Vec<PostListing>>>> {
    let posts = state.wishlist_query.saved_posts(caller.user_id()).await?;
    Ok(web::Json(Envelope::ok("OK", posts)))
}

/// Save a post to the caller's wishlist.
#[utoipa::path(
    post,
    path = "/api/v1/wishlist/{postId}",
    params(("postId" = String, Path, description = "Post to save")),
    responses(
        (status = 200, description = "Updated wishlist in `response`", body = WishlistSchema),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 404, description = "Post not found", body = ErrorEnvelopeSchema),
        (status = 409, description = "Post already saved", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["wishlist"],
    operation_id = "addToWishlist"
)]
#[post("/wishlist/{post_id}")]
pub async fn add_to_wishlist(
    state: web::Data<HttpState>,
    caller: CallerId,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Wishlist>>> {
    let post_id = parse_post_id(&path.into_inner(), "postId")?;
    let wishlist = state
        .wishlist
        .add_to_wishlist(caller.user_id(), &post_id)
        .await?;
    Ok(web::Json(Envelope::ok(MSG_ADDED, wishlist)))
}

/// Remove a post from the caller's wishlist.
#[utoipa::path(
    delete,
    path = "/api/v1/wishlist/{postId}",
    params(("postId" = String, Path, description = "Post to remove")),
    responses(
        (status = 200, description = "Updated wishlist in `response`", body = WishlistSchema),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 404, description = "Wishlist not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["wishlist"],
    operation_id = "removeFromWishlist"
)]
#[delete("/wishlist/{post_id}")]
pub async fn remove_from_wishlist(
    state: web::Data<HttpState>,
    caller: CallerId,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Wishlist>>> {
    let post_id = parse_post_id(&path.into_inner(), "postId")?;
    let wishlist = state
        .wishlist
        .remove_from_wishlist(caller.user_id(), &post_id)
        .await?;
    Ok(web::Json(Envelope::ok(MSG_REMOVED, wishlist)))
}

/// Register the wishlist routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(saved_posts)
        .service(add_to_wishlist)
        .service(remove_from_wishlist);
}
