//! Post HTTP handlers.
//!
//! ```text
//! GET    /api/v1/posts/limit?page=1&categoryCode=CTPT&priceNumber=1,5
//! GET    /api/v1/posts/new
//! GET    /api/v1/posts/expired?excludeArchived=true
//! GET    /api/v1/posts/{id}
//! POST   /api/v1/posts
//! PUT    /api/v1/posts
//! DELETE /api/v1/posts/{id}
//! POST   /api/v1/posts/{id}/report
//! ```
//!
//! The literal `limit`, `new` and `expired` routes must be registered ahead
//! of `/posts/{id}` so they are not captured as ids.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Paginated;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::{ExpiredPostsRequest, ReportRequest};
use crate::domain::{PostCard, PostDetail, PostId, PostListing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerId;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::post_dto::{
    ExpiredPostsQuery, ListPostsQuery, PostBody, ReportBody, UpdatePostBody, parse_post_id,
};
use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, MessageEnvelopeSchema, PaginatedPostsSchema, PostCardSchema,
    PostListingSchema, ReportSchema,
};
use crate::inbound::http::state::HttpState;

/// Message returned by successful reads.
pub const MSG_OK: &str = "OK";
/// Message returned after an update.
pub const MSG_UPDATED: &str = "Updated";
/// Message returned after a delete.
pub const MSG_DELETED: &str = "Delete";
/// Message returned after a report is filed.
pub const MSG_REPORTED: &str = "Đã gửi báo cáo vi phạm cho bài đăng này";

/// Identifier of a newly created post.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedPost {
    #[schema(value_type = String)]
    pub id: PostId,
}

/// List posts matching the query, one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/posts/limit",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "One page of posts", body = PaginatedPostsSchema),
        (status = 400, description = "Invalid query", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts/limit")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<ListPostsQuery>,
) -> ApiResult<web::Json<Paginated<PostListing>>> {
    let request = query.into_inner().into_request()?;
    let page = state.posts.list_posts(request).await?;
    Ok(web::Json(page))
}

/// The newest posts as compact cards.
#[utoipa::path(
    get,
    path = "/api/v1/posts/new",
    responses(
        (status = 200, description = "Newest posts in `response`", body = [PostCardSchema]),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "newPosts"
)]
#[get("/posts/new")]
pub async fn new_posts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<PostCard>>>> {
    let cards = state.posts.new_posts().await?;
    Ok(web::Json(Envelope::ok(MSG_OK, cards)))
}

/// Posts past their expiry, latest expiry first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/expired",
    params(ExpiredPostsQuery),
    responses(
        (status = 200, description = "Expired posts in `response`", body = [PostListingSchema]),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "expiredPosts"
)]
#[get("/posts/expired")]
pub async fn expired_posts(
    state: web::Data<HttpState>,
    query: web::Query<ExpiredPostsQuery>,
) -> ApiResult<web::Json<Envelope<Vec<PostListing>>>> {
    let request = ExpiredPostsRequest::from(query.into_inner());
    let posts = state.expired_posts.list_expired_posts(request).await?;
    Ok(web::Json(Envelope::ok(MSG_OK, posts)))
}

/// One post with votes, comments and province.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post detail in `response`", body = PostListingSchema),
        (status = 404, description = "Post not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<PostDetail>>> {
    let id = parse_post_id(&path.into_inner(), "id")?;
    let detail = state.posts.get_post(&id).await?;
    Ok(web::Json(Envelope::ok(MSG_OK, detail)))
}

/// Publish a post for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PostBody,
    responses(
        (status = 200, description = "Created post id in `response`", body = CreatedPost),
        (status = 400, description = "Invalid post", body = ErrorEnvelopeSchema),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 409, description = "Identifier collision", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    caller: CallerId,
    payload: web::Json<PostBody>,
) -> ApiResult<web::Json<Envelope<CreatedPost>>> {
    let draft = payload.into_inner().into_draft()?;
    let id = state
        .post_commands
        .create_post(draft, caller.user_id())
        .await?;
    info!(post_id = %id, user_id = %caller.user_id(), "post created");
    Ok(web::Json(Envelope::ok(MSG_OK, CreatedPost { id })))
}

/// Rewrite an existing post and its display rows.
#[utoipa::path(
    put,
    path = "/api/v1/posts",
    request_body = UpdatePostBody,
    responses(
        (status = 200, description = "Post updated", body = MessageEnvelopeSchema),
        (status = 400, description = "Invalid post", body = ErrorEnvelopeSchema),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 404, description = "Post not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts")]
pub async fn update_post(
    state: web::Data<HttpState>,
    caller: CallerId,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<web::Json<Envelope<()>>> {
    let UpdatePostBody { post_id, fields } = payload.into_inner();
    let post_id = parse_post_id(&post_id, "postId")?;
    let draft = fields.into_draft()?;
    state.post_commands.update_post(&post_id, draft).await?;
    info!(post_id = %post_id, user_id = %caller.user_id(), "post updated");
    Ok(web::Json(Envelope::message(MSG_UPDATED)))
}

/// Remove a post.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = MessageEnvelopeSchema),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 404, description = "No post deleted", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    caller: CallerId,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<()>>> {
    let id = parse_post_id(&path.into_inner(), "id")?;
    state.post_commands.delete_post(&id).await?;
    info!(post_id = %id, user_id = %caller.user_id(), "post deleted");
    Ok(web::Json(Envelope::message(MSG_DELETED)))
}

/// File an abuse report against a post.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/report",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = ReportBody,
    responses(
        (status = 200, description = "Stored report in `response`", body = ReportSchema),
        (status = 400, description = "Reason missing", body = ErrorEnvelopeSchema),
        (status = 401, description = "Caller id missing", body = ErrorEnvelopeSchema),
        (status = 404, description = "Post not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema)
    ),
    tags = ["posts"],
    operation_id = "reportPost"
)]
#[post("/posts/{id}/report")]
pub async fn report_post(
    state: web::Data<HttpState>,
    caller: CallerId,
    path: web::Path<String>,
    payload: web::Json<ReportBody>,
) -> ApiResult<HttpResponse> {
    let post_id = parse_post_id(&path.into_inner(), "id")?;
    let ReportBody { title, reason } = payload.into_inner();
    let report = state
        .post_commands
        .report_post(ReportRequest {
            post_id,
            user_id: caller.into_inner(),
            title,
            reason,
        })
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(MSG_REPORTED, report)))
}

/// Register the post routes, literal segments first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_posts)
        .service(new_posts)
        .service(expired_posts)
        .service(get_post)
        .service(create_post)
        .service(update_post)
        .service(delete_post)
        .service(report_post);
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
