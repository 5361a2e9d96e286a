use crate::handlers::require_user;
use crate::models::*;
use crate::services::CommentService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/posts/{post_id}/comments",
    tag = "comment",
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取评论成功"),
        (status = 404, description = "帖子不存在")
    )
)]
pub async fn get_comments(
    comment_service: web::Data<CommentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match comment_service.get_comments_by_post(path.into_inner()).await {
        Ok(comments) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": comments
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/posts/{post_id}/comments",
    tag = "comment",
    request_body = CommentRequest,
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "发表评论成功", body = CommentResponse),
        (status = 404, description = "帖子或父评论不存在")
    )
)]
pub async fn write_comment(
    comment_service: web::Data<CommentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match comment_service
        .write_comment(path.into_inner(), user.id, request.into_inner())
        .await
    {
        Ok(comment) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": comment
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/comments/{comment_id}",
    tag = "comment",
    request_body = CommentRequest,
    params(
        ("comment_id" = i64, Path, description = "评论ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "修改评论成功", body = CommentResponse),
        (status = 403, description = "仅作者可修改"),
        (status = 404, description = "评论不存在")
    )
)]
pub async fn update_comment(
    comment_service: web::Data<CommentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match comment_service
        .update_comment(path.into_inner(), user.id, request.into_inner())
        .await
    {
        Ok(comment) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": comment
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/comments/{comment_id}",
    tag = "comment",
    params(
        ("comment_id" = i64, Path, description = "评论ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除评论成功"),
        (status = 403, description = "仅作者可删除"),
        (status = 404, description = "评论不存在")
    )
)]
pub async fn delete_comment(
    comment_service: web::Data<CommentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match comment_service
        .delete_comment(path.into_inner(), user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Comment deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn comment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .route("/{comment_id}", web::patch().to(update_comment))
            .route("/{comment_id}", web::delete().to(delete_comment)),
    );
}

/// 挂在 /posts 作用域下的评论路由
pub fn post_comment_routes(scope: actix_web::Scope) -> actix_web::Scope {
    scope
        .route("/{post_id}/comments", web::get().to(get_comments))
        .route("/{post_id}/comments", web::post().to(write_comment))
}
