use crate::handlers::require_user;
use crate::models::*;
use crate::services::{CommentService, FollowService, PostService, UserService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取个人资料成功", body = UserResponse),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_me(user_service: web::Data<UserService>, req: HttpRequest) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.get_user(user.id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": profile
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "user",
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新个人资料成功", body = UserResponse),
        (status = 400, description = "请求参数错误"),
        (status = 409, description = "昵称或邮箱已被占用")
    )
)]
pub async fn update_me(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.update_profile(user.id, request.into_inner()).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": profile
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "user",
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户资料成功", body = UserResponse),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match user_service.get_user(path.into_inner()).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": profile
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/posts",
    tag = "user",
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户帖子成功"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user_posts(
    post_service: web::Data<PostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match post_service.get_posts_by_user(path.into_inner()).await {
        Ok(posts) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": posts
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/comments",
    tag = "user",
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户评论成功"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user_comments(
    comment_service: web::Data<CommentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match comment_service.get_comments_by_user(path.into_inner()).await {
        Ok(comments) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": comments
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/followers",
    tag = "user",
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取粉丝列表成功"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_followers(
    follow_service: web::Data<FollowService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match follow_service.get_followers(path.into_inner()).await {
        Ok(followers) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": followers
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/followings",
    tag = "user",
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取关注列表成功"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_followings(
    follow_service: web::Data<FollowService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match follow_service.get_followings(path.into_inner()).await {
        Ok(followings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": followings
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/me", web::get().to(get_me))
            .route("/me", web::patch().to(update_me))
            .route("/{user_id}", web::get().to(get_user))
            .route("/{user_id}/posts", web::get().to(get_user_posts))
            .route("/{user_id}/comments", web::get().to(get_user_comments))
            .route("/{user_id}/followers", web::get().to(get_followers))
            .route("/{user_id}/followings", web::get().to(get_followings)),
    );
}
