use crate::handlers::require_user;
use crate::models::*;
use crate::services::FollowService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/follows",
    tag = "follow",
    request_body = FollowRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "关注成功", body = FollowResponse),
        (status = 404, description = "用户不存在"),
        (status = 409, description = "已经关注")
    )
)]
pub async fn follow(
    follow_service: web::Data<FollowService>,
    req: HttpRequest,
    request: web::Json<FollowRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match follow_service.follow(user.id, request.following_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/follows/{following_id}",
    tag = "follow",
    params(
        ("following_id" = i64, Path, description = "取消关注的用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "取消关注成功"),
        (status = 404, description = "关注关系不存在")
    )
)]
pub async fn unfollow(
    follow_service: web::Data<FollowService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match follow_service.unfollow(user.id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Unfollowed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/follows/status/{following_id}",
    tag = "follow",
    params(
        ("following_id" = i64, Path, description = "查询对象用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "查询关注状态成功", body = FollowStatusResponse)
    )
)]
pub async fn is_following(
    follow_service: web::Data<FollowService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match follow_service.is_following(user.id, path.into_inner()).await {
        Ok(following) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": FollowStatusResponse { following }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn follow_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/follows")
            .route("", web::post().to(follow))
            .route("/status/{following_id}", web::get().to(is_following))
            .route("/{following_id}", web::delete().to(unfollow)),
    );
}
