use crate::handlers::require_user;
use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde::Deserialize;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "注册成功", body = UserResponse),
        (status = 400, description = "请求参数错误"),
        (status = 409, description = "邮箱或昵称已被占用")
    )
)]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse> {
    match auth_service.signup(request.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = AuthResponse),
        (status = 401, description = "认证失败"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "刷新令牌成功", body = AuthResponse),
        (status = 401, description = "无效的刷新令牌")
    )
)]
pub async fn refresh(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "error": {
                "code": "AUTH_ERROR",
                "message": "Missing refresh token"
            }
        })));
    };

    match auth_service.refresh(token).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "登出成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn logout(auth_service: web::Data<AuthService>, req: HttpRequest) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match auth_service.logout(user.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Logged out"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailCheckQuery {
    pub email: String,
}

#[utoipa::path(
    get,
    path = "/auth/check-email",
    tag = "auth",
    params(
        ("email" = String, Query, description = "待检查邮箱")
    ),
    responses(
        (status = 200, description = "检查完成", body = DuplicateCheckResponse)
    )
)]
pub async fn check_email(
    auth_service: web::Data<AuthService>,
    query: web::Query<EmailCheckQuery>,
) -> Result<HttpResponse> {
    match auth_service.is_email_duplicate(&query.email).await {
        Ok(duplicate) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DuplicateCheckResponse { duplicate }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct NicknameCheckQuery {
    pub nickname: String,
}

#[utoipa::path(
    get,
    path = "/auth/check-nickname",
    tag = "auth",
    params(
        ("nickname" = String, Query, description = "待检查昵称")
    ),
    responses(
        (status = 200, description = "检查完成", body = DuplicateCheckResponse)
    )
)]
pub async fn check_nickname(
    auth_service: web::Data<AuthService>,
    query: web::Query<NicknameCheckQuery>,
) -> Result<HttpResponse> {
    match auth_service.is_nickname_duplicate(&query.nickname).await {
        Ok(duplicate) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DuplicateCheckResponse { duplicate }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .route("/check-email", web::get().to(check_email))
            .route("/check-nickname", web::get().to(check_nickname)),
    );
}
