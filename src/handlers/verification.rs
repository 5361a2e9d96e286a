use crate::handlers::require_user;
use crate::models::*;
use crate::services::VerificationService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/verifications",
    tag = "verification",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取认证列表成功")
    )
)]
pub async fn get_verifications(
    verification_service: web::Data<VerificationService>,
) -> Result<HttpResponse> {
    match verification_service.get_all_verifications().await {
        Ok(verifications) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": verifications
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/verifications/weekly",
    tag = "verification",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取本周认证情况成功", body = WeeklyVerificationResponse)
    )
)]
pub async fn get_weekly_verifications(
    verification_service: web::Data<VerificationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match verification_service.get_weekly_verifications(user.id).await {
        Ok(dates) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": WeeklyVerificationResponse { dates }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/verifications/streak",
    tag = "verification",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取连续认证天数成功", body = StreakResponse)
    )
)]
pub async fn get_streak(
    verification_service: web::Data<VerificationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match verification_service.get_streak_days(user.id).await {
        Ok(streak_days) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": StreakResponse { streak_days }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/verifications/{verification_id}",
    tag = "verification",
    params(
        ("verification_id" = i64, Path, description = "认证ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取认证详情成功", body = VerificationResponse),
        (status = 404, description = "认证不存在")
    )
)]
pub async fn get_verification(
    verification_service: web::Data<VerificationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match verification_service.get_verification(path.into_inner()).await {
        Ok(verification) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": verification
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn verification_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/verifications")
            .route("", web::get().to(get_verifications))
            .route("/weekly", web::get().to(get_weekly_verifications))
            .route("/streak", web::get().to(get_streak))
            .route("/{verification_id}", web::get().to(get_verification)),
    );
}
