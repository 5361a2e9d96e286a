use crate::handlers::require_admin;
use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    params(
        ("nickname" = Option<String>, Query, description = "昵称模糊匹配"),
        ("email" = Option<String>, Query, description = "邮箱模糊匹配"),
        ("role" = Option<String>, Query, description = "等级筛选"),
        ("status" = Option<String>, Query, description = "状态筛选"),
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户列表成功"),
        (status = 403, description = "需要管理员权限")
    )
)]
pub async fn get_users(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<AdminUserListQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service.get_users(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/users/{user_id}",
    tag = "admin",
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取用户详情成功", body = AdminUserDetailResponse),
        (status = 403, description = "需要管理员权限"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user_detail(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service.get_user_detail(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/users/{user_id}/status",
    tag = "admin",
    request_body = UserStatusUpdateRequest,
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "变更用户状态成功"),
        (status = 400, description = "管理员账号状态不可变更"),
        (status = 403, description = "需要管理员权限")
    )
)]
pub async fn update_user_status(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UserStatusUpdateRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service
        .update_user_status(path.into_inner(), request.status)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "User status updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/users/{user_id}/role",
    tag = "admin",
    request_body = UserRoleUpdateRequest,
    params(
        ("user_id" = i64, Path, description = "用户ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "变更用户等级成功"),
        (status = 400, description = "管理员账号等级不可变更"),
        (status = 403, description = "需要管理员权限")
    )
)]
pub async fn update_user_role(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UserRoleUpdateRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service
        .update_user_role(path.into_inner(), request.role)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "User role updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/verifications",
    tag = "admin",
    params(
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取待审核认证成功"),
        (status = 403, description = "需要管理员权限")
    )
)]
pub async fn get_pending_verifications(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service
        .get_pending_verifications(&query.into_inner())
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/verifications/{verification_id}/approve",
    tag = "admin",
    params(
        ("verification_id" = i64, Path, description = "认证ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "认证通过并发放积分"),
        (status = 403, description = "需要管理员权限"),
        (status = 404, description = "认证不存在"),
        (status = 409, description = "认证已处理")
    )
)]
pub async fn approve_verification(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service.approve_verification(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Verification approved"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/verifications/{verification_id}/reject",
    tag = "admin",
    params(
        ("verification_id" = i64, Path, description = "认证ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "认证已驳回"),
        (status = 403, description = "需要管理员权限"),
        (status = 404, description = "认证不存在"),
        (status = 409, description = "认证已处理")
    )
)]
pub async fn reject_verification(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service.reject_verification(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Verification rejected"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/reports",
    tag = "admin",
    params(
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取待处理举报成功"),
        (status = 403, description = "需要管理员权限")
    )
)]
pub async fn get_pending_reports(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service.get_pending_reports(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/reports/{report_id}/status",
    tag = "admin",
    request_body = ReportStatusUpdateRequest,
    params(
        ("report_id" = i64, Path, description = "举报ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "举报状态已更新"),
        (status = 403, description = "需要管理员权限"),
        (status = 404, description = "举报不存在")
    )
)]
pub async fn update_report_status(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<ReportStatusUpdateRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service
        .update_report_status(path.into_inner(), request.status)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Report status updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取仪表盘统计成功", body = DashboardStatsResponse),
        (status = 403, description = "需要管理员权限")
    )
)]
pub async fn get_dashboard_stats(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match admin_service.get_dashboard_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(get_users))
            .route("/users/{user_id}", web::get().to(get_user_detail))
            .route("/users/{user_id}/status", web::patch().to(update_user_status))
            .route("/users/{user_id}/role", web::patch().to(update_user_role))
            .route("/verifications", web::get().to(get_pending_verifications))
            .route(
                "/verifications/{verification_id}/approve",
                web::patch().to(approve_verification),
            )
            .route(
                "/verifications/{verification_id}/reject",
                web::patch().to(reject_verification),
            )
            .route("/reports", web::get().to(get_pending_reports))
            .route(
                "/reports/{report_id}/status",
                web::patch().to(update_report_status),
            )
            .route("/dashboard", web::get().to(get_dashboard_stats)),
    );
}
