use crate::handlers::require_user;
use crate::models::*;
use crate::services::ReportService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/reports",
    tag = "report",
    request_body = ReportCreateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "举报成功", body = ReportCreateResponse),
        (status = 400, description = "不能举报自己的帖子"),
        (status = 404, description = "帖子不存在")
    )
)]
pub async fn create_report(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
    request: web::Json<ReportCreateRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match report_service.create_report(user.id, request.into_inner()).await {
        Ok(report_id) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": ReportCreateResponse { report_id }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn report_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("", web::post().to(create_report)));
}
