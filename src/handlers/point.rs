use crate::handlers::require_user;
use crate::models::*;
use crate::services::{PointService, PointStoreService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/points/history",
    tag = "point",
    params(
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取积分流水成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_point_history(
    point_service: web::Data<PointService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match point_service
        .get_user_point_history(user.id, &query.into_inner())
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
    get,
    path = "/pointstore/items",
    tag = "pointstore",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取商品列表成功")
    )
)]
pub async fn get_items(store_service: web::Data<PointStoreService>) -> Result<HttpResponse> {
    match store_service.get_items().await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": items
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/pointstore/purchase",
    tag = "pointstore",
    request_body = PurchaseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "购买成功", body = PurchaseResultResponse),
        (status = 400, description = "积分不足"),
        (status = 404, description = "商品不存在"),
        (status = 409, description = "已购买过该商品")
    )
)]
pub async fn purchase_item(
    store_service: web::Data<PointStoreService>,
    req: HttpRequest,
    request: web::Json<PurchaseRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match store_service.purchase_item(user.id, request.item_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": result
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pointstore/my-purchases",
    tag = "pointstore",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取已购商品成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_my_purchases(
    store_service: web::Data<PointStoreService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match store_service.get_my_purchases(user.id).await {
        Ok(purchases) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": purchases
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn point_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/points").route("/history", web::get().to(get_point_history)))
        .service(
            web::scope("/pointstore")
                .route("/items", web::get().to(get_items))
                .route("/purchase", web::post().to(purchase_item))
                .route("/my-purchases", web::get().to(get_my_purchases)),
        );
}
