use crate::handlers::require_user;
use crate::models::*;
use crate::services::{PostLikeService, PostService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "post",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取板块列表成功")
    )
)]
pub async fn get_categories(post_service: web::Data<PostService>) -> Result<HttpResponse> {
    match post_service.get_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories/{category_id}/posts",
    tag = "post",
    request_body = PostCreateRequest,
    params(
        ("category_id" = i64, Path, description = "板块ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "发帖成功", body = PostResponse),
        (status = 400, description = "请求参数错误或超出当日限额"),
        (status = 403, description = "公告板仅管理员可发"),
        (status = 409, description = "认证板块当日已提交")
    )
)]
pub async fn create_post(
    post_service: web::Data<PostService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<PostCreateRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match post_service
        .create_post(path.into_inner(), user.id, request.into_inner())
        .await
    {
        Ok(post) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": post
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "post",
    params(
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量"),
        ("sort" = Option<String>, Query, description = "createdAt | likeCount"),
        ("direction" = Option<String>, Query, description = "asc | desc")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取帖子列表成功")
    )
)]
pub async fn get_posts(
    post_service: web::Data<PostService>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse> {
    match post_service.get_posts_page(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/categories/{category_id}/posts",
    tag = "post",
    params(
        ("category_id" = i64, Path, description = "板块ID"),
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量"),
        ("sort" = Option<String>, Query, description = "createdAt | likeCount"),
        ("direction" = Option<String>, Query, description = "asc | desc")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取板块帖子成功"),
        (status = 404, description = "板块不存在")
    )
)]
pub async fn get_posts_by_category(
    post_service: web::Data<PostService>,
    path: web::Path<i64>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse> {
    match post_service
        .get_posts_by_category_page(path.into_inner(), &query.into_inner())
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
    path = "/posts/following",
    tag = "post",
    params(
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取关注动态成功"),
        (status = 401, description = "未授权")
    )
)]
pub async fn get_following_posts(
    post_service: web::Data<PostService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match post_service
        .get_posts_by_following_page(user.id, &query.into_inner())
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
    path = "/posts/search",
    tag = "post",
    params(
        ("type" = Option<String>, Query, description = "title | content | author"),
        ("keyword" = String, Query, description = "搜索关键词"),
        ("page" = Option<i64>, Query, description = "页码"),
        ("page_size" = Option<i64>, Query, description = "每页数量")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "搜索成功"),
        (status = 400, description = "关键词为空")
    )
)]
pub async fn search_posts(
    post_service: web::Data<PostService>,
    query: web::Query<PostSearchQuery>,
) -> Result<HttpResponse> {
    match post_service.search_posts_page(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    tag = "post",
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取帖子详情成功", body = PostResponse),
        (status = 404, description = "帖子不存在")
    )
)]
pub async fn get_post(
    post_service: web::Data<PostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match post_service.get_post(path.into_inner()).await {
        Ok(post) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": post
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/posts/{post_id}",
    tag = "post",
    request_body = PostPatchRequest,
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "修改帖子成功", body = PostResponse),
        (status = 403, description = "无修改权限"),
        (status = 404, description = "帖子不存在")
    )
)]
pub async fn update_post(
    post_service: web::Data<PostService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<PostPatchRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match post_service
        .update_post(path.into_inner(), user.id, request.into_inner())
        .await
    {
        Ok(post) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": post
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    tag = "post",
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "删除帖子成功"),
        (status = 403, description = "无删除权限"),
        (status = 404, description = "帖子不存在")
    )
)]
pub async fn delete_post(
    post_service: web::Data<PostService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match post_service.delete_post(path.into_inner(), user.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Post deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/posts/{post_id}/like",
    tag = "post",
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "点赞成功", body = LikeResponse),
        (status = 404, description = "帖子不存在")
    )
)]
pub async fn add_like(
    like_service: web::Data<PostLikeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match like_service.add_like(user.id, path.into_inner()).await {
        Ok(like) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": like
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}/like",
    tag = "post",
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "取消点赞成功", body = LikeResponse),
        (status = 404, description = "点赞记录不存在")
    )
)]
pub async fn delete_like(
    like_service: web::Data<PostLikeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match like_service.delete_like(user.id, path.into_inner()).await {
        Ok(like) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": like
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}/like",
    tag = "post",
    params(
        ("post_id" = i64, Path, description = "帖子ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "查询点赞状态成功", body = LikeResponse)
    )
)]
pub async fn check_like(
    like_service: web::Data<PostLikeService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match like_service.check_like(user.id, path.into_inner()).await {
        Ok(like) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": like
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn post_config(cfg: &mut web::ServiceConfig) {
    // 评论路由与帖子路由同属 /posts 前缀，统一挂在这一个作用域下
    let posts_scope = crate::handlers::comment::post_comment_routes(
        web::scope("/posts")
            .route("", web::get().to(get_posts))
            .route("/following", web::get().to(get_following_posts))
            .route("/search", web::get().to(search_posts))
            .route("/{post_id}", web::get().to(get_post))
            .route("/{post_id}", web::patch().to(update_post))
            .route("/{post_id}", web::delete().to(delete_post))
            .route("/{post_id}/like", web::post().to(add_like))
            .route("/{post_id}/like", web::delete().to(delete_like))
            .route("/{post_id}/like", web::get().to(check_like)),
    );

    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(get_categories))
            .route("/{category_id}/posts", web::post().to(create_post))
            .route("/{category_id}/posts", web::get().to(get_posts_by_category)),
    )
    .service(posts_scope);
}
